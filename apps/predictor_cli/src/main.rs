use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    build_request,
    settings::{load_settings, SETTINGS_FILE_NAME},
    FormState, FormStore, PredictorClient, Settings, SubmissionController, SubmissionState,
};
use shared::domain::{FormField, NumericField};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "House price prediction client")]
struct Cli {
    /// Prediction service root, overriding the settings file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true, default_value = SETTINGS_FILE_NAME)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one prediction request.
    Predict(PredictArgs),
    /// Print the request body built from the sample record.
    Sample,
    /// Show the service banner and endpoint list.
    Info,
    /// Show the feature descriptions published by the service.
    Features,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Start from the sample record; other flags overwrite individual fields.
    #[arg(long)]
    sample: bool,
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    housing_median_age: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    total_rooms: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    total_bedrooms: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    population: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    households: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    median_income: Option<String>,
    /// One of: "<1H OCEAN", INLAND, ISLAND, "NEAR BAY", "NEAR OCEAN".
    #[arg(long)]
    ocean_proximity: Option<String>,
    /// Print the full service response as JSON.
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn numeric_value(&self, field: NumericField) -> Option<&str> {
        let value = match field {
            NumericField::Longitude => &self.longitude,
            NumericField::Latitude => &self.latitude,
            NumericField::HousingMedianAge => &self.housing_median_age,
            NumericField::TotalRooms => &self.total_rooms,
            NumericField::TotalBedrooms => &self.total_bedrooms,
            NumericField::Population => &self.population,
            NumericField::Households => &self.households,
            NumericField::MedianIncome => &self.median_income,
        };
        value.as_deref()
    }

    fn fill(&self, store: &FormStore) -> Result<()> {
        if self.sample {
            store.load_sample();
        }
        for field in NumericField::ALL {
            if let Some(value) = self.numeric_value(field) {
                store.set_field(FormField::Numeric(field), value)?;
            }
        }
        if let Some(value) = &self.ocean_proximity {
            store.set_field(FormField::OceanProximity, value)?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings(&cli.config)
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?
        .with_api_base_url(cli.api_url.as_deref())?;
    tracing::debug!(api_base_url = %settings.api_base_url, "settings loaded");

    match cli.command {
        Command::Predict(args) => predict(&settings, &args).await?,
        Command::Sample => {
            let request = build_request(&FormState::sample());
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Info => {
            let info = PredictorClient::new(&settings).service_info().await?;
            println!("{}", info.message);
            for (path, description) in &info.endpoints {
                println!("  {path:<12} {description}");
            }
        }
        Command::Features => {
            let catalog = PredictorClient::new(&settings).feature_catalog().await?;
            for (name, feature) in &catalog.features {
                println!("{name} ({:?}): {}", feature.kind, feature.description);
                if let Some(example) = feature.example {
                    println!("    example: {example}");
                }
                if let Some(options) = &feature.options {
                    println!("    options: {}", options.join(", "));
                }
            }
        }
    }

    Ok(())
}

async fn predict(settings: &Settings, args: &PredictArgs) -> Result<()> {
    let store = FormStore::new();
    args.fill(&store)?;
    let form = store.get_state();

    let missing = form.missing_fields();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|field| field.name()).collect();
        bail!(
            "missing required fields: {} (pass --sample to start from the sample record)",
            names.join(", ")
        );
    }

    let controller = SubmissionController::new(Arc::new(PredictorClient::new(settings)));
    controller.submit(&form).await;

    match controller.snapshot().state {
        SubmissionState::Succeeded(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Predicted House Price: {}", result.formatted_price);
                if let Some(price) = result.predicted_price() {
                    println!("Raw estimate: {price:.2}");
                }
            }
            Ok(())
        }
        SubmissionState::Failed(message) => bail!(message),
        SubmissionState::Idle | SubmissionState::Loading => {
            bail!("prediction did not complete")
        }
    }
}
