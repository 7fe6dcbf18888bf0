use client_core::{FormState, FormStore};
use crossbeam_channel::{Receiver, Sender};
use shared::{
    domain::{NumericField, OceanProximity},
    protocol::PredictionResult,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{StatusBannerSeverity, SubmissionPanel, ViewState},
};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Prefill the form with the sample record instead of blanks.
    pub prefill_sample: bool,
}

pub struct PredictorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: FormStore,
    view: ViewState,
}

impl PredictorApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let form = if startup.prefill_sample {
            FormStore::with_state(FormState::sample())
        } else {
            FormStore::new()
        };
        let mut app = Self {
            cmd_tx,
            ui_rx,
            form,
            view: ViewState::default(),
        };
        dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::ProbeService,
            &mut app.view.status,
        );
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.view.apply(event);
        }
    }

    fn submit(&mut self) {
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit {
                form: self.form.get_state(),
            },
            &mut self.view.status,
        ) {
            self.view.mark_submit_pending();
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.view.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.view.dismiss_banner();
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui, form: &FormState) {
        egui::Grid::new("prediction_form")
            .num_columns(2)
            .spacing([16.0, 10.0])
            .striped(false)
            .show(ui, |ui| {
                for field in NumericField::ALL {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(field.label()).strong());
                        ui.label(egui::RichText::new(field.description()).small().weak());
                    });
                    let mut value = form.value(field).to_string();
                    let edit = egui::TextEdit::singleline(&mut value)
                        .id_salt(field.name())
                        .hint_text(field.placeholder())
                        .desired_width(220.0);
                    if ui.add(edit).changed() {
                        self.form.set_numeric(field, value);
                    }
                    ui.end_row();
                }

                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(OceanProximity::LABEL).strong());
                    ui.label(egui::RichText::new(OceanProximity::DESCRIPTION).small().weak());
                });
                let current = form.ocean_proximity();
                let mut selected = current;
                egui::ComboBox::from_id_salt(OceanProximity::FIELD_NAME)
                    .selected_text(selected.as_str())
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for option in OceanProximity::ALL {
                            ui.selectable_value(&mut selected, option, option.as_str());
                        }
                    });
                if selected != current {
                    self.form.set_ocean_proximity(selected);
                }
                ui.end_row();
            });
    }

    fn show_actions(&mut self, ui: &mut egui::Ui, form: &FormState) {
        let can_submit = self.view.can_submit(form);
        ui.horizontal(|ui| {
            if ui.button("Load Sample Data").clicked() {
                self.form.load_sample();
            }
            let predict = ui.add_enabled(can_submit, egui::Button::new("Predict House Price"));
            if predict.clicked() {
                self.submit();
            }
        });

        let missing = form.missing_fields();
        if !missing.is_empty() && !self.view.submission.loading {
            let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
            ui.label(
                egui::RichText::new(format!("Required: {}", names.join(", ")))
                    .small()
                    .weak(),
            );
        }
    }

    fn show_submission_panel(&self, ui: &mut egui::Ui) {
        match self.view.submission_panel() {
            SubmissionPanel::Empty => {}
            SubmissionPanel::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Predicting...");
                });
            }
            SubmissionPanel::Failed(message) => {
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(111, 53, 53))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    });
            }
            SubmissionPanel::Succeeded(result) => show_result_card(ui, result),
        }
    }
}

fn show_result_card(ui: &mut egui::Ui, result: &PredictionResult) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(40, 84, 62))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(86, 150, 112)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Predicted House Price").color(egui::Color32::WHITE));
            ui.label(
                egui::RichText::new(&result.formatted_price)
                    .size(28.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            );
            if let Some(features) = result.input_features() {
                ui.collapsing("Submitted features", |ui| {
                    for (name, value) in features {
                        ui.label(format!("{name}: {value}"));
                    }
                });
            }
        });
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status = ui.label(egui::RichText::new(&self.view.status).small());
            if let Some(service) = &self.view.service {
                status.on_hover_ui(|ui| {
                    for (path, description) in &service.endpoints {
                        ui.label(format!("{path}: {description}"));
                    }
                });
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("House Price Predictor");
                ui.label("Enter block group details to estimate the median house value.");
                ui.add_space(8.0);

                self.show_status_banner(ui);

                let form = self.form.get_state();
                self.show_form(ui, &form);
                ui.add_space(12.0);
                self.show_actions(ui, &form);
                ui.add_space(12.0);
                self.show_submission_panel(ui);
            });
        });

        if self.view.submission.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
