use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{NumericField, OceanProximity, NUMERIC_FIELD_COUNT};

/// Body of `POST /predict`.
///
/// Non-finite values are serialized as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl PredictionRequest {
    /// Builds a request from values ordered like [`NumericField::ALL`].
    pub fn from_values(values: [f64; NUMERIC_FIELD_COUNT], ocean_proximity: OceanProximity) -> Self {
        let [longitude, latitude, housing_median_age, total_rooms, total_bedrooms, population, households, median_income] =
            values;
        Self {
            longitude,
            latitude,
            housing_median_age,
            total_rooms,
            total_bedrooms,
            population,
            households,
            median_income,
            ocean_proximity,
        }
    }

    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Longitude => self.longitude,
            NumericField::Latitude => self.latitude,
            NumericField::HousingMedianAge => self.housing_median_age,
            NumericField::TotalRooms => self.total_rooms,
            NumericField::TotalBedrooms => self.total_bedrooms,
            NumericField::Population => self.population,
            NumericField::Households => self.households,
            NumericField::MedianIncome => self.median_income,
        }
    }

    pub fn has_non_finite_values(&self) -> bool {
        NumericField::ALL
            .iter()
            .any(|field| !self.value(*field).is_finite())
    }
}

/// Success body of `POST /predict`. Fields other than `formatted_price` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub formatted_price: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResult {
    pub fn new(formatted_price: impl Into<String>) -> Self {
        Self {
            formatted_price: formatted_price.into(),
            extra: Map::new(),
        }
    }

    pub fn predicted_price(&self) -> Option<f64> {
        self.extra.get("predicted_price").and_then(Value::as_f64)
    }

    /// Feature vector echoed back by the service, when present.
    pub fn input_features(&self) -> Option<BTreeMap<String, f64>> {
        let features = self.extra.get("input_features")?.as_object()?;
        Some(
            features
                .iter()
                .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
                .collect(),
        )
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Number,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Body of `GET /features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCatalog {
    pub features: BTreeMap<String, FeatureDescriptor>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_numbers_and_enum_label() {
        let request = PredictionRequest::from_values(
            [-122.23, 37.88, 41.0, 880.0, 129.0, 322.0, 126.0, 8.3252],
            OceanProximity::NearBay,
        );
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "longitude": -122.23,
                "latitude": 37.88,
                "housing_median_age": 41.0,
                "total_rooms": 880.0,
                "total_bedrooms": 129.0,
                "population": 322.0,
                "households": 126.0,
                "median_income": 8.3252,
                "ocean_proximity": "NEAR BAY"
            })
        );
    }

    #[test]
    fn non_finite_values_serialize_as_null() {
        let mut values = [1.0; NUMERIC_FIELD_COUNT];
        values[NumericField::Longitude.index()] = f64::NAN;
        let request = PredictionRequest::from_values(values, OceanProximity::Inland);
        assert!(request.has_non_finite_values());

        let body = serde_json::to_string(&request).unwrap();
        assert!(body.starts_with(r#"{"longitude":null,"#), "body: {body}");
    }

    #[test]
    fn result_keeps_unknown_fields() {
        let result: PredictionResult = serde_json::from_value(json!({
            "formatted_price": "$452,600.00",
            "predicted_price": 452600.0,
            "input_features": {"longitude": -122.23, "ocean_proximity_NEAR BAY": 1},
            "model": "gbr-v2"
        }))
        .unwrap();

        assert_eq!(result.formatted_price, "$452,600.00");
        assert_eq!(result.predicted_price(), Some(452600.0));
        assert_eq!(result.extra.get("model"), Some(&json!("gbr-v2")));
        let features = result.input_features().unwrap();
        assert_eq!(features.get("ocean_proximity_NEAR BAY"), Some(&1.0));

        let echoed = serde_json::to_value(&result).unwrap();
        assert_eq!(echoed["model"], json!("gbr-v2"));
    }

    #[test]
    fn feature_catalog_decodes_number_and_select_entries() {
        let catalog: FeatureCatalog = serde_json::from_value(json!({
            "features": {
                "longitude": {"type": "number", "description": "Longitude coordinate", "example": -122.23},
                "ocean_proximity": {
                    "type": "select",
                    "options": ["<1H OCEAN", "INLAND", "ISLAND", "NEAR BAY", "NEAR OCEAN"],
                    "description": "Proximity to ocean"
                }
            }
        }))
        .unwrap();

        assert_eq!(catalog.features["longitude"].kind, FeatureKind::Number);
        assert_eq!(catalog.features["longitude"].example, Some(-122.23));
        let options = catalog.features["ocean_proximity"].options.clone().unwrap();
        assert_eq!(options.len(), OceanProximity::ALL.len());
    }
}
