use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub const NUMERIC_FIELD_COUNT: usize = 8;

macro_rules! numeric_fields {
    ($(
        $variant:ident => $name:literal {
            label: $label:literal,
            description: $description:literal,
            placeholder: $placeholder:literal,
            fractional: $fractional:literal $(,)?
        }
    ),+ $(,)?) => {
        /// Numeric housing attributes collected by the form, in wire order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum NumericField {
            $($variant),+
        }

        impl NumericField {
            pub const ALL: [NumericField; NUMERIC_FIELD_COUNT] = [$(NumericField::$variant),+];

            /// Input/wire name of the field.
            pub fn name(self) -> &'static str {
                match self {
                    $(NumericField::$variant => $name),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(NumericField::$variant => $label),+
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $(NumericField::$variant => $description),+
                }
            }

            pub fn placeholder(self) -> &'static str {
                match self {
                    $(NumericField::$variant => $placeholder),+
                }
            }

            /// Whether the input expects fractional values rather than counts.
            pub fn accepts_fraction(self) -> bool {
                match self {
                    $(NumericField::$variant => $fractional),+
                }
            }

            /// Position of the field in [`NumericField::ALL`].
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl FromStr for NumericField {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(NumericField::$variant),)+
                    other => Err(FieldError::UnknownField(other.to_string())),
                }
            }
        }
    };
}

numeric_fields! {
    Longitude => "longitude" {
        label: "Longitude",
        description: "Geographic coordinate (horizontal), west-east location in California",
        placeholder: "e.g., -122.23",
        fractional: true,
    },
    Latitude => "latitude" {
        label: "Latitude",
        description: "Geographic coordinate (vertical), north-south location",
        placeholder: "e.g., 37.88",
        fractional: true,
    },
    HousingMedianAge => "housing_median_age" {
        label: "Housing Median Age",
        description: "Median age of houses in the block group (in years)",
        placeholder: "e.g., 41",
        fractional: false,
    },
    TotalRooms => "total_rooms" {
        label: "Total Rooms",
        description: "Total number of rooms in all houses in the block",
        placeholder: "e.g., 880",
        fractional: false,
    },
    TotalBedrooms => "total_bedrooms" {
        label: "Total Bedrooms",
        description: "Total number of bedrooms in all houses in the block",
        placeholder: "e.g., 129",
        fractional: false,
    },
    Population => "population" {
        label: "Population",
        description: "Number of people living in that block",
        placeholder: "e.g., 322",
        fractional: false,
    },
    Households => "households" {
        label: "Households",
        description: "Number of households (families/units) in the block",
        placeholder: "e.g., 126",
        fractional: false,
    },
    MedianIncome => "median_income" {
        label: "Median Income (in $10k)",
        description: "Median income in units of $10,000 (e.g., 8.3 = $83,000)",
        placeholder: "e.g., 8.3252",
        fractional: true,
    },
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OceanProximity {
    #[serde(rename = "<1H OCEAN")]
    LessThanOneHour,
    #[default]
    #[serde(rename = "INLAND")]
    Inland,
    #[serde(rename = "ISLAND")]
    Island,
    #[serde(rename = "NEAR BAY")]
    NearBay,
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    pub const ALL: [OceanProximity; 5] = [
        OceanProximity::LessThanOneHour,
        OceanProximity::Inland,
        OceanProximity::Island,
        OceanProximity::NearBay,
        OceanProximity::NearOcean,
    ];

    pub const FIELD_NAME: &'static str = "ocean_proximity";
    pub const LABEL: &'static str = "Ocean Proximity";
    pub const DESCRIPTION: &'static str =
        "Categorical feature, how close the area is to the ocean";

    pub fn as_str(self) -> &'static str {
        match self {
            OceanProximity::LessThanOneHour => "<1H OCEAN",
            OceanProximity::Inland => "INLAND",
            OceanProximity::Island => "ISLAND",
            OceanProximity::NearBay => "NEAR BAY",
            OceanProximity::NearOcean => "NEAR OCEAN",
        }
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OceanProximity {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OceanProximity::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| FieldError::InvalidOceanProximity(s.to_string()))
    }
}

/// Any single input of the form, addressed by its input name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Numeric(NumericField),
    OceanProximity,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            FormField::Numeric(field) => field.name(),
            FormField::OceanProximity => OceanProximity::FIELD_NAME,
        }
    }
}

impl From<NumericField> for FormField {
    fn from(value: NumericField) -> Self {
        FormField::Numeric(value)
    }
}

impl FromStr for FormField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == OceanProximity::FIELD_NAME {
            return Ok(FormField::OceanProximity);
        }
        s.parse::<NumericField>().map(FormField::Numeric)
    }
}
