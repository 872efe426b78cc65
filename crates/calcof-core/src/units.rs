//! Measurement systems shared by the health calculators.

use serde::{Deserialize, Serialize};

use crate::constants::{CM_PER_INCH, GRAMS_PER_OZ, KG_PER_LB};

/// Unit system of a form.
///
/// Metric forms use kilograms, centimetres and grams; imperial forms use
/// pounds, inches and ounces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    /// Convert a body weight in this unit system to kilograms.
    #[must_use]
    pub fn weight_to_kg(self, weight: f64) -> f64 {
        match self {
            Self::Metric => weight,
            Self::Imperial => weight * KG_PER_LB,
        }
    }

    /// Convert a height in this unit system to centimetres.
    #[must_use]
    pub fn height_to_cm(self, height: f64) -> f64 {
        match self {
            Self::Metric => height,
            Self::Imperial => height * CM_PER_INCH,
        }
    }

    /// Convert grams to this unit system's small mass unit (g or oz).
    #[must_use]
    pub fn grams_to_local(self, grams: f64) -> f64 {
        match self {
            Self::Metric => grams,
            Self::Imperial => grams / GRAMS_PER_OZ,
        }
    }
}
