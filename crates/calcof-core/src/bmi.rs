//! Body mass index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::constants::{HEALTHY_BMI_MAX, HEALTHY_BMI_MIN, IMPERIAL_BMI_FACTOR};
use crate::input::{
    checked_div, ensure_finite, ensure_non_negative, FormFields, FromFields, ParseError,
};
use crate::units::Unit;

/// Inputs of the BMI calculator.
///
/// Metric: kilograms and centimetres. Imperial: pounds and inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiInputs {
    pub weight: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: Unit,
}

impl FromFields for BmiInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            weight: fields.number("weight")?,
            height: fields.number("height")?,
            unit: fields.choice_or("unit", Unit::Metric)?,
        })
    }
}

/// WHO adult weight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Category for a BMI value.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weight range for a healthy BMI at the given height, in input units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

/// Results of the BMI calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResults {
    pub bmi: f64,
    pub category: BmiCategory,
    pub healthy_weight_range: WeightRange,
}

/// Compute BMI, its category, and the healthy weight range.
pub fn calculate_bmi(inputs: &BmiInputs) -> Result<BmiResults, CalcError> {
    ensure_non_negative("weight", inputs.weight)?;
    ensure_non_negative("height", inputs.height)?;

    // weight = bmi * scale, where scale depends only on height and unit.
    let scale = match inputs.unit {
        Unit::Metric => {
            let metres = inputs.height / 100.0;
            metres * metres
        }
        Unit::Imperial => inputs.height * inputs.height / IMPERIAL_BMI_FACTOR,
    };
    let scale = ensure_finite("height squared", scale)?;
    let bmi = ensure_finite("bmi", checked_div("height is zero", inputs.weight, scale)?)?;

    Ok(BmiResults {
        bmi,
        category: BmiCategory::from_bmi(bmi),
        healthy_weight_range: WeightRange {
            min: HEALTHY_BMI_MIN * scale,
            max: ensure_finite("healthy weight", HEALTHY_BMI_MAX * scale)?,
        },
    })
}

/// Registry adapter for [`calculate_bmi`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BmiCalculator;

impl CoreCalculator for BmiCalculator {
    type Inputs = BmiInputs;
    type Results = BmiResults;

    fn name(&self) -> &'static str {
        "bmi"
    }

    fn description(&self) -> &'static str {
        "Body mass index and healthy weight range"
    }

    fn calculate_core(&self, inputs: &BmiInputs) -> Result<BmiResults, CalcError> {
        calculate_bmi(inputs)
    }
}
