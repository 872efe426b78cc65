//! Percentage problems.
//!
//! Each calculation type picks which quantity is unknown:
//!
//! | type         | question                            | result                      |
//! |--------------|-------------------------------------|-----------------------------|
//! | `percentage` | `value1` is what % of `value2`?     | `value1 / value2 · 100`     |
//! | `value`      | what is `value1`% of `value2`?      | `value1 · value2 / 100`     |
//! | `total`      | `value1` is `value2`% of what?      | `value1 · 100 / value2`     |
//! | `change`     | % change from `value1` to `value2`  | `(v2 − v1) / abs(v1) · 100` |

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::input::{checked_div, ensure_finite, FormFields, FromFields, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    #[default]
    Percentage,
    Value,
    Total,
    Change,
}

/// Inputs of the percentage calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentageInputs {
    #[serde(default)]
    pub calculation_type: CalculationType,
    pub value1: f64,
    pub value2: f64,
}

impl FromFields for PercentageInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            calculation_type: fields.choice_or("calculationType", CalculationType::Percentage)?,
            value1: fields.number("value1")?,
            value2: fields.number("value2")?,
        })
    }
}

/// Results of the percentage calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageResults {
    pub result: f64,
    pub explanation: String,
    pub formula: String,
}

/// Solve the percentage problem selected by `calculation_type`.
pub fn calculate_percentage(inputs: &PercentageInputs) -> Result<PercentageResults, CalcError> {
    let (v1, v2) = (inputs.value1, inputs.value2);
    let v1s = trim_number(v1);
    let v2s = trim_number(v2);

    let results = match inputs.calculation_type {
        CalculationType::Percentage => {
            let result =
                ensure_finite("percentage", checked_div("value2 is zero", v1, v2)? * 100.0)?;
            let r = trim_number(result);
            PercentageResults {
                result,
                explanation: format!("{v1s} is {r}% of {v2s}"),
                formula: format!("({v1s} ÷ {v2s}) × 100 = {r}%"),
            }
        }
        CalculationType::Value => {
            let result = ensure_finite("value", v1 * v2 / 100.0)?;
            let r = trim_number(result);
            PercentageResults {
                result,
                explanation: format!("{v1s}% of {v2s} is {r}"),
                formula: format!("({v1s} × {v2s}) ÷ 100 = {r}"),
            }
        }
        CalculationType::Total => {
            let result =
                ensure_finite("total", checked_div("value2 is zero", v1 * 100.0, v2)?)?;
            let r = trim_number(result);
            PercentageResults {
                result,
                explanation: format!("{v1s} is {v2s}% of {r}"),
                formula: format!("({v1s} × 100) ÷ {v2s} = {r}"),
            }
        }
        CalculationType::Change => {
            let result = ensure_finite(
                "percentage change",
                checked_div("value1 is zero", v2 - v1, v1.abs())? * 100.0,
            )?;
            let r = trim_number(result.abs());
            let direction = if result < 0.0 { "decrease" } else { "increase" };
            PercentageResults {
                result,
                explanation: format!("From {v1s} to {v2s} is a {r}% {direction}"),
                formula: format!("(({v2s} − {v1s}) ÷ |{v1s}|) × 100 = {}%", trim_number(result)),
            }
        }
    };
    Ok(results)
}

/// Render a number with at most four decimals and no trailing zeros.
fn trim_number(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Registry adapter for [`calculate_percentage`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PercentageCalculator;

impl CoreCalculator for PercentageCalculator {
    type Inputs = PercentageInputs;
    type Results = PercentageResults;

    fn name(&self) -> &'static str {
        "percentage"
    }

    fn description(&self) -> &'static str {
        "Percent of a total, value from a percent, total from a part, percent change"
    }

    fn calculate_core(&self, inputs: &PercentageInputs) -> Result<PercentageResults, CalcError> {
        calculate_percentage(inputs)
    }
}
