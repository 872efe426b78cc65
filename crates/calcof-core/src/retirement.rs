//! Retirement savings projection.

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::constants::MAX_PROJECTION_YEARS;
use crate::input::{ensure_finite, ensure_non_negative, FormFields, FromFields, ParseError};

/// Inputs of the retirement calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Expected annual return in percent.
    pub annual_return: f64,
}

impl FromFields for RetirementInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            current_age: fields.integer("currentAge")?,
            retirement_age: fields.integer("retirementAge")?,
            current_savings: fields.number_or("currentSavings", 0.0)?,
            monthly_contribution: fields.number_or("monthlyContribution", 0.0)?,
            annual_return: fields.number("annualReturn")?,
        })
    }
}

/// Balance at the end of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub year: u32,
    pub age: u32,
    pub balance: f64,
}

/// Results of the retirement calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResults {
    pub years_to_retirement: u32,
    pub projected_savings: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub yearly_projection: Vec<YearlyBalance>,
}

/// Project savings with monthly compounding and end-of-month contributions.
pub fn calculate_retirement(inputs: &RetirementInputs) -> Result<RetirementResults, CalcError> {
    if inputs.retirement_age <= inputs.current_age {
        return Err(CalcError::InvalidInput(format!(
            "retirement age {} must exceed current age {}",
            inputs.retirement_age, inputs.current_age
        )));
    }
    ensure_non_negative("current savings", inputs.current_savings)?;
    ensure_non_negative("monthly contribution", inputs.monthly_contribution)?;

    let years = inputs.retirement_age - inputs.current_age;
    if years > MAX_PROJECTION_YEARS {
        return Err(CalcError::InvalidInput(format!(
            "{years} years to retirement exceeds {MAX_PROJECTION_YEARS}"
        )));
    }
    let monthly_rate = inputs.annual_return / 100.0 / 12.0;

    let mut balance = inputs.current_savings;
    let mut contributed = inputs.current_savings;
    let mut projection = Vec::with_capacity(years as usize);
    for year in 1..=years {
        for _ in 0..12 {
            balance += balance * monthly_rate + inputs.monthly_contribution;
            contributed += inputs.monthly_contribution;
        }
        ensure_finite("projected balance", balance)?;
        projection.push(YearlyBalance {
            year,
            age: inputs.current_age + year,
            balance,
        });
    }

    Ok(RetirementResults {
        years_to_retirement: years,
        projected_savings: balance,
        total_contributions: contributed,
        total_growth: balance - contributed,
        yearly_projection: projection,
    })
}

/// Registry adapter for [`calculate_retirement`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RetirementCalculator;

impl CoreCalculator for RetirementCalculator {
    type Inputs = RetirementInputs;
    type Results = RetirementResults;

    fn name(&self) -> &'static str {
        "retirement"
    }

    fn description(&self) -> &'static str {
        "Projected retirement savings with monthly contributions"
    }

    fn calculate_core(&self, inputs: &RetirementInputs) -> Result<RetirementResults, CalcError> {
        calculate_retirement(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(savings: f64, contribution: f64, annual_return: f64) -> RetirementInputs {
        RetirementInputs {
            current_age: 30,
            retirement_age: 65,
            current_savings: savings,
            monthly_contribution: contribution,
            annual_return,
        }
    }

    #[test]
    fn zero_return_is_plain_sum() {
        let r = calculate_retirement(&inputs(10_000.0, 500.0, 0.0)).unwrap();
        assert_eq!(r.years_to_retirement, 35);
        let expected = 10_000.0 + 500.0 * 12.0 * 35.0;
        assert!((r.projected_savings - expected).abs() < 1e-6);
        assert!(r.total_growth.abs() < 1e-6);
    }

    #[test]
    fn lump_sum_compounds_monthly() {
        let mut i = inputs(1_000.0, 0.0, 12.0);
        i.retirement_age = 31;
        let r = calculate_retirement(&i).unwrap();
        let expected = 1_000.0 * 1.01_f64.powi(12);
        assert!((r.projected_savings - expected).abs() < 1e-9);
        assert_eq!(r.yearly_projection.len(), 1);
        assert_eq!(r.yearly_projection[0].age, 31);
    }

    #[test]
    fn projection_grows_each_year() {
        let r = calculate_retirement(&inputs(5_000.0, 200.0, 5.0)).unwrap();
        assert_eq!(r.yearly_projection.len(), 35);
        for pair in r.yearly_projection.windows(2) {
            assert!(pair[1].balance > pair[0].balance);
        }
        assert!(r.total_growth > 0.0);
    }

    #[test]
    fn horizon_is_bounded() {
        let mut i = inputs(0.0, 100.0, 5.0);
        i.retirement_age = u32::MAX;
        assert!(matches!(
            calculate_retirement(&i),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn retirement_age_must_exceed_current_age() {
        let mut i = inputs(0.0, 100.0, 5.0);
        i.retirement_age = 30;
        assert!(matches!(
            calculate_retirement(&i),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn from_fields_defaults_savings_to_zero() {
        let fields = FormFields::parse_pairs([
            "currentAge=40",
            "retirementAge=60",
            "annualReturn=6",
        ])
        .unwrap();
        let i = RetirementInputs::from_fields(&fields).unwrap();
        assert_eq!(i.current_savings, 0.0);
        assert_eq!(i.monthly_contribution, 0.0);
    }
}
