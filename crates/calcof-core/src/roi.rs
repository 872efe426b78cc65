//! Return on investment.

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::input::{
    checked_div, ensure_finite, ensure_non_negative, FormFields, FromFields, ParseError,
};

/// Inputs of the ROI calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    pub initial_investment: f64,
    pub annual_revenue: f64,
    pub annual_costs: f64,
    /// Horizon in whole years.
    pub timeframe: u32,
}

impl FromFields for RoiInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            initial_investment: fields.number("initialInvestment")?,
            annual_revenue: fields.number("annualRevenue")?,
            annual_costs: fields.number("annualCosts")?,
            timeframe: fields.integer("timeframe")?,
        })
    }
}

/// Results of the ROI calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResults {
    /// Return on investment, in percent.
    pub roi: f64,
    pub net_profit: f64,
    /// Years until the annual net cash flow repays the investment.
    pub payback_period: f64,
}

/// Compute ROI, net profit and payback period.
///
/// `netProfit = revenue·t − (costs·t + investment)`,
/// `roi = netProfit / investment · 100`,
/// `payback = investment / (revenue − costs)`.
pub fn calculate_roi(inputs: &RoiInputs) -> Result<RoiResults, CalcError> {
    ensure_non_negative("initial investment", inputs.initial_investment)?;
    if inputs.timeframe == 0 {
        return Err(CalcError::InvalidInput(
            "timeframe must be at least one year".into(),
        ));
    }

    let years = f64::from(inputs.timeframe);
    let total_revenue = inputs.annual_revenue * years;
    let total_costs = inputs.annual_costs * years + inputs.initial_investment;
    let net_profit = ensure_finite("net profit", total_revenue - total_costs)?;

    let roi = checked_div("initial investment is zero", net_profit, inputs.initial_investment)? * 100.0;
    let roi = ensure_finite("roi", roi)?;
    let payback_period = checked_div(
        "annual revenue equals annual costs",
        inputs.initial_investment,
        ensure_finite("annual net cash flow", inputs.annual_revenue - inputs.annual_costs)?,
    )?;
    let payback_period = ensure_finite("payback period", payback_period)?;
    tracing::trace!(total_revenue, total_costs, "roi totals");

    Ok(RoiResults {
        roi,
        net_profit,
        payback_period,
    })
}

/// Registry adapter for [`calculate_roi`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RoiCalculator;

impl CoreCalculator for RoiCalculator {
    type Inputs = RoiInputs;
    type Results = RoiResults;

    fn name(&self) -> &'static str {
        "roi"
    }

    fn description(&self) -> &'static str {
        "Return on investment, net profit and payback period"
    }

    fn calculate_core(&self, inputs: &RoiInputs) -> Result<RoiResults, CalcError> {
        calculate_roi(inputs)
    }
}
