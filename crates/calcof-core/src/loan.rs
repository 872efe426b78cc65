//! Fixed-rate loan amortization.
//!
//! The periodic payment follows the standard annuity formula
//! `P·r·(1+r)^n / ((1+r)^n − 1)`; a zero rate spreads the principal evenly.
//! The schedule is built period by period from a running balance, and the
//! final period retires whatever balance remains so the principal column
//! sums to the loan amount exactly.

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::constants::MAX_LOAN_TERM_YEARS;
use crate::input::{ensure_finite, ensure_non_negative, FormFields, FromFields, ParseError};

/// How often payments are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Biweekly,
    Weekly,
    Quarterly,
    Annually,
}

impl PaymentFrequency {
    /// Payments per year.
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Biweekly => 26,
            Self::Weekly => 52,
            Self::Quarterly => 4,
            Self::Annually => 1,
        }
    }
}

/// Inputs of the loan calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInputs {
    pub loan_amount: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    /// Term in whole years.
    pub loan_term: u32,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
}

impl FromFields for LoanInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            loan_amount: fields.number("loanAmount")?,
            interest_rate: fields.number("interestRate")?,
            loan_term: fields.integer("loanTerm")?,
            payment_frequency: fields.choice_or("paymentFrequency", PaymentFrequency::Monthly)?,
        })
    }
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub period: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Results of the loan calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResults {
    /// Payment expressed per month, whatever the frequency.
    pub monthly_payment: f64,
    /// Payment made each period.
    pub periodic_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub amortization_schedule: Vec<AmortizationEntry>,
}

/// Payment per period for `principal` over `periods` at `rate` per period.
pub fn periodic_payment(principal: f64, rate: f64, periods: u32) -> Result<f64, CalcError> {
    if periods == 0 {
        return Err(CalcError::DivisionByZero("loan has no payment periods"));
    }
    let n = f64::from(periods);
    let growth = ensure_finite("(1 + r)^n", (1.0 + rate).powf(n))?;
    // A rate too small to move (1 + r)^n off 1.0 amortizes like a zero rate.
    if rate == 0.0 || growth == 1.0 {
        return Ok(principal / n);
    }
    ensure_finite("periodic payment", principal * rate * growth / (growth - 1.0))
}

/// Compute the payment and the full amortization schedule.
pub fn calculate_loan(inputs: &LoanInputs) -> Result<LoanResults, CalcError> {
    ensure_non_negative("loan amount", inputs.loan_amount)?;
    ensure_non_negative("interest rate", inputs.interest_rate)?;
    if inputs.loan_term > MAX_LOAN_TERM_YEARS {
        return Err(CalcError::InvalidInput(format!(
            "loan term of {} years exceeds {MAX_LOAN_TERM_YEARS}",
            inputs.loan_term
        )));
    }

    let per_year = inputs.payment_frequency.periods_per_year();
    let periods = inputs
        .loan_term
        .checked_mul(per_year)
        .ok_or_else(|| CalcError::Overflow(format!("{} year term", inputs.loan_term)))?;
    let rate = inputs.interest_rate / 100.0 / f64::from(per_year);
    let payment = periodic_payment(inputs.loan_amount, rate, periods)?;
    tracing::trace!(periods, rate, payment, "loan payment");

    let mut schedule = Vec::with_capacity(periods as usize);
    let mut balance = inputs.loan_amount;
    let mut total_payment = 0.0;
    let mut total_interest = 0.0;
    for period in 1..=periods {
        let interest = balance * rate;
        let principal = if period == periods {
            balance
        } else {
            payment - interest
        };
        balance -= principal;
        if period == periods {
            balance = 0.0;
        }
        total_payment += principal + interest;
        total_interest += interest;
        schedule.push(AmortizationEntry {
            period,
            payment: principal + interest,
            principal,
            interest,
            balance,
        });
    }

    Ok(LoanResults {
        monthly_payment: ensure_finite("monthly payment", payment * f64::from(per_year) / 12.0)?,
        periodic_payment: payment,
        total_payment: ensure_finite("total payment", total_payment)?,
        total_interest: ensure_finite("total interest", total_interest)?,
        amortization_schedule: schedule,
    })
}

/// Registry adapter for [`calculate_loan`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LoanCalculator;

impl CoreCalculator for LoanCalculator {
    type Inputs = LoanInputs;
    type Results = LoanResults;

    fn name(&self) -> &'static str {
        "loan"
    }

    fn description(&self) -> &'static str {
        "Fixed-rate loan payment and amortization schedule"
    }

    fn calculate_core(&self, inputs: &LoanInputs) -> Result<LoanResults, CalcError> {
        calculate_loan(inputs)
    }
}
