//! # calcof-core
//!
//! Core library for the CalcOf calculators: fractions, percentages,
//! ROI, loans, retirement savings, BMI, calories and pet food.
//!
//! Every calculator is a pure function from a typed inputs record to a
//! typed results record. Form input is parsed at an explicit boundary
//! (`FormFields`), and arithmetic degeneracies surface as `CalcError`
//! variants instead of `NaN` or infinity.

pub mod bmi;
pub mod calculator;
pub mod calorie;
pub mod constants;
pub mod fraction;
pub mod input;
pub mod loan;
pub mod options;
pub mod percentage;
pub mod pet_food;
pub mod registry;
pub mod retirement;
pub mod roi;
pub mod units;

// Re-exports
pub use bmi::{calculate_bmi, BmiCategory, BmiInputs, BmiResults};
pub use calculator::{CalcError, Calculator, CoreCalculator, FormCalculator};
pub use calorie::{calculate_calories, CalorieInputs, CalorieResults};
pub use constants::{exit_codes, DECIMAL_SCALE};
pub use fraction::{
    calculate_decimal_to_fraction, calculate_fraction, decimal_to_fraction, gcd,
    simplify_fraction, FractionPair,
};
pub use input::{FormFields, FromFields, ParseError};
pub use loan::{calculate_loan, LoanInputs, LoanResults};
pub use options::Options;
pub use percentage::{calculate_percentage, PercentageInputs, PercentageResults};
pub use pet_food::{calculate_pet_food, PetFoodInputs, PetFoodResults};
pub use registry::{CalculatorFactory, DefaultFactory, CALCULATOR_NAMES};
pub use retirement::{calculate_retirement, RetirementInputs, RetirementResults};
pub use roi::{calculate_roi, RoiInputs, RoiResults};
pub use units::Unit;

/// Evaluate a calculator by name from `KEY=VALUE` form pairs.
///
/// This is a convenience function for simple use cases. For repeated
/// evaluations, obtain the calculator once from a `DefaultFactory`.
///
/// # Example
/// ```
/// let out = calcof_core::evaluate("percentage", ["value1=25", "value2=100"]).unwrap();
/// assert_eq!(out["result"], 25.0);
/// ```
pub fn evaluate<I, S>(name: &str, pairs: I) -> Result<serde_json::Value, CalcError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields = FormFields::parse_pairs(pairs)?;
    DefaultFactory::new().get(name)?.calculate_fields(&fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_by_name() {
        let out = evaluate("bmi", ["weight=70", "height=170"]).unwrap();
        assert_eq!(out["category"], "Normal weight");
    }

    #[test]
    fn evaluate_unknown() {
        assert!(evaluate("nope", ["a=1"]).is_err());
    }
}
