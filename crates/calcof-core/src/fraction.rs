//! Fraction simplification, arithmetic, and decimal conversion.
//!
//! Simplification divides numerator and denominator by their greatest
//! common divisor, found by Euclidean recursion. A zero denominator is not
//! an error for simplification: it yields the sentinel `0/1`. Arithmetic
//! on fractions is done in 128-bit intermediates and always returns the
//! canonical form (lowest terms, positive denominator).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::constants::DECIMAL_SCALE;
use crate::input::{FormFields, FromFields, ParseError};

/// A numerator/denominator pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FractionPair {
    pub numerator: i64,
    pub denominator: i64,
}

impl FractionPair {
    /// Result of simplifying a fraction with a zero denominator.
    pub const SENTINEL: Self = Self::new(0, 1);

    #[must_use]
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Canonical form: lowest terms with a positive denominator.
    pub fn normalized(self) -> Result<Self, CalcError> {
        if self.denominator == 0 {
            return Err(CalcError::DivisionByZero("fraction denominator"));
        }
        reduce(i128::from(self.numerator), i128::from(self.denominator))
    }

    /// Floating-point value of the fraction.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_decimal(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Mixed-number form of the canonical fraction.
    pub fn to_mixed(self) -> Result<MixedNumber, CalcError> {
        let canon = self.normalized()?;
        let whole = canon.numerator / canon.denominator;
        let mut numerator = canon.numerator % canon.denominator;
        if whole != 0 {
            numerator = numerator.abs();
        }
        Ok(MixedNumber {
            whole,
            numerator,
            denominator: canon.denominator,
        })
    }

    /// `self + rhs`.
    pub fn checked_add(self, rhs: Self) -> Result<Self, CalcError> {
        let (a, b, c, d) = widen(self, rhs)?;
        let numerator = (a * d)
            .checked_add(c * b)
            .ok_or_else(|| overflow(self, '+', rhs))?;
        reduce(numerator, b * d)
    }

    /// `self - rhs`.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, CalcError> {
        let (a, b, c, d) = widen(self, rhs)?;
        let numerator = (a * d)
            .checked_sub(c * b)
            .ok_or_else(|| overflow(self, '-', rhs))?;
        reduce(numerator, b * d)
    }

    /// `self * rhs`.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, CalcError> {
        let (a, b, c, d) = widen(self, rhs)?;
        reduce(a * c, b * d)
    }

    /// `self / rhs`.
    pub fn checked_div(self, rhs: Self) -> Result<Self, CalcError> {
        let (a, b, c, d) = widen(self, rhs)?;
        if c == 0 {
            return Err(CalcError::DivisionByZero("division by a zero fraction"));
        }
        reduce(a * d, b * c)
    }
}

impl fmt::Display for FractionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A fraction written as a whole part plus a proper fraction.
///
/// The remainder carries the sign only when the whole part is zero,
/// so `-3/2` is `-1 1/2` and `-1/2` is `0 -1/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedNumber {
    pub whole: i64,
    pub numerator: i64,
    pub denominator: i64,
}

impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.whole, self.numerator) {
            (w, 0) => write!(f, "{w}"),
            (0, n) => write!(f, "{n}/{}", self.denominator),
            (w, n) => write!(f, "{w} {n}/{}", self.denominator),
        }
    }
}

/// Greatest common divisor of `|a|` and `|b|`.
///
/// `gcd(0, b) == |b|`, `gcd(a, 0) == |a|`, and `gcd(0, 0) == 0`.
#[must_use]
pub fn gcd(a: i64, b: i64) -> u64 {
    gcd_u64(a.unsigned_abs(), b.unsigned_abs())
}

fn gcd_u64(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd_u64(b, a % b)
    }
}

fn gcd_u128(a: u128, b: u128) -> u128 {
    if b == 0 {
        a
    } else {
        gcd_u128(b, a % b)
    }
}

/// Reduce `numerator/denominator` by their gcd.
///
/// The sign is left as integer division produces it, so `-2/-4` becomes
/// `-1/-2`. Use [`FractionPair::normalized`] for the canonical form.
/// A zero denominator yields [`FractionPair::SENTINEL`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn simplify_fraction(numerator: i64, denominator: i64) -> FractionPair {
    if denominator == 0 {
        return FractionPair::SENTINEL;
    }
    let g = i128::from(gcd(numerator, denominator));
    // Quotients never exceed the magnitude of their dividends, so they fit.
    FractionPair::new(
        (i128::from(numerator) / g) as i64,
        (i128::from(denominator) / g) as i64,
    )
}

/// Convert a decimal string to a fraction at six-digit precision.
///
/// The value is scaled by 10^6, rounded to the nearest integer and reduced.
/// Digits beyond the sixth are lost.
pub fn decimal_to_fraction(input: &str) -> Result<FractionPair, ParseError> {
    const FIELD: &str = "decimal";

    let text = input.trim();
    if text.is_empty() {
        return Err(ParseError::Empty(FIELD.to_string()));
    }
    let value: f64 = text.parse().map_err(|_| ParseError::Invalid {
        field: FIELD.to_string(),
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::Invalid {
            field: FIELD.to_string(),
            value: text.to_string(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let (scaled, limit) = (value * DECIMAL_SCALE as f64, i64::MAX as f64);
    let rounded = scaled.round();
    if rounded.abs() >= limit {
        return Err(ParseError::OutOfRange {
            field: FIELD.to_string(),
            value: text.to_string(),
        });
    }
    if (scaled - rounded).abs() > f64::EPSILON * scaled.abs().max(1.0) {
        tracing::warn!(input = text, "decimal exceeds six-digit precision, rounding");
    }

    #[allow(clippy::cast_possible_truncation)]
    let numerator = rounded as i64;
    Ok(simplify_fraction(numerator, DECIMAL_SCALE))
}

fn widen(lhs: FractionPair, rhs: FractionPair) -> Result<(i128, i128, i128, i128), CalcError> {
    if lhs.denominator == 0 || rhs.denominator == 0 {
        return Err(CalcError::DivisionByZero("fraction denominator"));
    }
    Ok((
        i128::from(lhs.numerator),
        i128::from(lhs.denominator),
        i128::from(rhs.numerator),
        i128::from(rhs.denominator),
    ))
}

fn reduce(numerator: i128, denominator: i128) -> Result<FractionPair, CalcError> {
    let g = gcd_u128(numerator.unsigned_abs(), denominator.unsigned_abs());
    let g = i128::try_from(g).map_err(|_| CalcError::Overflow("fraction gcd".into()))?;
    let (mut n, mut d) = (numerator / g, denominator / g);
    if d < 0 {
        n = n
            .checked_neg()
            .ok_or_else(|| CalcError::Overflow("fraction sign".into()))?;
        d = -d;
    }
    let narrow = |v: i128| {
        i64::try_from(v).map_err(|_| CalcError::Overflow(format!("{n}/{d} does not fit 64 bits")))
    };
    Ok(FractionPair::new(narrow(n)?, narrow(d)?))
}

fn overflow(lhs: FractionPair, op: char, rhs: FractionPair) -> CalcError {
    CalcError::Overflow(format!("{lhs} {op} {rhs}"))
}

/// Operation applied by the fraction calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionOp {
    #[default]
    Simplify,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl FractionOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Simplify => "=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }
}

/// Inputs of the fraction calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionInputs {
    pub numerator1: i64,
    pub denominator1: i64,
    #[serde(default)]
    pub operation: FractionOp,
    #[serde(default)]
    pub numerator2: Option<i64>,
    #[serde(default)]
    pub denominator2: Option<i64>,
}

impl FromFields for FractionInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            numerator1: fields.integer("numerator1")?,
            denominator1: fields.integer("denominator1")?,
            operation: fields.choice_or("operation", FractionOp::Simplify)?,
            numerator2: fields.optional_integer("numerator2")?,
            denominator2: fields.optional_integer("denominator2")?,
        })
    }
}

/// Results shared by the fraction and decimal calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionResults {
    pub fraction: FractionPair,
    pub decimal: f64,
    /// Absent when the canonical form does not fit 64 bits, e.g. `i64::MIN / -1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed: Option<MixedNumber>,
    pub expression: String,
}

impl FractionResults {
    fn describe(fraction: FractionPair, expression: String) -> Self {
        Self {
            fraction,
            decimal: fraction.to_decimal(),
            mixed: fraction.to_mixed().ok(),
            expression,
        }
    }
}

/// Simplify a fraction or combine two fractions.
pub fn calculate_fraction(inputs: &FractionInputs) -> Result<FractionResults, CalcError> {
    let lhs = FractionPair::new(inputs.numerator1, inputs.denominator1);
    let apply: fn(FractionPair, FractionPair) -> Result<FractionPair, CalcError> =
        match inputs.operation {
            FractionOp::Simplify => {
                let simplified = simplify_fraction(lhs.numerator, lhs.denominator);
                return Ok(FractionResults::describe(
                    simplified,
                    format!("{lhs} = {simplified}"),
                ));
            }
            FractionOp::Add => FractionPair::checked_add,
            FractionOp::Subtract => FractionPair::checked_sub,
            FractionOp::Multiply => FractionPair::checked_mul,
            FractionOp::Divide => FractionPair::checked_div,
        };

    let rhs = FractionPair::new(
        inputs
            .numerator2
            .ok_or_else(|| ParseError::Missing("numerator2".into()))?,
        inputs
            .denominator2
            .ok_or_else(|| ParseError::Missing("denominator2".into()))?,
    );
    let result = apply(lhs, rhs)?;
    tracing::trace!(%lhs, %rhs, %result, "fraction arithmetic");

    let expression = format!("{lhs} {} {rhs} = {result}", inputs.operation.symbol());
    Ok(FractionResults::describe(result, expression))
}

/// Inputs of the decimal-to-fraction calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalInputs {
    pub decimal: String,
}

impl FromFields for DecimalInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            decimal: fields.text("decimal")?.to_string(),
        })
    }
}

/// Convert a decimal to its reduced fraction.
pub fn calculate_decimal_to_fraction(inputs: &DecimalInputs) -> Result<FractionResults, CalcError> {
    let fraction = decimal_to_fraction(&inputs.decimal)?;
    Ok(FractionResults::describe(
        fraction,
        format!("{} = {fraction}", inputs.decimal.trim()),
    ))
}

/// Registry adapter for [`calculate_fraction`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FractionCalculator;

impl CoreCalculator for FractionCalculator {
    type Inputs = FractionInputs;
    type Results = FractionResults;

    fn name(&self) -> &'static str {
        "fraction"
    }

    fn description(&self) -> &'static str {
        "Simplify, add, subtract, multiply or divide fractions"
    }

    fn calculate_core(&self, inputs: &FractionInputs) -> Result<FractionResults, CalcError> {
        calculate_fraction(inputs)
    }
}

/// Registry adapter for [`calculate_decimal_to_fraction`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DecimalToFractionCalculator;

impl CoreCalculator for DecimalToFractionCalculator {
    type Inputs = DecimalInputs;
    type Results = FractionResults;

    fn name(&self) -> &'static str {
        "decimal-to-fraction"
    }

    fn description(&self) -> &'static str {
        "Convert a decimal to a fraction in lowest terms"
    }

    fn calculate_core(&self, inputs: &DecimalInputs) -> Result<FractionResults, CalcError> {
        calculate_decimal_to_fraction(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(8, 12), 4);
        assert_eq!(gcd(-8, 12), 4);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(-7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(i64::MIN, 0), 1 << 63);
    }

    #[test]
    fn simplify_reduces_to_lowest_terms() {
        assert_eq!(simplify_fraction(8, 12), FractionPair::new(2, 3));
        assert_eq!(simplify_fraction(0, 5), FractionPair::new(0, 1));
        assert_eq!(simplify_fraction(7, 1), FractionPair::new(7, 1));
    }

    #[test]
    fn simplify_zero_denominator_is_sentinel() {
        assert_eq!(simplify_fraction(5, 0), FractionPair::SENTINEL);
        assert_eq!(simplify_fraction(0, 0), FractionPair::new(0, 1));
    }

    #[test]
    fn simplify_keeps_sign_as_divided() {
        assert_eq!(simplify_fraction(-2, -4), FractionPair::new(-1, -2));
        assert_eq!(simplify_fraction(2, -4), FractionPair::new(1, -2));
    }

    #[test]
    fn simplify_extreme_values() {
        assert_eq!(
            simplify_fraction(i64::MIN, i64::MIN),
            FractionPair::new(-1, -1)
        );
        assert_eq!(simplify_fraction(0, i64::MIN), FractionPair::new(0, -1));
    }

    #[test]
    fn simplify_calculator_never_fails_at_extremes() {
        let r = calculate_fraction(&FractionInputs {
            numerator1: i64::MIN,
            denominator1: -1,
            operation: FractionOp::Simplify,
            numerator2: None,
            denominator2: None,
        })
        .unwrap();
        assert_eq!(r.fraction, FractionPair::new(i64::MIN, -1));
        assert!(r.mixed.is_none());
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("mixed").is_none());
    }

    #[test]
    fn normalized_moves_sign_to_numerator() {
        let f = FractionPair::new(-2, -4).normalized().unwrap();
        assert_eq!(f, FractionPair::new(1, 2));
        let f = FractionPair::new(3, -6).normalized().unwrap();
        assert_eq!(f, FractionPair::new(-1, 2));
        assert!(FractionPair::new(1, 0).normalized().is_err());
        assert!(FractionPair::new(i64::MIN, -1).normalized().is_err());
    }

    #[test]
    fn mixed_numbers() {
        let m = FractionPair::new(7, 2).to_mixed().unwrap();
        assert_eq!((m.whole, m.numerator, m.denominator), (3, 1, 2));
        assert_eq!(m.to_string(), "3 1/2");

        let m = FractionPair::new(-3, 2).to_mixed().unwrap();
        assert_eq!(m.to_string(), "-1 1/2");

        let m = FractionPair::new(1, -2).to_mixed().unwrap();
        assert_eq!(m.to_string(), "-1/2");

        let m = FractionPair::new(4, 2).to_mixed().unwrap();
        assert_eq!(m.to_string(), "2");
    }

    #[test]
    fn arithmetic() {
        let half = FractionPair::new(1, 2);
        let third = FractionPair::new(1, 3);
        assert_eq!(half.checked_add(third).unwrap(), FractionPair::new(5, 6));
        assert_eq!(half.checked_sub(third).unwrap(), FractionPair::new(1, 6));
        assert_eq!(third.checked_sub(half).unwrap(), FractionPair::new(-1, 6));
        assert_eq!(half.checked_mul(third).unwrap(), FractionPair::new(1, 6));
        assert_eq!(half.checked_div(third).unwrap(), FractionPair::new(3, 2));
        assert_eq!(
            half.checked_div(FractionPair::new(-1, 4)).unwrap(),
            FractionPair::new(-2, 1)
        );
    }

    #[test]
    fn arithmetic_division_by_zero() {
        let half = FractionPair::new(1, 2);
        assert!(matches!(
            half.checked_div(FractionPair::new(0, 5)),
            Err(CalcError::DivisionByZero(_))
        ));
        assert!(matches!(
            half.checked_add(FractionPair::new(1, 0)),
            Err(CalcError::DivisionByZero(_))
        ));
    }

    #[test]
    fn arithmetic_overflow_is_reported() {
        let big = FractionPair::new(i64::MAX, 1);
        assert!(matches!(big.checked_add(big), Err(CalcError::Overflow(_))));
        assert!(matches!(big.checked_mul(big), Err(CalcError::Overflow(_))));
    }

    #[test]
    fn decimal_conversion() {
        assert_eq!(decimal_to_fraction("0.75").unwrap(), FractionPair::new(3, 4));
        assert_eq!(decimal_to_fraction("0.5").unwrap(), FractionPair::new(1, 2));
        assert_eq!(decimal_to_fraction("2").unwrap(), FractionPair::new(2, 1));
        assert_eq!(decimal_to_fraction("-1.25").unwrap(), FractionPair::new(-5, 4));
        assert_eq!(decimal_to_fraction(" 0 ").unwrap(), FractionPair::new(0, 1));
    }

    #[test]
    fn decimal_conversion_is_limited_to_six_digits() {
        assert_eq!(
            decimal_to_fraction("0.3333333").unwrap(),
            FractionPair::new(333_333, 1_000_000)
        );
        assert_eq!(
            decimal_to_fraction("0.0000004").unwrap(),
            FractionPair::new(0, 1)
        );
    }

    #[test]
    fn decimal_conversion_rejects_garbage() {
        assert_eq!(
            decimal_to_fraction(""),
            Err(ParseError::Empty("decimal".into()))
        );
        assert!(matches!(
            decimal_to_fraction("abc"),
            Err(ParseError::Invalid { .. })
        ));
        assert!(matches!(
            decimal_to_fraction("inf"),
            Err(ParseError::Invalid { .. })
        ));
        assert!(matches!(
            decimal_to_fraction("1e20"),
            Err(ParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn fraction_calculator_simplify() {
        let inputs = FractionInputs {
            numerator1: 8,
            denominator1: 12,
            operation: FractionOp::Simplify,
            numerator2: None,
            denominator2: None,
        };
        let r = calculate_fraction(&inputs).unwrap();
        assert_eq!(r.fraction, FractionPair::new(2, 3));
        assert!((r.decimal - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(r.expression, "8/12 = 2/3");
    }

    #[test]
    fn fraction_calculator_requires_second_operand() {
        let fields = FormFields::new()
            .with("numerator1", "1")
            .with("denominator1", "2")
            .with("operation", "add");
        let inputs = FractionInputs::from_fields(&fields).unwrap();
        assert_eq!(
            calculate_fraction(&inputs),
            Err(CalcError::Parse(ParseError::Missing("numerator2".into())))
        );
    }

    #[test]
    fn fraction_calculator_add_from_fields() {
        let fields = FormFields::new()
            .with("numerator1", "1")
            .with("denominator1", "2")
            .with("operation", "add")
            .with("numerator2", "1")
            .with("denominator2", "3");
        let inputs = FractionInputs::from_fields(&fields).unwrap();
        let r = calculate_fraction(&inputs).unwrap();
        assert_eq!(r.fraction, FractionPair::new(5, 6));
        assert_eq!(r.expression, "1/2 + 1/3 = 5/6");
    }

    #[test]
    fn decimal_calculator() {
        let r = calculate_decimal_to_fraction(&DecimalInputs {
            decimal: "1.5".into(),
        })
        .unwrap();
        assert_eq!(r.fraction, FractionPair::new(3, 2));
        assert_eq!(r.mixed.unwrap().to_string(), "1 1/2");
    }
}
