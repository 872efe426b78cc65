//! Constants shared by the calculators.

/// Scale used when converting a decimal to a fraction (6 decimal digits).
pub const DECIMAL_SCALE: i64 = 1_000_000;

/// Kilograms per pound.
pub const KG_PER_LB: f64 = 0.453_592;

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Grams per ounce.
pub const GRAMS_PER_OZ: f64 = 28.349_5;

/// Conversion factor for BMI computed from pounds and inches.
pub const IMPERIAL_BMI_FACTOR: f64 = 703.0;

/// Lower bound of the healthy BMI range.
pub const HEALTHY_BMI_MIN: f64 = 18.5;

/// Upper bound of the healthy BMI range.
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Approximate energy stored in one kilogram of body fat (kcal).
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// Approximate energy stored in one pound of body fat (kcal).
pub const KCAL_PER_LB_FAT: f64 = 3500.0;

/// Daily calorie offset applied for a lose or gain goal.
pub const GOAL_CALORIE_OFFSET: f64 = 500.0;

/// Longest loan term accepted, in years.
pub const MAX_LOAN_TERM_YEARS: u32 = 100;

/// Longest savings horizon accepted, in years.
pub const MAX_PROJECTION_YEARS: u32 = 150;

/// Exit codes for the `calcof` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// A form field could not be parsed or failed validation.
    pub const ERROR_INPUT: i32 = 2;
    /// Arithmetic degeneracy (division by zero, overflow).
    pub const ERROR_ARITHMETIC: i32 = 3;
    /// Invalid configuration (unknown calculator, bad flags).
    pub const ERROR_CONFIG: i32 = 4;
}
