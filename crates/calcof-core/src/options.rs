//! Display options passed explicitly to presenters.

/// Default number of decimals shown for amounts.
pub const DEFAULT_PRECISION: usize = 2;

/// Largest precision accepted by `normalize`.
pub const MAX_PRECISION: usize = 10;

/// Default currency symbol.
pub const DEFAULT_CURRENCY: &str = "$";

/// Options controlling how results are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Decimals shown for non-integer values.
    pub precision: usize,
    /// Symbol prefixed to currency amounts.
    pub currency_symbol: String,
    /// Print schedules and projections in full.
    pub details: bool,
    /// Show extra diagnostic output.
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            details: false,
            verbose: false,
        }
    }
}

impl Options {
    /// Clamp precision and fill in a blank currency symbol.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.precision > MAX_PRECISION {
            self.precision = MAX_PRECISION;
        }
        if self.currency_symbol.trim().is_empty() {
            self.currency_symbol = DEFAULT_CURRENCY.to_string();
        }
        self
    }
}
