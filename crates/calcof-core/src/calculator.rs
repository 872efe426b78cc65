//! Calculator traits and the `FormCalculator` decorator.
//!
//! `Calculator` is the object-safe trait consumed by the CLI and registry.
//! `CoreCalculator` is the typed trait implemented by each formula module.
//! `FormCalculator` is a decorator that adds form/JSON parsing, result
//! serialization and tracing around a `CoreCalculator`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::input::{FormFields, FromFields, ParseError};

/// Error type for calculations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// A form field could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A formula would divide by zero.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Inputs parsed but are outside the domain of the formula.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A result is not representable.
    #[error("overflow: {0}")]
    Overflow(String),

    /// No calculator is registered under the requested name.
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    /// JSON inputs or results could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CalcError {
    /// Whether the error stems from the submitted inputs rather than the formula.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::InvalidInput(_) | Self::Serialization(_)
        )
    }
}

/// Object-safe calculator interface, consumed by the registry and the CLI.
pub trait Calculator: Send + Sync {
    /// Registry name, e.g. `"loan"`.
    fn name(&self) -> &str;

    /// One-line description for listings.
    fn description(&self) -> &str;

    /// Evaluate from submitted form fields.
    fn calculate_fields(&self, fields: &FormFields) -> Result<Value, CalcError>;

    /// Evaluate from a JSON inputs record.
    fn calculate_json(&self, inputs: &Value) -> Result<Value, CalcError>;
}

/// Typed calculator implemented by each formula module.
pub trait CoreCalculator: Send + Sync {
    /// Inputs record.
    type Inputs: FromFields + DeserializeOwned;
    /// Results record.
    type Results: Serialize;

    /// Registry name.
    fn name(&self) -> &'static str;

    /// One-line description.
    fn description(&self) -> &'static str;

    /// Run the formula.
    fn calculate_core(&self, inputs: &Self::Inputs) -> Result<Self::Results, CalcError>;
}

/// Decorator that exposes a `CoreCalculator` through `Calculator`.
pub struct FormCalculator<C> {
    inner: C,
}

impl<C: CoreCalculator> FormCalculator<C> {
    /// Wrap a core calculator.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    fn run(&self, inputs: &C::Inputs) -> Result<Value, CalcError> {
        let span = tracing::debug_span!("calculate", calculator = self.inner.name());
        let _guard = span.enter();

        let results = self.inner.calculate_core(inputs).map_err(|e| {
            tracing::debug!(error = %e, "calculation failed");
            e
        })?;
        tracing::debug!("calculation complete");
        serde_json::to_value(results).map_err(|e| CalcError::Serialization(e.to_string()))
    }
}

impl<C: CoreCalculator> Calculator for FormCalculator<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn calculate_fields(&self, fields: &FormFields) -> Result<Value, CalcError> {
        let inputs = C::Inputs::from_fields(fields)?;
        self.run(&inputs)
    }

    fn calculate_json(&self, inputs: &Value) -> Result<Value, CalcError> {
        let inputs: C::Inputs = serde_json::from_value(inputs.clone())
            .map_err(|e| CalcError::Serialization(e.to_string()))?;
        self.run(&inputs)
    }
}
