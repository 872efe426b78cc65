//! Form input boundary.
//!
//! Calculators receive their inputs as string fields, the way a web form
//! submits them. `FormFields` turns those strings into typed values and
//! separates "cannot parse" from a valid zero: a blank or non-numeric
//! field is a `ParseError`, never a silent `0`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::calculator::CalcError;

/// Error raised while parsing form fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A required field was not supplied.
    #[error("missing field `{0}`")]
    Missing(String),

    /// A field was supplied but blank.
    #[error("field `{0}` is empty")]
    Empty(String),

    /// A field could not be parsed as a number.
    #[error("field `{field}`: `{value}` is not a valid number")]
    Invalid { field: String, value: String },

    /// A field parsed but lies outside the representable range.
    #[error("field `{field}`: `{value}` is out of range")]
    OutOfRange { field: String, value: String },

    /// A choice field named an option that does not exist.
    #[error("field `{field}`: unknown option `{value}`")]
    UnknownChoice { field: String, value: String },

    /// A raw pair was not of the form `KEY=VALUE`.
    #[error("malformed field `{0}`, expected KEY=VALUE")]
    Malformed(String),
}

/// Types that can be built from submitted form fields.
pub trait FromFields: Sized {
    /// Parse `Self` from the given fields.
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError>;
}

/// String key/value pairs as submitted by a form.
///
/// Lookups ignore ASCII case, `_` and `-`, so `loan_amount`,
/// `loan-amount` and `loanAmount` name the same field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: BTreeMap<String, String>,
}

impl FormFields {
    /// Create an empty set of fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `KEY=VALUE` pairs, later pairs overriding earlier ones.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ParseError::Malformed(pair.to_string()))?;
            if key.trim().is_empty() {
                return Err(ParseError::Malformed(pair.to_string()));
            }
            fields.insert(key, value);
        }
        Ok(fields)
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value of a field, if present.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    /// Whether a field is present and non-blank.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.raw(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Trimmed, non-blank text of a required field.
    pub fn text(&self, key: &str) -> Result<&str, ParseError> {
        let value = self
            .raw(key)
            .ok_or_else(|| ParseError::Missing(key.to_string()))?
            .trim();
        if value.is_empty() {
            return Err(ParseError::Empty(key.to_string()));
        }
        Ok(value)
    }

    /// A required finite number.
    pub fn number(&self, key: &str) -> Result<f64, ParseError> {
        let text = self.text(key)?;
        let value: f64 = text.parse().map_err(|_| invalid(key, text))?;
        if !value.is_finite() {
            return Err(invalid(key, text));
        }
        Ok(value)
    }

    /// An optional finite number; blank or absent yields `default`.
    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, ParseError> {
        if self.has(key) {
            self.number(key)
        } else {
            Ok(default)
        }
    }

    /// A required integer of type `T`.
    pub fn integer<T>(&self, key: &str) -> Result<T, ParseError>
    where
        T: FromStr,
    {
        let text = self.text(key)?;
        text.parse::<T>().map_err(|_| {
            // A well-formed integer that does not fit `T` is a range problem.
            if text.trim_start_matches(&['-', '+'][..]).chars().all(|c| c.is_ascii_digit()) {
                ParseError::OutOfRange {
                    field: key.to_string(),
                    value: text.to_string(),
                }
            } else {
                invalid(key, text)
            }
        })
    }

    /// An optional integer; blank or absent yields `None`.
    pub fn optional_integer<T>(&self, key: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
    {
        if self.has(key) {
            self.integer(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A required choice, deserialized from its serde name.
    pub fn choice<T>(&self, key: &str) -> Result<T, ParseError>
    where
        T: DeserializeOwned,
    {
        let text = self.text(key)?;
        deserialize_choice(text)
            .or_else(|| deserialize_choice(&text.to_ascii_lowercase()))
            .ok_or_else(|| ParseError::UnknownChoice {
                field: key.to_string(),
                value: text.to_string(),
            })
    }

    /// An optional choice; blank or absent yields `default`.
    pub fn choice_or<T>(&self, key: &str, default: T) -> Result<T, ParseError>
    where
        T: DeserializeOwned,
    {
        if self.has(key) {
            self.choice(key)
        } else {
            Ok(default)
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key.as_ref(), value);
        }
        fields
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn invalid(key: &str, value: &str) -> ParseError {
    ParseError::Invalid {
        field: key.to_string(),
        value: value.to_string(),
    }
}

fn deserialize_choice<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(text.to_string())).ok()
}

/// Require `value > 0`.
pub fn ensure_positive(name: &str, value: f64) -> Result<f64, CalcError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Require `value >= 0`.
pub fn ensure_non_negative(name: &str, value: f64) -> Result<f64, CalcError> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidInput(format!(
            "{name} must not be negative, got {value}"
        )))
    }
}

/// Require a finite value, reporting the operation that produced it.
pub fn ensure_finite<T: Display>(what: T, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow(what.to_string()))
    }
}

/// Divide, failing on a zero divisor.
pub fn checked_div(what: &'static str, numerator: f64, denominator: f64) -> Result<f64, CalcError> {
    if denominator == 0.0 {
        return Err(CalcError::DivisionByZero(what));
    }
    Ok(numerator / denominator)
}
