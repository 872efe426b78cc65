//! Shared helpers for the workspace-level golden tests.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

/// A golden file: a list of calculator cases.
#[derive(Debug, Deserialize)]
pub struct GoldenData {
    pub description: String,
    pub cases: Vec<GoldenCase>,
}

/// One calculator invocation and its expected outcome.
#[derive(Debug, Deserialize)]
pub struct GoldenCase {
    pub calculator: String,
    /// Form fields as submitted, all strings.
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Typed JSON inputs, used instead of `fields` when present.
    #[serde(default)]
    pub inputs: Option<Value>,
    /// Subset of the results record that must match.
    #[serde(default)]
    pub expected: Option<Value>,
    /// Error kind expected instead of a result.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1e-6
}

/// Load a golden file relative to `tests/testdata/`.
pub fn load_golden(name: &str) -> GoldenData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

/// Check that every key in `expected` matches `actual`, numbers within `tol`.
///
/// Returns the path of the first mismatch.
pub fn match_subset(expected: &Value, actual: &Value, tol: f64, path: &str) -> Result<(), String> {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, value) in exp {
                let child = format!("{path}.{key}");
                let other = act.get(key).ok_or_else(|| format!("{child}: missing"))?;
                match_subset(value, other, tol, &child)?;
            }
            Ok(())
        }
        (Value::Array(exp), Value::Array(act)) if exp.len() == act.len() => exp
            .iter()
            .zip(act)
            .enumerate()
            .try_for_each(|(i, (e, a))| match_subset(e, a, tol, &format!("{path}[{i}]"))),
        (Value::Number(e), Value::Number(a)) => {
            let (e, a) = (e.as_f64().unwrap_or(f64::NAN), a.as_f64().unwrap_or(f64::NAN));
            if (e - a).abs() <= tol * e.abs().max(1.0) {
                Ok(())
            } else {
                Err(format!("{path}: expected {e}, got {a}"))
            }
        }
        _ if expected == actual => Ok(()),
        _ => Err(format!("{path}: expected {expected}, got {actual}")),
    }
}
