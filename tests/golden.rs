//! Golden file integration tests.
//!
//! Reads tests/testdata/calculators_golden.json and runs every case through
//! the registry, both as form fields and (where given) typed JSON inputs.

use calcof_core::{CalcError, CalculatorFactory, DefaultFactory, FormFields, CALCULATOR_NAMES};
use calcof_tests::{load_golden, match_subset, GoldenCase};
use serde_json::Value;

fn error_kind(err: &CalcError) -> &'static str {
    match err {
        CalcError::Parse(_) => "parse",
        CalcError::DivisionByZero(_) => "division_by_zero",
        CalcError::InvalidInput(_) => "invalid_input",
        CalcError::Overflow(_) => "overflow",
        CalcError::UnknownCalculator(_) => "unknown_calculator",
        CalcError::Serialization(_) => "serialization",
    }
}

fn run_case(factory: &DefaultFactory, case: &GoldenCase) -> Result<Value, CalcError> {
    let calc = factory.get(&case.calculator)?;
    match &case.inputs {
        Some(inputs) => calc.calculate_json(inputs),
        None => {
            let fields: FormFields = case
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                .collect();
            calc.calculate_fields(&fields)
        }
    }
}

#[test]
fn golden_cases() {
    let data = load_golden("calculators_golden.json");
    assert!(!data.description.is_empty());
    let factory = DefaultFactory::new();

    let mut failures = Vec::new();
    for (i, case) in data.cases.iter().enumerate() {
        let label = format!("case {i} ({})", case.calculator);
        match (run_case(&factory, case), &case.expected, &case.error) {
            (Ok(actual), Some(expected), None) => {
                if let Err(msg) = match_subset(expected, &actual, case.tolerance, "$") {
                    failures.push(format!("{label}: {msg}"));
                }
            }
            (Err(err), None, Some(kind)) => {
                if error_kind(&err) != kind {
                    failures.push(format!("{label}: expected {kind}, got {err}"));
                }
            }
            (Ok(actual), _, Some(kind)) => {
                failures.push(format!("{label}: expected {kind}, got {actual}"));
            }
            (Err(err), _, _) => failures.push(format!("{label}: unexpected error {err}")),
            (Ok(_), None, None) => failures.push(format!("{label}: no expectation")),
        }
    }
    assert!(failures.is_empty(), "golden failures:\n{}", failures.join("\n"));
}

#[test]
fn golden_covers_every_calculator() {
    let data = load_golden("calculators_golden.json");
    for name in CALCULATOR_NAMES {
        assert!(
            data.cases.iter().any(|c| c.calculator == name),
            "no golden case for {name}"
        );
    }
}

/// Field cases also work when submitted as typed JSON.
#[test]
fn golden_fields_match_json_inputs() {
    let data = load_golden("calculators_golden.json");
    let factory = DefaultFactory::new();
    for case in data.cases.iter().filter(|c| c.error.is_none() && c.inputs.is_none()) {
        let calc = factory.get(&case.calculator).unwrap();
        let from_fields = run_case(&factory, case).unwrap();

        // Numeric strings become numbers unless the field is a decimal literal.
        let typed: serde_json::Map<String, Value> = case
            .fields
            .iter()
            .map(|(k, v)| {
                let s = v.as_str().unwrap_or_default();
                let value = match (k.as_str(), s.parse::<i64>(), s.parse::<f64>()) {
                    ("decimal", _, _) => Value::from(s),
                    (_, Ok(i), _) => Value::from(i),
                    (_, _, Ok(f)) => Value::from(f),
                    _ => Value::from(s),
                };
                (k.clone(), value)
            })
            .collect();
        let from_json = calc.calculate_json(&Value::Object(typed)).unwrap();
        assert_eq!(from_fields, from_json, "{}", case.calculator);
    }
}

#[test]
fn match_subset_reports_path() {
    let expected = serde_json::json!({ "a": { "b": 1.0 } });
    let actual = serde_json::json!({ "a": { "b": 2.0, "c": 3 } });
    let err = match_subset(&expected, &actual, 1e-9, "$").unwrap_err();
    assert!(err.starts_with("$.a.b"));
    assert!(match_subset(&expected, &serde_json::json!({ "a": { "b": 1.0 } }), 1e-9, "$").is_ok());
}
