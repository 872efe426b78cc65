//! Error handling and exit codes.

use std::path::PathBuf;

use calcof_core::constants::exit_codes;
use calcof_core::{CalcError, ParseError};

/// Errors raised by the application layer itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No calculator name was given.
    #[error("no calculator given (use --list to see the available ones)")]
    MissingCalculator,

    /// The `--input` file could not be read.
    #[error("cannot read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `--input` document is not valid JSON.
    #[error("input is not valid JSON: {0}")]
    InputJson(#[from] serde_json::Error),

    /// The results file could not be written.
    #[error("cannot write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Map a calculation error to its exit code.
#[must_use]
pub fn handle_error(err: &CalcError) -> i32 {
    match err {
        CalcError::Parse(_) | CalcError::InvalidInput(_) | CalcError::Serialization(_) => {
            exit_codes::ERROR_INPUT
        }
        CalcError::DivisionByZero(_) | CalcError::Overflow(_) => exit_codes::ERROR_ARITHMETIC,
        CalcError::UnknownCalculator(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Map any application error to its exit code by inspecting the cause chain.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<CalcError>() {
            return handle_error(e);
        }
        if cause.is::<ParseError>() {
            return exit_codes::ERROR_INPUT;
        }
        if let Some(e) = cause.downcast_ref::<AppError>() {
            return match e {
                AppError::MissingCalculator => exit_codes::ERROR_CONFIG,
                AppError::ReadInput { .. } | AppError::InputJson(_) => exit_codes::ERROR_INPUT,
                AppError::WriteOutput { .. } => exit_codes::ERROR_GENERIC,
            };
        }
    }
    exit_codes::ERROR_GENERIC
}
