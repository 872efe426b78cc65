//! CLI result presenters.

use std::time::Duration;

use serde_json::Value;

use calcof_core::Options;

use crate::output::{format_duration, format_primary, format_results};
use crate::ui;

/// Presents calculator results to the user.
pub trait ResultPresenter {
    /// Render a result to the text that would be printed.
    fn render(&self, calculator: &str, results: &Value, duration: Duration) -> String;

    /// Print a result to stdout.
    fn present_result(&self, calculator: &str, results: &Value, duration: Duration) {
        let text = self.render(calculator, results, duration);
        if text.ends_with('\n') {
            print!("{text}");
        } else {
            println!("{text}");
        }
    }

    /// Print an error to stderr.
    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}

/// Human-readable labelled output.
pub struct TextPresenter {
    options: Options,
    quiet: bool,
}

impl TextPresenter {
    #[must_use]
    pub fn new(options: Options, quiet: bool) -> Self {
        Self { options, quiet }
    }
}

impl ResultPresenter for TextPresenter {
    fn render(&self, calculator: &str, results: &Value, duration: Duration) -> String {
        if self.quiet {
            return format_primary(results, &self.options);
        }

        let mut out = ui::header(&calculator.to_uppercase());
        out.push('\n');
        out.push_str(&format_results(results, &self.options));
        if self.options.verbose {
            out.push_str(&format!("Duration: {}\n", format_duration(duration)));
        }
        out
    }
}

/// Machine-readable JSON output.
///
/// Quiet mode emits the record on one line; otherwise it is pretty-printed.
pub struct JsonPresenter {
    quiet: bool,
}

impl JsonPresenter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ResultPresenter for JsonPresenter {
    fn render(&self, _calculator: &str, results: &Value, _duration: Duration) -> String {
        let rendered = if self.quiet {
            serde_json::to_string(results)
        } else {
            serde_json::to_string_pretty(results)
        };
        rendered.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not serialize results");
            String::from("null")
        })
    }

    fn present_error(&self, error: &str) {
        eprintln!("{}", serde_json::json!({ "error": error }));
    }
}
