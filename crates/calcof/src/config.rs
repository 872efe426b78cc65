//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use calcof_core::options::{DEFAULT_CURRENCY, DEFAULT_PRECISION};
use calcof_core::Options;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Labelled, human-readable lines.
    #[default]
    Text,
    /// The results record as JSON.
    Json,
}

/// CalcOf: fraction, percentage, ROI, loan, retirement, BMI, calorie and
/// pet food calculators.
#[derive(Parser, Debug)]
#[command(name = "calcof", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Calculator to run (see --list).
    #[arg(required_unless_present_any = ["list", "completion"])]
    pub calculator: Option<String>,

    /// Input fields as FIELD=VALUE pairs, e.g. loanAmount=200000.
    #[arg(value_name = "FIELD=VALUE")]
    pub fields: Vec<String>,

    /// Read inputs as a JSON object from a file, or "-" for stdin.
    #[arg(short, long, value_name = "FILE", conflicts_with = "fields")]
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "CALCOF_FORMAT")]
    pub format: OutputFormat,

    /// Decimals shown for non-integer values.
    #[arg(long, default_value_t = DEFAULT_PRECISION, env = "CALCOF_PRECISION")]
    pub precision: usize,

    /// Currency symbol for money amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY, env = "CALCOF_CURRENCY")]
    pub currency: String,

    /// Show amortization schedules and yearly projections in full.
    #[arg(short, long)]
    pub details: bool,

    /// Quiet mode (only output the primary result).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the results record to a JSON file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// List the available calculators.
    #[arg(long)]
    pub list: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Display options derived from the flags.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            precision: self.precision,
            currency_symbol: self.currency.clone(),
            details: self.details,
            verbose: self.verbose,
        }
        .normalize()
    }

    /// Whether inputs come from stdin.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }
}
