//! Application entry point and dispatch.

use std::io::Read;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::Value;

use calcof_cli::output::write_to_file;
use calcof_cli::presenter::{JsonPresenter, ResultPresenter, TextPresenter};
use calcof_cli::ui;
use calcof_core::options::MAX_PRECISION;
use calcof_core::{CalculatorFactory, DefaultFactory, FormFields};

use crate::config::{AppConfig, OutputFormat};
use crate::errors::AppError;
use crate::version::full_version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        calcof_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let factory = DefaultFactory::new();

    if config.list {
        print!("{}", render_list(&factory, config.quiet)?);
        return Ok(());
    }

    run_calculator(config, &factory)
}

fn run_calculator(config: &AppConfig, factory: &DefaultFactory) -> Result<()> {
    let name = config
        .calculator
        .as_deref()
        .ok_or(AppError::MissingCalculator)?;
    let calculator = factory.get(name)?;
    if config.precision > MAX_PRECISION {
        ui::print_warning(&format!(
            "precision {} exceeds {MAX_PRECISION}, using {MAX_PRECISION}",
            config.precision
        ));
    }

    let start = Instant::now();
    let results = match &config.input {
        Some(path) => {
            let inputs = read_input(config, path)?;
            calculator.calculate_json(&inputs)?
        }
        None => {
            let fields = FormFields::parse_pairs(&config.fields)?;
            tracing::debug!(calculator = name, fields = fields.len(), "parsed form fields");
            calculator.calculate_fields(&fields)?
        }
    };
    let duration = start.elapsed();

    let presenter = presenter_for(config);
    presenter.present_result(calculator.name(), &results, duration);

    if let Some(path) = &config.output {
        write_to_file(path, &results).map_err(|source| AppError::WriteOutput {
            path: path.clone(),
            source,
        })?;
        if config.verbose {
            eprintln!("Results written to {}", path.display());
        }
    }

    Ok(())
}

fn presenter_for(config: &AppConfig) -> Box<dyn ResultPresenter> {
    match config.format {
        OutputFormat::Text => Box::new(TextPresenter::new(config.options(), config.quiet)),
        OutputFormat::Json => Box::new(JsonPresenter::new(config.quiet)),
    }
}

/// Read the JSON inputs document from a file or stdin.
fn read_input(config: &AppConfig, path: &std::path::Path) -> Result<Value> {
    let text = if config.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| AppError::ReadInput {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| AppError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?
    };
    let value = serde_json::from_str(&text).map_err(AppError::from)?;
    Ok(value)
}

/// One line per calculator: name and description.
pub fn render_list(factory: &DefaultFactory, quiet: bool) -> Result<String> {
    let mut out = String::new();
    if !quiet {
        out.push_str(&ui::header(&full_version()));
        out.push('\n');
    }
    for name in factory.available() {
        let calc = factory
            .get(name)
            .with_context(|| format!("calculator {name} is listed but not registered"))?;
        if quiet {
            out.push_str(name);
            out.push('\n');
        } else {
            out.push_str(&format!("  {name:<20} {}\n", calc.description()));
        }
    }
    Ok(out)
}

/// Print an error the way the selected format expects.
pub fn report_error(config: &AppConfig, err: &anyhow::Error) {
    let message = format!("{err:#}");
    presenter_for(config).present_error(&message);
}
