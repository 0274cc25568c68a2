//! # epicast-cli
//!
//! Command-line interface for epidemic case forecasting.
//!
//! Takes a comma-separated case history, forecasts the next steps,
//! classifies outbreak risk, and (unless `--offline`) asks the narrator
//! backend for a recommendation and explanation.

use clap::Parser;
use epicast_core::prelude::*;
use epicast_core::report;
use epicast_narrate::{GeminiConfig, GeminiNarrator, DEFAULT_MODEL};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "epicast")]
#[command(about = "Epidemic case forecasting and risk reporting", long_about = None)]
struct Cli {
    /// Comma-separated case counts, oldest first (at least 5 values)
    #[arg(short, long)]
    cases: Option<String>,

    /// Number of future steps to forecast
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: usize,

    /// Narrator API key (falls back to the GEMINI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Narrator model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Skip narration and print the numeric assessment only
    #[arg(long)]
    offline: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let raw = match cli.cases.clone() {
        Some(cases) => cases,
        None => match prompt_for_cases() {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let series = match CaseSeries::parse_list(&raw) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = PipelineConfig {
        horizon: cli.horizon,
        ..Default::default()
    };

    let assessment = match pipeline::assess(&series, &config) {
        Ok(assessment) => assessment,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    print_assessment(&assessment);

    if cli.offline {
        return ExitCode::SUCCESS;
    }

    let api_key = match cli.api_key.or_else(|| std::env::var("GEMINI_API_KEY").ok()) {
        Some(key) if !key.is_empty() => key,
        _ => {
            eprintln!("error: no narrator API key (use --api-key or GEMINI_API_KEY)");
            return ExitCode::FAILURE;
        }
    };

    let mut gemini_config = GeminiConfig::new(api_key);
    gemini_config.model = cli.model;
    let narrator = GeminiNarrator::new(gemini_config);

    // The assessment above is already printed: a narration failure only
    // costs the free-text sections, never the numbers.
    match report::assemble(
        &series,
        assessment.forecast,
        assessment.risk,
        assessment.trend,
        &narrator,
    ) {
        Ok(report) => {
            print_narration(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn prompt_for_cases() -> io::Result<String> {
    print!("Enter epidemic case numbers (comma-separated, at least 5 values): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn print_assessment(assessment: &Assessment) {
    let predicted = assessment
        .forecast
        .rounded()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    println!("Epidemic Spread Forecast");
    println!("{}", "-".repeat(60));
    println!(
        "Next {} predicted cases : [{}]",
        assessment.forecast.len(),
        predicted
    );
    println!("Trend                   : {}", assessment.trend);
    println!("Risk level              : {}", assessment.risk);
}

fn print_narration(report: &Report) {
    println!();
    println!("Recommended interventions:");
    println!("{}", report.recommendation);
    println!();
    println!("Explanation:");
    println!("{}", report.explanation);
}
