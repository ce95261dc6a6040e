use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mb_calc::calculator::{Calculation, calculate_lines, copy_to_clipboard, last_clipboard_value};
use mb_calc::config::{Config, OutputFormat};

/// Evaluate arithmetic, one result per input line.
#[derive(Parser, Debug)]
#[command(name = "mb-calc", version, about)]
struct Cli {
    /// Expressions to evaluate; each one is a line.
    expressions: Vec<String>,

    /// Read lines from a file instead of stdin.
    #[arg(short, long, conflicts_with = "expressions")]
    file: Option<PathBuf>,

    /// Output format (defaults to the config file's, then text).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Copy the last result to the clipboard.
    #[arg(short, long)]
    copy: bool,

    /// Path to config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let eval_config = config.evaluation_config();
    debug!(?eval_config, "evaluation config ready");

    let input = read_input(&cli)?;
    let calculations = calculate_lines(&input, &eval_config);

    match cli.format.unwrap_or(config.format) {
        OutputFormat::Text => print_text(&calculations),
        OutputFormat::Json => print_json(&calculations)?,
    }

    if cli.copy {
        match last_clipboard_value(&calculations) {
            Some(text) => {
                copy_to_clipboard(text)?;
                info!(text, "copied result to clipboard");
            }
            None => info!("nothing to copy"),
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Input lines from the arguments, the given file, or stdin.
fn read_input(cli: &Cli) -> Result<Vec<String>> {
    if !cli.expressions.is_empty() {
        return Ok(cli.expressions.clone());
    }

    let text = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    Ok(text.lines().map(str::to_string).collect())
}

fn print_text(calculations: &[Calculation]) {
    for calc in calculations {
        println!("{}", calc.display);
    }
}

fn print_json(calculations: &[Calculation]) -> Result<()> {
    let json = serde_json::to_string_pretty(calculations)?;
    println!("{}", json);
    Ok(())
}
