use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use markwright_config::Config;
use markwright_engine::{OutputFormat, Settings, convert};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

/// Convert CommonMark to HTML or a syntax tree dump.
///
/// Flags left unset fall back to the config file.
#[derive(Debug, Parser)]
#[command(name = "markwright")]
#[command(version)]
struct Args {
    /// Output format: html or tree
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Record source positions on block elements
    #[arg(long = "sourcepos")]
    source_positions: bool,

    /// Config file (default ~/.config/markwright/config.toml)
    #[arg(short, long = "config")]
    config_path: Option<PathBuf>,

    /// Input files, concatenated in order; `-` or none reads stdin
    inputs: Vec<PathBuf>,
}

impl Args {
    /// Merges the config file with the flags; flags win.
    fn settings(&self, config: Config) -> Settings {
        let mut settings = config.into_settings();
        if let Some(format) = self.format {
            settings = settings.with_output_format(format);
        }
        if self.source_positions {
            settings = settings.with_source_positions(true);
        }
        settings
    }
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config_path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            Config::load_from_path(&path)?
                .with_context(|| format!("config file '{}' not found", path.display()))
        }
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

/// Reads every input in order into one document; stdin when there are none.
fn read_input(inputs: &[PathBuf]) -> Result<String> {
    let mut text = String::new();
    if inputs.is_empty() {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(text);
    }
    for input in inputs {
        if input.as_os_str() == "-" {
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
        } else {
            let content = fs::read_to_string(input)
                .with_context(|| format!("Failed to read '{}'", input.display()))?;
            text.push_str(&content);
        }
    }
    Ok(text)
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let settings = args.settings(config);
    debug!("converting with {settings:?}");

    let input = read_input(&args.inputs)?;
    info!("read {} bytes from {} input(s)", input.len(), args.inputs.len().max(1));

    let stdout = io::stdout();
    convert(input.as_bytes(), stdout.lock(), &settings)?;
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
