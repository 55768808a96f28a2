//! # CLI Layer
//!
//! The CLI layer is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Decides exit status
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, in `setup.rs`
//! 2. **Context Setup**: logging, then config (file, env, `-o`, flags)
//! 3. **Dispatch**: one handler per subcommand
//! 4. **Output Formatting**: `render.rs`
//! 5. **Error Handling**: any failed parse turns into an error, which `main`
//!    reports and maps to exit code 1

use super::render::{self, MaskReport, ParseOutcome};
use super::setup::{Cli, Commands};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser as _;
use nvattr::config::{config_file_path, NvattrConfig, OutputFormat};
use nvattr::{Catalog, DisplayDeviceMask, ParseMode, ParseStatus, Parser};
use std::io::Write;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NVATTR_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(&cli)?;
    let format = config.format();

    let output = match &cli.command {
        Commands::Query { attributes } => {
            return parse_strings(attributes, ParseMode::Query, &config);
        }
        Commands::Assign { attributes } => {
            return parse_strings(attributes, ParseMode::Assignment, &config);
        }
        Commands::List { all } => {
            let catalog = Catalog::builtin();
            if *all {
                render::catalog(catalog.iter(), format)?
            } else {
                render::catalog(catalog.query_all(), format)?
            }
        }
        Commands::Mask { devices, from_mask } => {
            let mask = match (devices, from_mask) {
                (Some(devices), _) => devices
                    .parse::<DisplayDeviceMask>()
                    .with_context(|| format!("invalid display device list '{}'", devices))?,
                (None, Some(hex)) => parse_hex_mask(hex)?,
                (None, None) => bail!("either a device list or --from-mask is required"),
            };
            render::mask(&MaskReport::new(mask), format)?
        }
        Commands::Status { code } => {
            let statuses = match code {
                Some(code) => vec![ParseStatus::from_code(*code)
                    .ok_or_else(|| anyhow!("unknown status code {}", code))?],
                None => ParseStatus::ALL.to_vec(),
            };
            render::statuses(&statuses, format)?
        }
    };
    print(&output)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// File and environment first, then `-o` lists in order, then explicit flags.
fn load_config(cli: &Cli) -> Result<NvattrConfig> {
    let mut config = match &cli.config {
        Some(path) => NvattrConfig::load_from(Some(path.as_path()))
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => NvattrConfig::load().with_context(|| {
            format!("failed to load config from {:?}", config_file_path())
        })?,
    };
    for list in &cli.options {
        config
            .apply_overrides(list)
            .with_context(|| format!("invalid option list '{}'", list))?;
    }
    if let Some(display) = &cli.display {
        config.display = Some(display.clone());
    }
    if let Some(format) = cli.format {
        config.format = Some(OutputFormat::from(format));
    }
    Ok(config)
}

fn parse_strings(inputs: &[String], mode: ParseMode, config: &NvattrConfig) -> Result<()> {
    let parser = Parser::default();
    let results: Vec<_> = inputs
        .iter()
        .map(|input| {
            let mut result = parser.parse(input, mode);
            if let (Ok(record), Some(display)) = (&mut result, &config.display) {
                record.assign_default_display(display);
            }
            result
        })
        .collect();

    let outcomes: Vec<ParseOutcome<'_>> = inputs
        .iter()
        .zip(&results)
        .map(|(input, result)| ParseOutcome::new(input, result))
        .collect();
    print(&render::outcomes(&outcomes, config.format())?)?;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        bail!("{} of {} attribute strings failed to parse", failed, outcomes.len());
    }
    Ok(())
}

fn parse_hex_mask(s: &str) -> Result<DisplayDeviceMask> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bits = u32::from_str_radix(digits, 16).with_context(|| format!("invalid hex mask '{}'", s))?;
    Ok(DisplayDeviceMask(bits))
}

fn print(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
