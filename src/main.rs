mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use calboard_core::config::CalboardConfig;
use calboard_core::instant::lookup_timezone;
use calboard_core::AgendaConfig;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(name = "calboard")]
#[command(about = "Show the upcoming events of a calendar export, grouped by day")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of ~/.config/calboard/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print upcoming events from an .ics file (or stdin)
    Agenda {
        /// Calendar file to read; omit or use "-" for stdin
        file: Option<PathBuf>,

        /// Print the day groups as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Timezone for floating times and day headings (e.g. "America/New_York")
        #[arg(long)]
        timezone: Option<String>,

        /// Number of days ahead to include
        #[arg(long)]
        days: Option<i64>,

        /// Maximum number of events to show
        #[arg(long)]
        max: Option<usize>,

        /// Reference time instead of now (RFC 3339, e.g. "2024-07-01T12:00:00Z")
        #[arg(long)]
        now: Option<String>,
    },
    /// Show the config path and effective settings
    Config {
        /// Write a commented default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => CalboardConfig::config_path()?,
    };

    match cli.command {
        Commands::Agenda {
            file,
            json,
            timezone,
            days,
            max,
            now,
        } => {
            let config = CalboardConfig::load_from(&config_path)?;
            let agenda_config = apply_overrides(config.agenda_config()?, timezone, days, max)?;
            let now = parse_now(now.as_deref())?;
            commands::agenda::run(file.as_deref(), &agenda_config, now, json)
        }
        Commands::Config { init } => commands::config::run(&config_path, init),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();

    // A second logger can't be installed; nothing to do if that happens.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Command-line flags win over the config file.
fn apply_overrides(
    mut config: AgendaConfig,
    timezone: Option<String>,
    days: Option<i64>,
    max: Option<usize>,
) -> Result<AgendaConfig> {
    if let Some(name) = timezone {
        config.timezone =
            lookup_timezone(&name).with_context(|| format!("Unknown timezone '{}'", name))?;
    }
    if let Some(days) = days {
        if days <= 0 {
            anyhow::bail!("--days must be positive, got {}", days);
        }
        config.window_days = days;
    }
    if let Some(max) = max {
        config.max_events = max;
    }
    Ok(config)
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now '{}'. Expected RFC 3339", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
