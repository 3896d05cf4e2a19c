pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sellery_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "sellery",
    about = "Conversational marketplace client",
    long_about = "Talk to a marketplace server in plain English: create sellers, add products, \
                  update stock levels, and pull low-stock reports from an interactive chat session.",
    after_help = "Examples:\n  sellery chat\n  sellery health --json\n  sellery history --limit 5\n  sellery config"
)]
pub struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    #[arg(long, global = true, value_name = "PATH", help = "Config file (default: sellery.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "URL", help = "Marketplace server base URL")]
    base_url: Option<String>,
    #[arg(long, global = true, value_name = "PATH", help = "Session file for conversation state")]
    session_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        help = "Log level (trace|debug|info|warn|error)"
    )]
    log_level: Option<String>,
    #[arg(long, global = true, value_name = "FORMAT", help = "Log format (compact|pretty|json)")]
    log_format: Option<LogFormat>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive chat session against the marketplace")]
    Chat,
    #[command(about = "Check whether the marketplace server is up")]
    Health {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show the operations recorded in the saved session")]
    History {
        #[arg(long, value_name = "N", help = "Only show the most recent N entries")]
        limit: Option<usize>,
        #[arg(long, help = "Emit the raw history entries as JSON")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli.globals.config.clone();
    let overrides = ConfigOverrides {
        base_url: cli.globals.base_url.clone(),
        timeout_secs: None,
        session_file: cli.globals.session_file.clone(),
        log_level: cli.globals.log_level.clone(),
        log_format: cli.globals.log_format,
    };

    // An explicitly passed --config that does not exist is an error; the
    // default locations are optional.
    let config = match AppConfig::load(LoadOptions {
        config_path: config_path.clone(),
        require_file: config_path.is_some(),
        overrides: overrides.clone(),
    }) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::from(2);
        }
    };

    init_logging(&config);

    let result = match cli.command {
        Command::Chat => commands::chat::run(&config),
        Command::Health { json } => commands::health::run(&config, json),
        Command::History { limit, json } => commands::history::run(&config, limit, json),
        Command::Config => commands::CommandResult {
            exit_code: 0,
            output: commands::config::run(&config, config_path.as_deref(), &overrides),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so chat output on stdout stays clean.
fn init_logging(config: &AppConfig) {
    use sellery_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}
