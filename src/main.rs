use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finbot::{app, ApiClient, Config, Router};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "finbot")]
#[command(version)]
#[command(about = "Floating AI financial assistant for your terminal", long_about = None)]
struct Cli {
    /// Config file (default: ~/.finbot/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer one message and print the reply
    Ask {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Print the effective configuration with keys masked
    Config,
}

fn env_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// The terminal UI owns stdout, so its logs go to ~/.finbot/finbot.log
fn init_file_logging(verbose: u8) -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    fs::create_dir_all(&dir).context("Failed to create .finbot directory")?;
    let path = dir.join("finbot.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    fmt::Subscriber::builder()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

fn init_stderr_logging(verbose: u8) {
    fmt::Subscriber::builder()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let log_path = init_file_logging(cli.verbose)?;
            tracing::debug!(log = %log_path.display(), "logging to file");
            let config = Config::load(cli.config.as_deref())?;
            tracing::debug!(?config, "configuration loaded");
            app::run(config).await
        }
        Some(Commands::Ask { message }) => {
            init_stderr_logging(cli.verbose);
            let config = Config::load(cli.config.as_deref())?;
            let client = ApiClient::new(&config)?;
            let router = Router::standard(&client);

            let message = message.join(" ");
            let message = message.trim();
            if message.is_empty() {
                anyhow::bail!("Nothing to ask");
            }
            println!("{}", router.route(message).await);
            Ok(())
        }
        Some(Commands::Config) => {
            init_stderr_logging(cli.verbose);
            let config = Config::load(cli.config.as_deref())?;
            print!("{}", config.to_redacted_toml()?);
            Ok(())
        }
    }
}
