use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ssu_herald::config::ConfigStore;
use ssu_herald::storage::{HistoryStore, StoragePaths};

#[derive(Parser)]
#[command(name = "ssu-herald")]
#[command(about = "Discord server-status announcement bot with countdown polls")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.json")]
    config: String,

    /// Data directory path
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve commands
    Run,

    /// Print logged startups for a day
    History {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Load and validate the configuration, then print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting ssu-herald v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run => {
            let config = ConfigStore::load_or_init(&cli.config)?;
            let history = HistoryStore::new(StoragePaths::new(PathBuf::from(&cli.data_dir)));
            ssu_herald::bot::run(config, history).await?;
        }
        Commands::History { date } => {
            let date = match date {
                Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|_| anyhow::anyhow!("Invalid --date (expected YYYY-MM-DD): {}", s))?,
                None => chrono::Utc::now().date_naive(),
            };
            let history = HistoryStore::new(StoragePaths::new(PathBuf::from(&cli.data_dir)));
            let records = history.read_day(date).await?;

            if records.is_empty() {
                println!("No startups logged on {}.", date);
            } else {
                println!("=== Startups on {} ({}) ===\n", date, records.len());
                for r in &records {
                    println!(
                        "  {}  {} — hosted by {} ({})",
                        r.timestamp.format("%H:%M:%S"),
                        r.server_name,
                        r.host,
                        r.description
                    );
                }
            }
        }
        Commands::CheckConfig => {
            let store = ConfigStore::load_or_init(&cli.config)?;
            let config = store.get().await;
            println!("Config at {:?} is valid.", store.path());
            println!("  ssu_channel_id:  {:?}", config.ssu_channel_id);
            println!("  ssd_channel_id:  {:?}", config.ssd_channel_id);
            println!("  ssup_channel_id: {:?}", config.ssup_channel_id);
            println!("  guild_id:        {:?}", config.guild_id);
            println!("  allowed_roles:   {:?}", config.allowed_roles);
            println!(
                "  token:           {}",
                if config.token.is_empty() {
                    "(from environment)"
                } else {
                    "(set in file)"
                }
            );
        }
    }

    Ok(())
}
