//! Deskmail CLI
//!
//! Routes messages to positions, inspects delivery history and administers
//! position aliases.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AliasCommand, HistoryCommand, InboxCommand, MigrateCommand, SendCommand, ShowCommand,
    StatsCommand,
};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DESKMAIL_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "DESKMAIL_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    Migrate(MigrateCommand),
    /// Route a message to positions and deliver it
    Send(SendCommand),
    /// Messages submitted by a sender
    History(HistoryCommand),
    /// Messages addressed to a position
    Inbox(InboxCommand),
    /// Show one message record
    Show(ShowCommand),
    /// Message counts by delivery status
    Stats(StatsCommand),
    /// Position alias management
    Alias(AliasCommand),
}

fn log_filter(log_level: &str) -> anyhow::Result<tracing_subscriber::EnvFilter> {
    // RUST_LOG wins when set; otherwise our crates at the requested level
    if std::env::var("RUST_LOG").is_ok() {
        return tracing_subscriber::EnvFilter::try_from_default_env()
            .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG environment variable: {}", e));
    }

    tracing_subscriber::EnvFilter::try_new(format!(
        "deskmail={level},\
         deskmail_core={level},\
         deskmail_database={level},\
         deskmail_migrations={level},\
         deskmail_routing={level},\
         sea_orm=warn,\
         sea_orm_migration=warn,\
         sqlx=warn,\
         rustls=warn",
        level = log_level
    ))
    .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", log_level, e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(&cli.log_level)?;

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global default subscriber: {}", e))?;

    match cli.command {
        Commands::Migrate(cmd) => cmd.execute(),
        Commands::Send(cmd) => cmd.execute(),
        Commands::History(cmd) => cmd.execute(),
        Commands::Inbox(cmd) => cmd.execute(),
        Commands::Show(cmd) => cmd.execute(),
        Commands::Stats(cmd) => cmd.execute(),
        Commands::Alias(cmd) => cmd.execute(),
    }
}
