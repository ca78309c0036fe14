//! Position alias administration

use clap::{Args, Subcommand};
use colored::Colorize;
use deskmail_database::establish_connection;
use deskmail_routing::DbAliasMappingStore;

use super::print_banner;

/// Position alias management commands
#[derive(Args)]
pub struct AliasCommand {
    #[command(subcommand)]
    pub command: AliasSubcommand,
}

#[derive(Subcommand)]
pub enum AliasSubcommand {
    /// Route a position's mail to a designated mailbox
    Add(AddAliasCommand),
    /// List aliases for a position
    List(ListAliasesCommand),
    /// Deactivate an alias
    Disable(DisableAliasCommand),
}

#[derive(Args)]
pub struct AddAliasCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    #[arg(long)]
    pub position: String,

    /// Holder name this alias stands in for, e.g. "Jane Doe"
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,
}

#[derive(Args)]
pub struct ListAliasesCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    #[arg(long)]
    pub position: String,
}

#[derive(Args)]
pub struct DisableAliasCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    /// Alias ID
    pub id: i32,
}

impl AliasCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            match self.command {
                AliasSubcommand::Add(cmd) => execute_add(cmd).await,
                AliasSubcommand::List(cmd) => execute_list(cmd).await,
                AliasSubcommand::Disable(cmd) => execute_disable(cmd).await,
            }
        })
    }
}

async fn store(database_url: &str) -> anyhow::Result<DbAliasMappingStore> {
    let db = establish_connection(database_url).await?;
    Ok(DbAliasMappingStore::new(db))
}

async fn execute_add(cmd: AddAliasCommand) -> anyhow::Result<()> {
    let store = store(&cmd.database_url).await?;
    let alias = store.create(&cmd.position, &cmd.name, &cmd.email).await?;

    println!(
        "{} Alias {} created: {} ({}) → {}",
        "✓".bright_green(),
        alias.id.to_string().bright_cyan(),
        alias.position.bright_white().bold(),
        alias.employee_name,
        alias.email.bright_cyan()
    );
    Ok(())
}

async fn execute_list(cmd: ListAliasesCommand) -> anyhow::Result<()> {
    print_banner(&format!("Aliases · {}", cmd.position));

    let store = store(&cmd.database_url).await?;
    let aliases = store.list_for_position(&cmd.position).await?;

    if aliases.is_empty() {
        println!("  {} No aliases for this position.", "ℹ".bright_blue());
        println!();
        return Ok(());
    }

    println!(
        "  {:<6} {:<28} {:<36} {:<10}",
        "ID".bright_white().bold(),
        "NAME".bright_white().bold(),
        "EMAIL".bright_white().bold(),
        "STATUS".bright_white().bold()
    );
    println!("  {}", "─".repeat(80));

    for alias in aliases {
        let status = if alias.is_active {
            "active".bright_green()
        } else {
            "inactive".dimmed()
        };
        println!(
            "  {:<6} {:<28} {:<36} {:<10}",
            alias.id, alias.employee_name, alias.email, status
        );
    }

    println!();
    Ok(())
}

async fn execute_disable(cmd: DisableAliasCommand) -> anyhow::Result<()> {
    let store = store(&cmd.database_url).await?;
    let alias = store.deactivate(cmd.id).await?;

    println!(
        "{} Alias {} for {} disabled",
        "✓".bright_green(),
        alias.id,
        alias.position.bright_white().bold()
    );
    Ok(())
}
