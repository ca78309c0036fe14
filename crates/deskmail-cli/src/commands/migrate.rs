use clap::Args;
use colored::Colorize;
use deskmail_database::establish_connection;
use tracing::debug;

#[derive(Args)]
pub struct MigrateCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,
}

impl MigrateCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(execute_migrate(self))
    }
}

async fn execute_migrate(cmd: MigrateCommand) -> anyhow::Result<()> {
    debug!("Running migrations");
    establish_connection(&cmd.database_url).await?;
    println!("{} Database schema is up to date", "✓".bright_green());
    Ok(())
}
