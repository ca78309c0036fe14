//! Read-only views over message records

use clap::Args;
use colored::Colorize;
use deskmail_core::PaginationParams;
use deskmail_database::establish_connection;
use deskmail_entities::messages;
use deskmail_routing::{MessageRecord, MessageRecordService, StoredRecipient};

use super::{colored_status, print_banner, truncate};

/// Messages submitted by a sender
#[derive(Args)]
pub struct HistoryCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    #[arg(long, env = "DESKMAIL_SENDER_EMAIL")]
    pub sender_email: String,

    #[arg(long, default_value = "1")]
    pub page: u64,

    #[arg(long, default_value = "20")]
    pub page_size: u64,
}

/// Messages addressed to a position, as TO or CC
#[derive(Args)]
pub struct InboxCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    #[arg(long)]
    pub position: String,

    #[arg(long)]
    pub department: String,

    #[arg(long, default_value = "1")]
    pub page: u64,

    #[arg(long, default_value = "20")]
    pub page_size: u64,
}

#[derive(Args)]
pub struct ShowCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    /// Message ID
    pub id: uuid::Uuid,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    /// Limit counts to one department
    #[arg(long)]
    pub department: Option<String>,
}

impl HistoryCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(execute_history(self))
    }
}

impl InboxCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(execute_inbox(self))
    }
}

impl ShowCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(execute_show(self))
    }
}

impl StatsCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(execute_stats(self))
    }
}

async fn service(database_url: &str) -> anyhow::Result<MessageRecordService> {
    let db = establish_connection(database_url).await?;
    Ok(MessageRecordService::new(db))
}

fn to_records(models: Vec<messages::Model>) -> anyhow::Result<Vec<MessageRecord>> {
    models
        .into_iter()
        .map(|model| MessageRecord::try_from(model).map_err(anyhow::Error::from))
        .collect()
}

fn print_table(records: &[MessageRecord], total: u64, page: u64) {
    if records.is_empty() {
        println!("  {} No messages found.", "ℹ".bright_blue());
        println!();
        return;
    }

    println!(
        "  {:<38} {:<20} {:<32} {:<16} {:<17}",
        "ID".bright_white().bold(),
        "TYPE".bright_white().bold(),
        "SUBJECT".bright_white().bold(),
        "EMAIL STATUS".bright_white().bold(),
        "CREATED".bright_white().bold()
    );
    println!("  {}", "─".repeat(125));

    for record in records {
        println!(
            "  {:<38} {:<20} {:<32} {:<16} {:<17}",
            record.id.to_string().bright_cyan(),
            record.request_type.as_str(),
            truncate(&record.subject, 32),
            colored_status(record.email_status.as_str()),
            record.created_at.format("%Y-%m-%d %H:%M").to_string()
        );
    }

    println!();
    println!("  Page {} · {} message(s) in total", page, total);
    println!();
}

async fn execute_history(cmd: HistoryCommand) -> anyhow::Result<()> {
    print_banner(&format!("Sent by {}", cmd.sender_email));

    let service = service(&cmd.database_url).await?;
    let (models, total) = service
        .history(&cmd.sender_email, PaginationParams::new(cmd.page, cmd.page_size))
        .await?;

    print_table(&to_records(models)?, total, cmd.page.max(1));
    Ok(())
}

async fn execute_inbox(cmd: InboxCommand) -> anyhow::Result<()> {
    print_banner(&format!("{} · {}", cmd.position, cmd.department));

    let service = service(&cmd.database_url).await?;
    let (models, total) = service
        .inbox(
            &cmd.position,
            &cmd.department,
            PaginationParams::new(cmd.page, cmd.page_size),
        )
        .await?;

    print_table(&to_records(models)?, total, cmd.page.max(1));
    Ok(())
}

fn print_recipients(label: &str, recipients: &[StoredRecipient]) {
    println!("  {}", label.bright_white().bold());
    if recipients.is_empty() {
        println!("    -");
    }
    for recipient in recipients {
        let email = if recipient.is_placeholder() {
            recipient.email.dimmed()
        } else {
            recipient.email.normal()
        };
        println!("    {:<24} {:<32} {}", recipient.position, recipient.name, email);
    }
}

async fn execute_show(cmd: ShowCommand) -> anyhow::Result<()> {
    let service = service(&cmd.database_url).await?;
    let record = MessageRecord::try_from(service.get(cmd.id).await?)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_banner(&format!("[{}] {}", record.request_type, record.subject));

    println!(
        "  {} {} <{}>",
        "From:".bright_white().bold(),
        record.sender.name,
        record.sender.email
    );
    println!("  {} {}", "Department:".bright_white().bold(), record.department);
    println!("  {} {}", "Priority:".bright_white().bold(), record.priority);
    println!(
        "  {} {}",
        "Created:".bright_white().bold(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  {} {}",
        "Email status:".bright_white().bold(),
        colored_status(record.email_status.as_str())
    );
    println!();

    print_recipients("TO", &record.recipients);
    print_recipients("CC", &record.cc_recipients);
    println!();

    if let Some(leave) = &record.leave_details {
        println!(
            "  {} {} from {} ({}) to {} ({}), {} day(s)",
            "Leave:".bright_white().bold(),
            leave.leave_type,
            leave.from_date,
            leave.from_session,
            leave.to_date,
            leave.to_session,
            leave.duration_days()
        );
        println!();
    }

    println!("{}", record.body);
    println!();

    for batch in &record.email_results.sent {
        println!(
            "  {} {} → {} ({})",
            "✓".bright_green(),
            batch.kind,
            batch.recipients.join(", "),
            batch.message_id.as_deref().unwrap_or("-")
        );
    }
    for batch in &record.email_results.failed {
        println!(
            "  {} {} → {}: {}",
            "✗".bright_red(),
            batch.kind,
            batch.recipients.join(", "),
            batch.error.bright_red()
        );
    }
    println!();
    Ok(())
}

async fn execute_stats(cmd: StatsCommand) -> anyhow::Result<()> {
    let title = match &cmd.department {
        Some(department) => format!("Delivery Stats · {}", department),
        None => "Delivery Stats".to_string(),
    };
    print_banner(&title);

    let service = service(&cmd.database_url).await?;
    let stats = service
        .count_by_email_status(cmd.department.as_deref())
        .await?;

    println!("  {:<16} {}", "Total".bright_white().bold(), stats.total);
    println!("  {:<16} {}", "Sent".bright_green(), stats.sent);
    println!("  {:<16} {}", "Partially Sent".bright_yellow(), stats.partially_sent);
    println!("  {:<16} {}", "Failed".bright_red(), stats.failed);
    println!("  {:<16} {}", "Not Sent".normal(), stats.not_sent);
    println!();
    Ok(())
}
