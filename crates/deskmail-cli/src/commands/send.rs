//! Route and deliver a message from the command line

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use deskmail_database::establish_connection;
use deskmail_routing::{
    CaptureTransport, ComposeRequest, DbAliasMappingStore, DbPositionDirectory, DeliveryConfig,
    DeliveryCoordinator, DeliverySummary, EmailStatus, LeaveRequestFields, MessageRecordService,
    RecipientResolver, Sender, SmtpTransport, StandardTemplate, TracingEventSink, Transport,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::{colored_status, print_banner};

#[derive(Args)]
pub struct SendCommand {
    /// Database connection URL
    #[arg(long, env = "DESKMAIL_DATABASE_URL")]
    pub database_url: String,

    /// Request type, e.g. "Leave Application" or "Grievance"
    #[arg(long = "type")]
    pub request_type: String,

    #[arg(long)]
    pub subject: String,

    /// Message body
    #[arg(long, conflicts_with = "message_file", required_unless_present = "message_file")]
    pub message: Option<String>,

    /// Read the message body from a file
    #[arg(long)]
    pub message_file: Option<PathBuf>,

    /// Position to address (repeatable)
    #[arg(long, required = true)]
    pub to: Vec<String>,

    /// Position to copy (repeatable)
    #[arg(long)]
    pub cc: Vec<String>,

    #[arg(long)]
    pub department: String,

    /// Low, Normal, High or Urgent
    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long, env = "DESKMAIL_SENDER_NAME")]
    pub sender_name: String,

    #[arg(long, env = "DESKMAIL_SENDER_EMAIL")]
    pub sender_email: String,

    #[arg(long, env = "DESKMAIL_SENDER_ID")]
    pub sender_id: Option<i32>,

    #[arg(long)]
    pub leave_type: Option<String>,

    /// First day of leave (YYYY-MM-DD)
    #[arg(long)]
    pub from_date: Option<String>,

    #[arg(long)]
    pub from_session: Option<String>,

    /// Last day of leave (YYYY-MM-DD)
    #[arg(long)]
    pub to_date: Option<String>,

    #[arg(long)]
    pub to_session: Option<String>,
}

impl SendCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(execute_send(self))
    }

    fn leave_fields(&self) -> Option<LeaveRequestFields> {
        let fields = LeaveRequestFields {
            leave_type: self.leave_type.clone(),
            from_date: self.from_date.clone(),
            from_session: self.from_session.clone(),
            to_date: self.to_date.clone(),
            to_session: self.to_session.clone(),
        };
        if fields == LeaveRequestFields::default() {
            None
        } else {
            Some(fields)
        }
    }

    fn compose_request(&self) -> anyhow::Result<ComposeRequest> {
        let message = match (&self.message, &self.message_file) {
            (Some(message), _) => message.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read message file: {}", path.display()))?,
            (None, None) => anyhow::bail!("Either --message or --message-file is required"),
        };

        Ok(ComposeRequest {
            request_type: self.request_type.clone(),
            subject: self.subject.clone(),
            message,
            to_positions: self.to.clone(),
            cc_positions: self.cc.clone(),
            department: self.department.clone(),
            priority: self.priority.clone(),
            leave: self.leave_fields(),
        })
    }

    fn sender(&self) -> Sender {
        Sender {
            id: self.sender_id,
            name: self.sender_name.clone(),
            email: self.sender_email.clone(),
        }
    }
}

/// SMTP when a relay is configured, capture otherwise
pub(crate) fn build_transport(config: &DeliveryConfig) -> anyhow::Result<Arc<dyn Transport>> {
    match &config.smtp {
        Some(smtp) => {
            info!("Delivering through SMTP relay {}:{}", smtp.host, smtp.port);
            Ok(Arc::new(SmtpTransport::new(smtp)?))
        }
        None => {
            info!("No SMTP relay configured, capturing outbound email");
            Ok(Arc::new(CaptureTransport::new()))
        }
    }
}

async fn execute_send(cmd: SendCommand) -> anyhow::Result<()> {
    let request = cmd.compose_request()?;
    let sender = cmd.sender();

    let config = DeliveryConfig::from_env()?;
    let transport = build_transport(&config)?;
    let captured = transport.name() == CaptureTransport::NAME;
    debug!("Using {} transport", transport.name());

    let db = establish_connection(&cmd.database_url).await?;
    let events = Arc::new(TracingEventSink);
    let resolver = RecipientResolver::new(
        Arc::new(DbPositionDirectory::new(db.clone())),
        Arc::new(DbAliasMappingStore::new(db.clone())),
        events.clone(),
    );
    let coordinator = DeliveryCoordinator::new(
        resolver,
        MessageRecordService::new(db),
        transport,
        Arc::new(StandardTemplate),
        events,
        config,
    );

    let summary = coordinator.deliver(&request, &sender).await?;
    print_summary(&summary, captured);
    Ok(())
}

/// Explains a status that does not mean mail reached an inbox
fn status_note(summary: &DeliverySummary, captured: bool) -> Option<&'static str> {
    if summary.email_status == EmailStatus::NotSent {
        Some("No deliverable recipients; the message was recorded only.")
    } else if captured && summary.sent_count > 0 {
        Some("No SMTP relay configured; the batch was captured, not delivered.")
    } else {
        None
    }
}

fn print_summary(summary: &DeliverySummary, captured: bool) {
    print_banner("Message Recorded");

    println!(
        "  {} {}",
        "Message ID:".bright_white().bold(),
        summary.message_id.to_string().bright_cyan()
    );
    println!(
        "  {} {}",
        "Email status:".bright_white().bold(),
        colored_status(summary.email_status.as_str())
    );
    println!(
        "  {} {} sent, {} failed",
        "Batches:".bright_white().bold(),
        summary.sent_count,
        summary.failed_count
    );
    println!();

    for batch in &summary.details.sent {
        println!(
            "  {} {} → {}",
            "✓".bright_green(),
            batch.kind,
            batch.recipients.join(", ")
        );
    }
    for batch in &summary.details.failed {
        println!(
            "  {} {} → {}: {}",
            "✗".bright_red(),
            batch.kind,
            batch.recipients.join(", "),
            batch.error.bright_red()
        );
    }

    if let Some(note) = status_note(summary, captured) {
        println!("  {} {}", "ℹ".bright_blue(), note);
    }
    println!();
}
