pub mod alias;
pub mod messages;
pub mod migrate;
pub mod send;

pub use alias::AliasCommand;
pub use messages::{HistoryCommand, InboxCommand, ShowCommand, StatsCommand};
pub use migrate::MigrateCommand;
pub use send::SendCommand;

use colored::{ColoredString, Colorize};
use deskmail_routing::EmailStatus;

const RULE: &str = "═══════════════════════════════════════════════════════════════";

pub(crate) fn print_banner(title: &str) {
    println!();
    println!("{}", RULE.bright_blue());
    println!("{}", format!("{:^63}", title).bright_blue().bold());
    println!("{}", RULE.bright_blue());
    println!();
}

pub(crate) fn colored_status(status: &str) -> ColoredString {
    match EmailStatus::from_str(status) {
        Ok(EmailStatus::Sent) => status.bright_green(),
        Ok(EmailStatus::PartiallySent) => status.bright_yellow(),
        Ok(EmailStatus::Failed) => status.bright_red(),
        _ => status.normal(),
    }
}

/// Cut `value` to `width` characters for table cells
pub(crate) fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
