//! Resolved addressees
//!
//! A [`RecipientEntry`] is the transient, email-oriented result of resolving a
//! position. A [`StoredRecipient`] is the audit-oriented triple persisted on the
//! message record; every requested position yields at least one of those.

use serde::{Deserialize, Serialize};

use crate::directory::{AliasRecord, DirectoryEmployee};
use crate::types::RecipientType;

/// Sentinel address for employees (or positions) without a usable mailbox
pub const NO_EMAIL_PLACEHOLDER: &str = "no-email@deskmail.invalid";

/// Name used when an employee record carries no name at all
pub const UNKNOWN_EMPLOYEE_NAME: &str = "Unknown Employee";

/// Name recorded for a position that nobody currently holds
pub const VACANT_POSITION_NAME: &str = "No active employee holds this position";

/// Where a recipient came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientSource {
    /// Position-level alias override
    Alias,
    /// The position holder's own account
    Employee,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientEntry {
    pub email: String,
    pub display_name: String,
    pub source: RecipientSource,
    pub department: String,
    pub position: String,
    pub recipient_type: RecipientType,
}

impl RecipientEntry {
    pub fn from_alias(
        alias: &AliasRecord,
        position: &str,
        department: &str,
        recipient_type: RecipientType,
    ) -> Self {
        Self {
            email: alias.email.trim().to_string(),
            display_name: alias.employee_name.trim().to_string(),
            source: RecipientSource::Alias,
            department: department.to_string(),
            position: position.to_string(),
            recipient_type,
        }
    }

    pub fn from_employee(
        employee: &DirectoryEmployee,
        position: &str,
        recipient_type: RecipientType,
    ) -> Self {
        Self {
            email: employee.email.as_deref().unwrap_or_default().trim().to_string(),
            display_name: employee.display_name(),
            source: RecipientSource::Employee,
            department: employee.department.clone(),
            position: position.to_string(),
            recipient_type,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.source == RecipientSource::Alias
    }
}

/// `{position, email, name}` triple persisted on the message record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoredRecipient {
    pub position: String,
    pub email: String,
    pub name: String,
}

impl StoredRecipient {
    pub fn from_employee(employee: &DirectoryEmployee, position: &str) -> Self {
        let email = match employee.email.as_deref() {
            Some(email) if is_deliverable_email(email) => email.trim().to_string(),
            _ => NO_EMAIL_PLACEHOLDER.to_string(),
        };
        Self {
            position: position.to_string(),
            email,
            name: employee.display_name(),
        }
    }

    /// Entry recorded for a position with zero holders
    pub fn vacant(position: &str) -> Self {
        Self {
            position: position.to_string(),
            email: NO_EMAIL_PLACEHOLDER.to_string(),
            name: VACANT_POSITION_NAME.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.email.eq_ignore_ascii_case(NO_EMAIL_PLACEHOLDER)
    }
}

/// Whether `email` can be handed to a transport
pub fn is_deliverable_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@') && !email.eq_ignore_ascii_case(NO_EMAIL_PLACEHOLDER)
}

/// Key used to compare an employee's display name against alias names
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Mailbox list for a transport call, in resolution order
pub fn emails_of(entries: &[RecipientEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.email.clone()).collect()
}
