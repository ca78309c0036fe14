//! Request-level enums and value types shared by the pipeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::RoutingError;

/// Kind of request being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    #[serde(rename = "Leave Application")]
    LeaveApplication,
    #[serde(rename = "Permission Request")]
    PermissionRequest,
    #[serde(rename = "Work From Home")]
    WorkFromHome,
    #[serde(rename = "Grievance")]
    Grievance,
    #[serde(rename = "General Request")]
    GeneralRequest,
}

impl RequestType {
    pub const ALL: [RequestType; 5] = [
        RequestType::LeaveApplication,
        RequestType::PermissionRequest,
        RequestType::WorkFromHome,
        RequestType::Grievance,
        RequestType::GeneralRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::LeaveApplication => "Leave Application",
            RequestType::PermissionRequest => "Permission Request",
            RequestType::WorkFromHome => "Work From Home",
            RequestType::Grievance => "Grievance",
            RequestType::GeneralRequest => "General Request",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, RoutingError> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RoutingError::Validation(format!("Unknown request type: {}", s)))
    }

    pub fn requires_leave_details(&self) -> bool {
        matches!(self, RequestType::LeaveApplication)
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, RoutingError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" | "medium" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(RoutingError::Validation(format!("Unknown priority: {}", s))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an addressee was requested as a primary or a copied recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipientType {
    #[serde(rename = "TO")]
    To,
    #[serde(rename = "CC")]
    Cc,
}

impl RecipientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientType::To => "TO",
            RecipientType::Cc => "CC",
        }
    }
}

impl std::fmt::Display for RecipientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate delivery outcome stored on a message record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmailStatus {
    #[default]
    #[serde(rename = "Not Sent")]
    NotSent,
    #[serde(rename = "Sent")]
    Sent,
    #[serde(rename = "Partially Sent")]
    PartiallySent,
    #[serde(rename = "Failed")]
    Failed,
}

impl EmailStatus {
    /// Derive the status purely from how many batches succeeded and failed
    pub fn from_counts(sent: usize, failed: usize) -> Self {
        match (sent, failed) {
            (0, 0) => EmailStatus::NotSent,
            (_, 0) => EmailStatus::Sent,
            (0, _) => EmailStatus::Failed,
            _ => EmailStatus::PartiallySent,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::NotSent => "Not Sent",
            EmailStatus::Sent => "Sent",
            EmailStatus::PartiallySent => "Partially Sent",
            EmailStatus::Failed => "Failed",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, RoutingError> {
        match s.trim().to_lowercase().as_str() {
            "not sent" | "not_sent" => Ok(EmailStatus::NotSent),
            "sent" => Ok(EmailStatus::Sent),
            "partially sent" | "partially_sent" => Ok(EmailStatus::PartiallySent),
            "failed" => Ok(EmailStatus::Failed),
            _ => Err(RoutingError::Validation(format!("Unknown email status: {}", s))),
        }
    }
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record-level status, fixed once the record exists
pub const RECORD_STATUS_SENT: &str = "Sent";

/// Leave sub-document attached to "Leave Application" requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDetails {
    pub leave_type: String,
    pub from_date: NaiveDate,
    pub from_session: String,
    pub to_date: NaiveDate,
    pub to_session: String,
}

impl LeaveDetails {
    /// Length of the leave in days, counting half-day sessions as 0.5
    pub fn duration_days(&self) -> f32 {
        let span = (self.to_date - self.from_date).num_days() as f32 + 1.0;
        let mut days = span;
        if is_second_half(&self.from_session) {
            days -= 0.5;
        }
        if is_first_half(&self.to_session) {
            days -= 0.5;
        }
        days.max(0.5)
    }
}

fn is_first_half(session: &str) -> bool {
    let s = session.to_lowercase();
    s.contains("first") || s == "fn" || s == "morning"
}

fn is_second_half(session: &str) -> bool {
    let s = session.to_lowercase();
    s.contains("second") || s == "an" || s == "afternoon"
}
