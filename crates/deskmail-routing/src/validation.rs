//! Boundary validation of compose requests
//!
//! Runs before any directory lookup or insert, so a rejected request has no
//! side effects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::RoutingError;
use crate::types::{LeaveDetails, Priority, RequestType};

/// Authenticated identity of whoever submits a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
}

/// Raw leave sub-fields, as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestFields {
    pub leave_type: Option<String>,
    pub from_date: Option<String>,
    pub from_session: Option<String>,
    pub to_date: Option<String>,
    pub to_session: Option<String>,
}

/// An inbound request to route a message to positions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    pub request_type: String,
    pub subject: String,
    pub message: String,
    pub to_positions: Vec<String>,
    #[serde(default)]
    pub cc_positions: Vec<String>,
    pub department: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub leave: Option<LeaveRequestFields>,
}

/// A request that passed validation, with typed and trimmed fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub request_type: RequestType,
    pub subject: String,
    pub message: String,
    pub to_positions: Vec<String>,
    pub cc_positions: Vec<String>,
    pub department: String,
    pub priority: Priority,
    /// Present only for leave applications
    pub leave_details: Option<LeaveDetails>,
}

fn required(value: &str, field: &str) -> Result<String, RoutingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RoutingError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn required_opt(value: Option<&String>, field: &str) -> Result<String, RoutingError> {
    required(value.map(String::as_str).unwrap_or_default(), field)
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, RoutingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        RoutingError::Validation(format!("{} must be a date in YYYY-MM-DD format", field))
    })
}

fn clean_positions(positions: &[String]) -> Vec<String> {
    positions
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_leave(fields: Option<&LeaveRequestFields>) -> Result<LeaveDetails, RoutingError> {
    let fields = fields.ok_or_else(|| {
        RoutingError::Validation("Leave details are required for a leave application".to_string())
    })?;

    let leave_type = required_opt(fields.leave_type.as_ref(), "Leave type")?;
    let from_date = parse_date(&required_opt(fields.from_date.as_ref(), "From date")?, "From date")?;
    let from_session = required_opt(fields.from_session.as_ref(), "From session")?;
    let to_date = parse_date(&required_opt(fields.to_date.as_ref(), "To date")?, "To date")?;
    let to_session = required_opt(fields.to_session.as_ref(), "To session")?;

    if to_date < from_date {
        return Err(RoutingError::Validation(
            "To date cannot be before from date".to_string(),
        ));
    }

    Ok(LeaveDetails {
        leave_type,
        from_date,
        from_session,
        to_date,
        to_session,
    })
}

pub fn validate(request: &ComposeRequest) -> Result<ValidatedRequest, RoutingError> {
    let request_type = RequestType::from_str(&required(&request.request_type, "Request type")?)?;
    let subject = required(&request.subject, "Subject")?;
    let message = required(&request.message, "Message")?;
    let department = required(&request.department, "Department")?;

    let to_positions = clean_positions(&request.to_positions);
    if to_positions.is_empty() {
        return Err(RoutingError::Validation(
            "At least one TO position is required".to_string(),
        ));
    }
    let cc_positions = clean_positions(&request.cc_positions);

    let priority = match request.priority.as_deref().map(str::trim) {
        None | Some("") => Priority::default(),
        Some(value) => Priority::from_str(value)?,
    };

    // Leave fields on other request types are ignored
    let leave_details = if request_type.requires_leave_details() {
        Some(validate_leave(request.leave.as_ref())?)
    } else {
        None
    };

    Ok(ValidatedRequest {
        request_type,
        subject,
        message,
        to_positions,
        cc_positions,
        department,
        priority,
        leave_details,
    })
}
