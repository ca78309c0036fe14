//! Per-batch delivery outcomes stored in `messages.email_results`

use serde::{Deserialize, Serialize};

use crate::types::EmailStatus;

/// Which outbound batch an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchKind {
    /// Batch A: TO recipients, with CC recipients copied
    #[serde(rename = "TO")]
    To,
    /// Batch B: CC recipients addressed directly because nothing resolved for TO
    #[serde(rename = "CC_ONLY")]
    CcOnly,
    /// A failure outside any specific batch
    #[serde(rename = "SYSTEM_ERROR")]
    SystemError,
}

impl BatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::To => "TO",
            BatchKind::CcOnly => "CC_ONLY",
            BatchKind::SystemError => "SYSTEM_ERROR",
        }
    }
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredBatch {
    #[serde(rename = "type")]
    pub kind: BatchKind,
    pub recipients: Vec<String>,
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedBatch {
    #[serde(rename = "type")]
    pub kind: BatchKind,
    pub recipients: Vec<String>,
    pub error: String,
}

/// `{sent: [...], failed: [...]}`, one entry per attempted batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResults {
    #[serde(default)]
    pub sent: Vec<DeliveredBatch>,
    #[serde(default)]
    pub failed: Vec<FailedBatch>,
}

impl EmailResults {
    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Aggregate status, derived only from the batch counts
    pub fn status(&self) -> EmailStatus {
        EmailStatus::from_counts(self.sent_count(), self.failed_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_counts() {
        let mut results = EmailResults::default();
        assert_eq!(results.status(), EmailStatus::NotSent);

        results.failed.push(FailedBatch {
            kind: BatchKind::To,
            recipients: vec!["a@co.com".to_string()],
            error: "timeout".to_string(),
        });
        assert_eq!(results.status(), EmailStatus::Failed);

        results.sent.push(DeliveredBatch {
            kind: BatchKind::CcOnly,
            recipients: vec!["b@co.com".to_string()],
            message_id: None,
        });
        assert_eq!(results.status(), EmailStatus::PartiallySent);

        results.failed.clear();
        assert_eq!(results.status(), EmailStatus::Sent);
    }

    #[test]
    fn test_results_json_shape() {
        let results = EmailResults {
            sent: vec![],
            failed: vec![FailedBatch {
                kind: BatchKind::SystemError,
                recipients: vec![],
                error: "bad sender".to_string(),
            }],
        };

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["sent"], serde_json::json!([]));
        assert_eq!(json["failed"][0]["type"], "SYSTEM_ERROR");
        assert_eq!(json["failed"][0]["error"], "bad sender");

        let empty: EmailResults = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty, EmailResults::default());
    }
}
