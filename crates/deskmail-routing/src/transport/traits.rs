//! Transport trait definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single transport call
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("Rejected by transport: {0}")]
    Rejected(String),
}

/// One outbound email batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub cc: Option<Vec<String>>,
    /// `"Name <email>"`
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutboundEmail {
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Successful transport response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportReceipt {
    pub message_id: Option<String>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one batch; an `Err` marks the whole batch as failed
    async fn send(&self, email: &OutboundEmail) -> Result<TransportReceipt, TransportError>;

    /// Short identifier for logs
    fn name(&self) -> &'static str;
}
