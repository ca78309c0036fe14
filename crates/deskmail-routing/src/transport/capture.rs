//! Capture transport
//!
//! Accepts every batch without contacting a mail server. Used when no SMTP
//! relay is configured. Records are still created and marked as sent, so
//! callers should tell users that nothing left the system.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

use super::traits::{OutboundEmail, Transport, TransportError, TransportReceipt};

#[derive(Debug, Clone, Default)]
pub struct CaptureTransport {
    captured: Arc<AtomicUsize>,
}

impl CaptureTransport {
    pub const NAME: &'static str = "capture";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured_count(&self) -> usize {
        self.captured.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CaptureTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<TransportReceipt, TransportError> {
        self.captured.fetch_add(1, Ordering::SeqCst);
        let message_id = format!("captured-{}", uuid::Uuid::new_v4());

        info!(
            "Email captured without sending, id: {}, subject: '{}', to: {:?}, cc: {:?}",
            message_id, email.subject, email.to, email.cc
        );

        Ok(TransportReceipt {
            message_id: Some(message_id),
        })
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
