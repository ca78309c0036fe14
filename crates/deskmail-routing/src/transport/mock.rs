//! Mock transport for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{OutboundEmail, Transport, TransportError, TransportReceipt};

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    pub send_count: Arc<AtomicUsize>,
    pub sent: Arc<Mutex<Vec<OutboundEmail>>>,
    /// Fail every call
    pub should_fail_send: bool,
    /// Fail only the call with this 1-based index
    pub fail_on_call: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_send_failure(mut self) -> Self {
        self.should_fail_send = true;
        self
    }

    pub fn with_failure_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn send_call_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<TransportReceipt, TransportError> {
        let call = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(email.clone());

        if self.should_fail_send || self.fail_on_call == Some(call) {
            return Err(TransportError::Rejected("Mock send failure".to_string()));
        }

        Ok(TransportReceipt {
            message_id: Some(format!("mock-message-{}", uuid::Uuid::new_v4())),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
