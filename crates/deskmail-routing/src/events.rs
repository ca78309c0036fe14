//! Structured routing events and the sinks that receive them
//!
//! The resolver and coordinator never log delivery facts directly; they emit a
//! [`RoutingEvent`] into an injected [`EventSink`].

use serde::Serialize;
use std::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::BatchKind;
use crate::types::{EmailStatus, RecipientType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoutingEvent {
    PositionResolved {
        position: String,
        department: String,
        recipient_type: RecipientType,
        mapped: usize,
        personal: usize,
        /// Holders skipped because an alias stands in for them
        overridden: usize,
    },
    RecordCreated {
        message_id: Uuid,
        to_positions: usize,
        cc_positions: usize,
    },
    BatchSent {
        message_id: Uuid,
        kind: BatchKind,
        recipients: usize,
        provider_message_id: Option<String>,
    },
    BatchFailed {
        message_id: Uuid,
        kind: BatchKind,
        recipients: usize,
        error: String,
    },
    RecordFinalized {
        message_id: Uuid,
        email_status: EmailStatus,
        sent: usize,
        failed: usize,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: RoutingEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: RoutingEvent) {
        match event {
            RoutingEvent::PositionResolved {
                position,
                department,
                recipient_type,
                mapped,
                personal,
                overridden,
            } => info!(
                %position,
                %department,
                %recipient_type,
                mapped,
                personal,
                overridden,
                "position resolved"
            ),
            RoutingEvent::RecordCreated {
                message_id,
                to_positions,
                cc_positions,
            } => info!(%message_id, to_positions, cc_positions, "message record created"),
            RoutingEvent::BatchSent {
                message_id,
                kind,
                recipients,
                provider_message_id,
            } => info!(
                %message_id,
                %kind,
                recipients,
                provider_message_id = provider_message_id.as_deref().unwrap_or("-"),
                "batch sent"
            ),
            RoutingEvent::BatchFailed {
                message_id,
                kind,
                recipients,
                error,
            } => warn!(%message_id, %kind, recipients, %error, "batch failed"),
            RoutingEvent::RecordFinalized {
                message_id,
                email_status,
                sent,
                failed,
            } => info!(%message_id, %email_status, sent, failed, "message record finalized"),
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: RoutingEvent) {}
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<RoutingEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RoutingEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: RoutingEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
