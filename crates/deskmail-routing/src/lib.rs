//! Position-based message routing for Deskmail
//!
//! Messages are addressed to positions within a department rather than to
//! mailboxes. This crate provides:
//! - Recipient resolution from the employee directory and position aliases
//! - Delivery through a pluggable transport (SMTP or capture)
//! - A durable message record per request with its delivery outcome
//!
//! Delivery facts are reported through an injected [`EventSink`].

pub mod config;
pub mod coordinator;
pub mod directory;
pub mod errors;
pub mod events;
pub mod recipients;
pub mod resolver;
pub mod services;
pub mod template;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types
pub use config::{DeliveryConfig, SmtpConfig, TlsMode};
pub use coordinator::{DeliveryCoordinator, DeliverySummary};
pub use directory::{
    AliasMappingStore, AliasRecord, DbAliasMappingStore, DbPositionDirectory, DirectoryEmployee,
    PositionDirectory,
};
pub use errors::RoutingError;
pub use events::{EventSink, NoopEventSink, RecordingEventSink, RoutingEvent, TracingEventSink};
pub use recipients::{RecipientEntry, RecipientSource, StoredRecipient};
pub use resolver::{PositionRecipients, RecipientResolver};
pub use services::{
    BatchKind, EmailResults, ListMessagesOptions, MessageDraft, MessageRecord,
    MessageRecordService, MessageStats,
};
pub use template::{MessageTemplate, StandardTemplate};
pub use transport::{CaptureTransport, OutboundEmail, SmtpTransport, Transport, TransportError};
pub use types::{EmailStatus, LeaveDetails, Priority, RecipientType, RequestType};
pub use validation::{validate, ComposeRequest, LeaveRequestFields, Sender};
