//! Message record services

mod delivery_results;
mod message_service;

pub use delivery_results::{BatchKind, DeliveredBatch, EmailResults, FailedBatch};
pub use message_service::{
    ListMessagesOptions, MessageDraft, MessageRecord, MessageRecordService, MessageStats,
};
