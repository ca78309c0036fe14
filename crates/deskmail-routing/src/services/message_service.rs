//! Message record lifecycle and queries

use deskmail_core::PaginationParams;
use deskmail_entities::messages;
use sea_orm::{
    sea_query::{Alias, Expr},
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::delivery_results::EmailResults;
use crate::errors::RoutingError;
use crate::recipients::StoredRecipient;
use crate::types::{EmailStatus, LeaveDetails, Priority, RequestType, RECORD_STATUS_SENT};
use crate::validation::Sender;

/// Everything needed to insert a new record, before delivery
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub sender: Sender,
    pub request_type: RequestType,
    pub subject: String,
    pub body: String,
    pub recipients: Vec<StoredRecipient>,
    pub cc_recipients: Vec<StoredRecipient>,
    pub to_positions: Vec<String>,
    pub cc_positions: Vec<String>,
    pub priority: Priority,
    pub department: String,
    pub leave_details: Option<LeaveDetails>,
}

/// Typed view over a `messages` row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub id: Uuid,
    pub sender: Sender,
    pub request_type: RequestType,
    pub subject: String,
    pub body: String,
    pub recipients: Vec<StoredRecipient>,
    pub cc_recipients: Vec<StoredRecipient>,
    pub to_positions: Vec<String>,
    pub cc_positions: Vec<String>,
    pub priority: Priority,
    pub department: String,
    pub leave_details: Option<LeaveDetails>,
    pub status: String,
    pub email_status: EmailStatus,
    pub email_results: EmailResults,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<messages::Model> for MessageRecord {
    type Error = RoutingError;

    fn try_from(model: messages::Model) -> Result<Self, Self::Error> {
        let leave_details = match model.leave_details {
            Some(value) if !value.is_null() => Some(serde_json::from_value(value)?),
            _ => None,
        };

        Ok(Self {
            id: model.id,
            sender: Sender {
                id: model.sender_id,
                name: model.sender_name,
                email: model.sender_email,
            },
            request_type: RequestType::from_str(&model.request_type)?,
            subject: model.subject,
            body: model.body,
            recipients: serde_json::from_value(model.recipients)?,
            cc_recipients: serde_json::from_value(model.cc_recipients)?,
            to_positions: serde_json::from_value(model.to_positions)?,
            cc_positions: serde_json::from_value(model.cc_positions)?,
            priority: Priority::from_str(&model.priority)?,
            department: model.department,
            leave_details,
            status: model.status,
            email_status: EmailStatus::from_str(&model.email_status)?,
            email_results: serde_json::from_value(model.email_results)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Query options for listing messages
#[derive(Debug, Clone, Default)]
pub struct ListMessagesOptions {
    pub department: Option<String>,
    pub request_type: Option<RequestType>,
    pub email_status: Option<EmailStatus>,
    pub sender_email: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Message counts by delivery outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageStats {
    pub total: u64,
    pub sent: u64,
    pub partially_sent: u64,
    pub failed: u64,
    pub not_sent: u64,
}

fn lists_position(value: &serde_json::Value, position: &str) -> bool {
    value
        .as_array()
        .map(|positions| {
            positions.iter().any(|p| {
                p.as_str()
                    .map(|p| p.trim() == position)
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct MessageRecordService {
    db: Arc<DatabaseConnection>,
}

impl MessageRecordService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a record in its pre-delivery state
    pub async fn create(&self, draft: MessageDraft) -> Result<messages::Model, RoutingError> {
        let id = Uuid::new_v4();

        // Leave sub-document only travels with leave applications
        let leave_details = match (&draft.leave_details, draft.request_type.requires_leave_details()) {
            (Some(details), true) => Some(serde_json::to_value(details)?),
            _ => None,
        };

        let record = messages::ActiveModel {
            id: Set(id),
            sender_id: Set(draft.sender.id),
            sender_name: Set(draft.sender.name),
            sender_email: Set(draft.sender.email),
            request_type: Set(draft.request_type.as_str().to_string()),
            subject: Set(draft.subject),
            body: Set(draft.body),
            recipients: Set(serde_json::to_value(&draft.recipients)?),
            cc_recipients: Set(serde_json::to_value(&draft.cc_recipients)?),
            to_positions: Set(serde_json::to_value(&draft.to_positions)?),
            cc_positions: Set(serde_json::to_value(&draft.cc_positions)?),
            priority: Set(draft.priority.as_str().to_string()),
            department: Set(draft.department),
            leave_details: Set(leave_details),
            status: Set(RECORD_STATUS_SENT.to_string()),
            email_status: Set(EmailStatus::NotSent.as_str().to_string()),
            email_results: Set(serde_json::to_value(EmailResults::default())?),
            ..Default::default()
        };

        let model = record.insert(self.db.as_ref()).await?;
        debug!("Created message record {}", model.id);
        Ok(model)
    }

    /// The one terminal mutation of a record
    pub async fn update_delivery_outcome(
        &self,
        id: Uuid,
        results: &EmailResults,
        email_status: EmailStatus,
    ) -> Result<messages::Model, RoutingError> {
        let update = messages::ActiveModel {
            id: Unchanged(id),
            email_results: Set(serde_json::to_value(results)?),
            email_status: Set(email_status.as_str().to_string()),
            ..Default::default()
        };

        let model = update.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
                RoutingError::MessageNotFound(id.to_string())
            }
            other => RoutingError::Database(other),
        })?;

        info!(
            "Message {} finalized as '{}' ({} sent, {} failed)",
            id,
            email_status,
            results.sent_count(),
            results.failed_count()
        );
        Ok(model)
    }

    pub async fn get(&self, id: Uuid) -> Result<messages::Model, RoutingError> {
        messages::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| RoutingError::MessageNotFound(id.to_string()))
    }

    /// Messages submitted by `sender_email`, newest first
    pub async fn history(
        &self,
        sender_email: &str,
        pagination: PaginationParams,
    ) -> Result<(Vec<messages::Model>, u64), RoutingError> {
        let (page, page_size) = pagination.normalize();
        self.list(ListMessagesOptions {
            sender_email: Some(sender_email.to_string()),
            page: Some(page),
            page_size: Some(page_size),
            ..Default::default()
        })
        .await
    }

    /// List messages with optional filtering
    pub async fn list(
        &self,
        options: ListMessagesOptions,
    ) -> Result<(Vec<messages::Model>, u64), RoutingError> {
        let (page, page_size) = PaginationParams {
            page: options.page,
            page_size: options.page_size,
        }
        .normalize();

        let mut query = messages::Entity::find().order_by_desc(messages::Column::CreatedAt);

        if let Some(department) = options.department {
            query = query.filter(messages::Column::Department.eq(department));
        }

        if let Some(request_type) = options.request_type {
            query = query.filter(messages::Column::RequestType.eq(request_type.as_str()));
        }

        if let Some(email_status) = options.email_status {
            query = query.filter(messages::Column::EmailStatus.eq(email_status.as_str()));
        }

        if let Some(sender_email) = options.sender_email {
            query = query.filter(messages::Column::SenderEmail.eq(sender_email));
        }

        let paginator = query.paginate(self.db.as_ref(), page_size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok((items, total))
    }

    /// Messages addressed to `position` in `department`, as TO or CC, newest first
    pub async fn inbox(
        &self,
        position: &str,
        department: &str,
        pagination: PaginationParams,
    ) -> Result<(Vec<messages::Model>, u64), RoutingError> {
        let (page, page_size) = pagination.normalize();
        let position = position.trim();

        // Coarse text match on the JSON columns, then an exact match per element
        let token = format!("%{}%", serde_json::to_string(position)?);
        let mentions = |column: messages::Column| {
            Expr::expr(Expr::col(column).cast_as(Alias::new("TEXT"))).like(token.as_str())
        };

        let matching: Vec<_> = messages::Entity::find()
            .filter(messages::Column::Department.eq(department))
            .filter(
                Condition::any()
                    .add(mentions(messages::Column::ToPositions))
                    .add(mentions(messages::Column::CcPositions)),
            )
            .order_by_desc(messages::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .filter(|m| {
                lists_position(&m.to_positions, position) || lists_position(&m.cc_positions, position)
            })
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(((page - 1) * page_size) as usize)
            .take(page_size as usize)
            .collect();

        Ok((items, total))
    }

    pub async fn count_by_email_status(
        &self,
        department: Option<&str>,
    ) -> Result<MessageStats, RoutingError> {
        let mut base_query = messages::Entity::find();

        if let Some(department) = department {
            base_query = base_query.filter(messages::Column::Department.eq(department));
        }

        let total = base_query.clone().count(self.db.as_ref()).await?;

        let count_status = |status: EmailStatus| {
            base_query
                .clone()
                .filter(messages::Column::EmailStatus.eq(status.as_str()))
                .count(self.db.as_ref())
        };

        let sent = count_status(EmailStatus::Sent).await?;
        let partially_sent = count_status(EmailStatus::PartiallySent).await?;
        let failed = count_status(EmailStatus::Failed).await?;
        let not_sent = count_status(EmailStatus::NotSent).await?;

        Ok(MessageStats {
            total,
            sent,
            partially_sent,
            failed,
            not_sent,
        })
    }
}
