//! Delivery pipeline
//!
//! validate → resolve → persist → send → update, once per request. Directory
//! failures abort before anything is stored; transport failures are recorded
//! on the message and never abort.

use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::DeliveryConfig;
use crate::errors::RoutingError;
use crate::events::{EventSink, RoutingEvent};
use crate::recipients::{emails_of, is_deliverable_email, RecipientEntry, StoredRecipient};
use crate::resolver::RecipientResolver;
use crate::services::{
    BatchKind, DeliveredBatch, EmailResults, FailedBatch, MessageDraft, MessageRecordService,
};
use crate::template::{MessageTemplate, TemplateContext};
use crate::transport::{OutboundEmail, Transport};
use crate::types::{EmailStatus, RecipientType};
use crate::validation::{validate, ComposeRequest, Sender, ValidatedRequest};

/// What the caller gets back once the record is finalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverySummary {
    pub message_id: Uuid,
    pub sent_count: usize,
    pub failed_count: usize,
    pub email_status: EmailStatus,
    pub details: EmailResults,
}

/// One outbound batch, before rendering
struct PlannedBatch {
    kind: BatchKind,
    recipient_type: RecipientType,
    to: Vec<String>,
    cc: Option<Vec<String>>,
    subject: String,
}

/// Decide which batch, if any, to send
///
/// CC recipients ride along on the TO batch; they are only addressed directly
/// when nothing resolved for TO.
fn plan_batch(
    request: &ValidatedRequest,
    all_to: &[RecipientEntry],
    all_cc: &[RecipientEntry],
) -> Option<PlannedBatch> {
    if !all_to.is_empty() {
        let cc = if all_cc.is_empty() {
            None
        } else {
            Some(emails_of(all_cc))
        };
        Some(PlannedBatch {
            kind: BatchKind::To,
            recipient_type: RecipientType::To,
            to: emails_of(all_to),
            cc,
            subject: format!("[{}] {}", request.request_type, request.subject),
        })
    } else if !all_cc.is_empty() {
        Some(PlannedBatch {
            kind: BatchKind::CcOnly,
            recipient_type: RecipientType::Cc,
            to: emails_of(all_cc),
            cc: None,
            subject: format!("[{}] [CC] {}", request.request_type, request.subject),
        })
    } else {
        None
    }
}

pub struct DeliveryCoordinator {
    resolver: RecipientResolver,
    records: MessageRecordService,
    transport: Arc<dyn Transport>,
    template: Arc<dyn MessageTemplate>,
    events: Arc<dyn EventSink>,
    config: DeliveryConfig,
}

impl DeliveryCoordinator {
    pub fn new(
        resolver: RecipientResolver,
        records: MessageRecordService,
        transport: Arc<dyn Transport>,
        template: Arc<dyn MessageTemplate>,
        events: Arc<dyn EventSink>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            resolver,
            records,
            transport,
            template,
            events,
            config,
        }
    }

    /// Route `request` from `sender` and record the outcome
    ///
    /// Returns `Err` only for validation, directory and persistence failures.
    /// A summary with `email_status = Failed` is still a successful call.
    pub async fn deliver(
        &self,
        request: &ComposeRequest,
        sender: &Sender,
    ) -> Result<DeliverySummary, RoutingError> {
        let request = validate(request)?;
        let department = request.department.as_str();

        let (all_to, all_cc) = futures::try_join!(
            self.resolve_all(&request.to_positions, department, RecipientType::To),
            self.resolve_all(&request.cc_positions, department, RecipientType::Cc),
        )?;

        let (recipients, cc_recipients) = futures::try_join!(
            self.stored_entries(&request.to_positions, department),
            self.stored_entries(&request.cc_positions, department),
        )?;

        let record = self
            .records
            .create(MessageDraft {
                sender: sender.clone(),
                request_type: request.request_type,
                subject: request.subject.clone(),
                body: request.message.clone(),
                recipients,
                cc_recipients,
                to_positions: request.to_positions.clone(),
                cc_positions: request.cc_positions.clone(),
                priority: request.priority,
                department: request.department.clone(),
                leave_details: request.leave_details.clone(),
            })
            .await?;

        self.events.emit(RoutingEvent::RecordCreated {
            message_id: record.id,
            to_positions: request.to_positions.len(),
            cc_positions: request.cc_positions.len(),
        });

        let mut results = EmailResults::default();

        match plan_batch(&request, &all_to, &all_cc) {
            Some(batch) => match self.config.from_header() {
                Ok(from) => {
                    self.send_batch(record.id, &request, sender, &from, batch, &mut results)
                        .await
                }
                Err(e) => {
                    warn!("Message {} not sent: {}", record.id, e);
                    self.record_failure(
                        &mut results,
                        record.id,
                        BatchKind::SystemError,
                        Vec::new(),
                        e.to_string(),
                    );
                }
            },
            None => debug!(
                "Message {} has no deliverable recipients; nothing to send",
                record.id
            ),
        }

        let email_status = results.status();
        self.records
            .update_delivery_outcome(record.id, &results, email_status)
            .await?;

        self.events.emit(RoutingEvent::RecordFinalized {
            message_id: record.id,
            email_status,
            sent: results.sent_count(),
            failed: results.failed_count(),
        });

        Ok(DeliverySummary {
            message_id: record.id,
            sent_count: results.sent_count(),
            failed_count: results.failed_count(),
            email_status,
            details: results,
        })
    }

    /// Resolve every position concurrently, keeping input order in the union
    async fn resolve_all(
        &self,
        positions: &[String],
        department: &str,
        recipient_type: RecipientType,
    ) -> Result<Vec<RecipientEntry>, RoutingError> {
        let resolved = try_join_all(
            positions
                .iter()
                .map(|position| self.resolver.resolve(position, department, recipient_type)),
        )
        .await?;

        Ok(resolved
            .into_iter()
            .flat_map(|position| position.into_entries())
            .collect())
    }

    async fn stored_entries(
        &self,
        positions: &[String],
        department: &str,
    ) -> Result<Vec<StoredRecipient>, RoutingError> {
        let entries = try_join_all(
            positions
                .iter()
                .map(|position| self.resolver.directory_entries(position, department)),
        )
        .await?;

        Ok(entries.into_iter().flatten().collect())
    }

    async fn send_batch(
        &self,
        message_id: Uuid,
        request: &ValidatedRequest,
        sender: &Sender,
        from: &str,
        batch: PlannedBatch,
        results: &mut EmailResults,
    ) {
        let mut recipients = batch.to.clone();
        if let Some(cc) = &batch.cc {
            recipients.extend(cc.iter().cloned());
        }

        let ctx = TemplateContext {
            sender_name: &sender.name,
            sender_email: &sender.email,
            request_type: request.request_type,
            subject: &request.subject,
            message: &request.message,
            priority: request.priority,
            recipient_type: batch.recipient_type,
            leave_details: request.leave_details.as_ref(),
        };

        let rendered = match self.template.render(&ctx) {
            Ok(rendered) => rendered,
            Err(e) => {
                self.record_failure(results, message_id, batch.kind, recipients, e.to_string());
                return;
            }
        };

        let reply_to = if is_deliverable_email(&sender.email) {
            Some(sender.email.trim().to_string())
        } else {
            None
        };

        let email = OutboundEmail {
            to: batch.to,
            cc: batch.cc,
            from: from.to_string(),
            reply_to,
            subject: batch.subject,
            html: rendered.html,
            text: rendered.text,
        };

        debug!(
            "Sending {} batch for message {} via {} to {} recipient(s)",
            batch.kind,
            message_id,
            self.transport.name(),
            email.recipient_count()
        );

        match self.transport.send(&email).await {
            Ok(receipt) => {
                self.events.emit(RoutingEvent::BatchSent {
                    message_id,
                    kind: batch.kind,
                    recipients: recipients.len(),
                    provider_message_id: receipt.message_id.clone(),
                });
                results.sent.push(DeliveredBatch {
                    kind: batch.kind,
                    recipients,
                    message_id: receipt.message_id,
                });
            }
            Err(e) => {
                self.record_failure(results, message_id, batch.kind, recipients, e.to_string());
            }
        }
    }

    fn record_failure(
        &self,
        results: &mut EmailResults,
        message_id: Uuid,
        kind: BatchKind,
        recipients: Vec<String>,
        error: String,
    ) {
        self.events.emit(RoutingEvent::BatchFailed {
            message_id,
            kind,
            recipients: recipients.len(),
            error: error.clone(),
        });
        results.failed.push(FailedBatch {
            kind,
            recipients,
            error,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::events::RecordingEventSink;
    use crate::recipients::{NO_EMAIL_PLACEHOLDER, VACANT_POSITION_NAME};
    use crate::services::MessageRecord;
    use crate::template::{RenderedMessage, StandardTemplate};
    use crate::transport::MockTransport;
    use crate::validation::LeaveRequestFields;
    use deskmail_database::test_utils::TestDatabase;

    struct Harness {
        db: TestDatabase,
        coordinator: DeliveryCoordinator,
        transport: MockTransport,
        events: Arc<RecordingEventSink>,
        records: MessageRecordService,
    }

    struct BrokenTemplate;

    impl MessageTemplate for BrokenTemplate {
        fn render(&self, _ctx: &TemplateContext<'_>) -> Result<RenderedMessage, RoutingError> {
            Err(RoutingError::Template("missing layout".to_string()))
        }
    }

    async fn harness_with(
        directory: InMemoryDirectory,
        transport: MockTransport,
        template: Arc<dyn MessageTemplate>,
        config: DeliveryConfig,
    ) -> Harness {
        let db = TestDatabase::with_migrations().await.unwrap();
        let events = Arc::new(RecordingEventSink::new());
        let directory = Arc::new(directory);
        let resolver = RecipientResolver::new(directory.clone(), directory, events.clone());
        let records = MessageRecordService::new(db.db.clone());
        let coordinator = DeliveryCoordinator::new(
            resolver,
            records.clone(),
            Arc::new(transport.clone()),
            template,
            events.clone(),
            config,
        );
        Harness {
            db,
            coordinator,
            transport,
            events,
            records,
        }
    }

    async fn harness(directory: InMemoryDirectory, transport: MockTransport) -> Harness {
        harness_with(
            directory,
            transport,
            Arc::new(StandardTemplate),
            DeliveryConfig::default(),
        )
        .await
    }

    fn sender() -> Sender {
        Sender {
            id: Some(42),
            name: "Ravi Kumar".to_string(),
            email: "ravi@co.com".to_string(),
        }
    }

    fn request(to: &[&str], cc: &[&str]) -> ComposeRequest {
        ComposeRequest {
            request_type: "Grievance".to_string(),
            subject: "Parking".to_string(),
            message: "There are not enough parking slots.".to_string(),
            to_positions: to.iter().map(|p| p.to_string()).collect(),
            cc_positions: cc.iter().map(|p| p.to_string()).collect(),
            department: "Engineering".to_string(),
            priority: Some("High".to_string()),
            leave: None,
        }
    }

    fn engineering() -> InMemoryDirectory {
        InMemoryDirectory::new()
            .with_employee("Asha", "Rao", Some("asha@co.com"), "Team Lead", "Engineering")
            .with_employee("Dev", "One", Some("dev1@co.com"), "Developer", "Engineering")
            .with_employee("Dev", "Two", Some("dev2@co.com"), "Developer", "Engineering")
            .with_employee("Mira", "Shah", Some("mira@co.com"), "HR Manager", "Engineering")
            .with_employee("Nobody", "Mailbox", None, "Intern", "Engineering")
    }

    async fn stored(h: &Harness, id: Uuid) -> MessageRecord {
        MessageRecord::try_from(h.records.get(id).await.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_to_batch_carries_cc() {
        let h = harness(engineering(), MockTransport::new()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Team Lead"], &["HR Manager"]), &sender())
            .await
            .unwrap();

        assert_eq!(summary.sent_count, 1);
        assert_eq!(summary.failed_count, 0);
        assert_eq!(summary.email_status, EmailStatus::Sent);

        let sent = h.transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["asha@co.com"]);
        assert_eq!(sent[0].cc, Some(vec!["mira@co.com".to_string()]));
        assert_eq!(sent[0].subject, "[Grievance] Parking");
        assert_eq!(sent[0].from, "Deskmail <no-reply@deskmail.local>");
        assert_eq!(sent[0].reply_to.as_deref(), Some("ravi@co.com"));
        assert!(sent[0].text.contains("for your attention"));

        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.email_status, EmailStatus::Sent);
        assert_eq!(record.email_results.sent[0].kind, BatchKind::To);
        assert_eq!(
            record.email_results.sent[0].recipients,
            vec!["asha@co.com", "mira@co.com"]
        );
    }

    #[tokio::test]
    async fn test_cc_only_fallback_when_to_resolves_empty() {
        let h = harness(engineering(), MockTransport::new()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Intern", "Architect"], &["Developer"]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 1);
        let sent = h.transport.requests();
        assert_eq!(sent[0].to, vec!["dev1@co.com", "dev2@co.com"]);
        assert_eq!(sent[0].cc, None);
        assert!(sent[0].subject.contains("[CC]"));
        assert_eq!(sent[0].subject, "[Grievance] [CC] Parking");
        assert!(sent[0].text.contains("You are copied on"));

        // A successful CC-only batch is persisted like any other
        assert_eq!(summary.email_status, EmailStatus::Sent);
        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.email_status, EmailStatus::Sent);
        assert_eq!(record.email_results.sent.len(), 1);
        assert_eq!(record.email_results.sent[0].kind, BatchKind::CcOnly);
    }

    #[tokio::test]
    async fn test_transport_failure_on_to_batch_keeps_record() {
        let h = harness(engineering(), MockTransport::new().with_send_failure()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Team Lead"], &[]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 1);
        assert_eq!(summary.sent_count, 0);
        assert_eq!(summary.failed_count, 1);
        assert_eq!(summary.email_status, EmailStatus::Failed);

        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.email_status, EmailStatus::Failed);
        assert_eq!(record.email_results.failed.len(), 1);
        assert_eq!(record.email_results.failed[0].kind, BatchKind::To);
        assert_eq!(record.email_results.failed[0].recipients, vec!["asha@co.com"]);
        assert!(record.email_results.sent.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_on_cc_only_batch() {
        let h = harness(engineering(), MockTransport::new().with_send_failure()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Architect"], &["HR Manager"]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 1);
        assert_eq!(summary.email_status, EmailStatus::Failed);
        assert_eq!(summary.details.failed[0].kind, BatchKind::CcOnly);

        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.email_status, EmailStatus::Failed);
        assert_eq!(record.email_results.failed[0].kind, BatchKind::CcOnly);
        assert_eq!(record.email_results.failed[0].recipients, vec!["mira@co.com"]);
    }

    #[tokio::test]
    async fn test_send_failure_only_marks_its_own_record() {
        let h = harness(engineering(), MockTransport::new().with_failure_on_call(2)).await;

        let first = h
            .coordinator
            .deliver(&request(&["Team Lead"], &[]), &sender())
            .await
            .unwrap();
        let second = h
            .coordinator
            .deliver(&request(&["Team Lead"], &[]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 2);
        assert_eq!(stored(&h, first.message_id).await.email_status, EmailStatus::Sent);
        assert_eq!(
            stored(&h, second.message_id).await.email_status,
            EmailStatus::Failed
        );
    }

    #[tokio::test]
    async fn test_no_recipients_means_no_transport_call() {
        let h = harness(engineering(), MockTransport::new()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Intern"], &["Architect"]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 0);
        assert_eq!(summary.sent_count, 0);
        assert_eq!(summary.failed_count, 0);
        assert_eq!(summary.email_status, EmailStatus::NotSent);

        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.email_status, EmailStatus::NotSent);
        assert_eq!(record.recipients.len(), 1);
        assert_eq!(record.recipients[0].email, NO_EMAIL_PLACEHOLDER);
        assert_eq!(record.recipients[0].name, "Nobody Mailbox");
        assert_eq!(
            record.cc_recipients,
            vec![StoredRecipient::vacant("Architect")]
        );
    }

    #[tokio::test]
    async fn test_exactly_one_record_per_request_regardless_of_outcome() {
        for transport in [MockTransport::new(), MockTransport::new().with_send_failure()] {
            let h = harness(engineering(), transport).await;

            h.coordinator
                .deliver(&request(&["Team Lead"], &[]), &sender())
                .await
                .unwrap();

            let (_, total) = h
                .records
                .history("ravi@co.com", Default::default())
                .await
                .unwrap();
            assert_eq!(total, 1);
        }
    }

    #[tokio::test]
    async fn test_resend_creates_a_second_record() {
        let h = harness(engineering(), MockTransport::new()).await;
        let req = request(&["Team Lead"], &[]);

        let first = h.coordinator.deliver(&req, &sender()).await.unwrap();
        let second = h.coordinator.deliver(&req, &sender()).await.unwrap();

        assert_ne!(first.message_id, second.message_id);
        assert_eq!(h.transport.send_call_count(), 2);
    }

    #[tokio::test]
    async fn test_stored_recipients_match_directory_entries() {
        let directory = engineering().with_alias("Developer", "Dev One", "dev.alias@co.com");
        let h = harness(directory.clone(), MockTransport::new()).await;
        let events = Arc::new(RecordingEventSink::new());
        let shared = Arc::new(directory);
        let resolver = RecipientResolver::new(shared.clone(), shared, events);

        let summary = h
            .coordinator
            .deliver(
                &request(&["Developer", "Architect"], &["Intern", "Team Lead"]),
                &sender(),
            )
            .await
            .unwrap();
        let record = stored(&h, summary.message_id).await;

        let mut expected_to = Vec::new();
        for position in ["Developer", "Architect"] {
            expected_to.extend(resolver.directory_entries(position, "Engineering").await.unwrap());
        }
        let mut expected_cc = Vec::new();
        for position in ["Intern", "Team Lead"] {
            expected_cc.extend(resolver.directory_entries(position, "Engineering").await.unwrap());
        }

        let mut actual_to = record.recipients.clone();
        actual_to.sort();
        expected_to.sort();
        assert_eq!(actual_to, expected_to);

        let mut actual_cc = record.cc_recipients.clone();
        actual_cc.sort();
        expected_cc.sort();
        assert_eq!(actual_cc, expected_cc);

        // Storage keeps holders even when an alias overrides them for email
        assert!(record.recipients.iter().any(|r| r.email == "dev1@co.com"));
        assert!(record
            .recipients
            .iter()
            .any(|r| r.position == "Architect" && r.name == VACANT_POSITION_NAME));

        let sent = h.transport.requests();
        assert_eq!(sent[0].to, vec!["dev.alias@co.com", "dev2@co.com"]);
    }

    #[tokio::test]
    async fn test_duplicate_positions_are_not_deduplicated() {
        let h = harness(engineering(), MockTransport::new()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Team Lead", "Team Lead"], &["Team Lead"]), &sender())
            .await
            .unwrap();

        let sent = h.transport.requests();
        assert_eq!(sent[0].to, vec!["asha@co.com", "asha@co.com"]);
        assert_eq!(sent[0].cc, Some(vec!["asha@co.com".to_string()]));

        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.recipients.len(), 2);
        assert_eq!(record.cc_recipients.len(), 1);
    }

    #[tokio::test]
    async fn test_directory_error_stores_nothing() {
        let h = harness(engineering().with_failure(), MockTransport::new()).await;

        let result = h
            .coordinator
            .deliver(&request(&["Team Lead"], &[]), &sender())
            .await;

        assert!(matches!(result, Err(RoutingError::Directory(_))));
        assert_eq!(h.transport.send_call_count(), 0);
        let rows = h.db.query_sql("SELECT id FROM messages").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_validation_error_has_no_side_effects() {
        let directory = engineering();
        let h = harness(directory.clone(), MockTransport::new()).await;

        let mut req = request(&["Team Lead"], &[]);
        req.request_type = "Leave Application".to_string();

        let result = h.coordinator.deliver(&req, &sender()).await;

        assert!(result.unwrap_err().is_validation());
        assert_eq!(directory.employee_lookup_count(), 0);
        assert_eq!(directory.alias_lookup_count(), 0);
        assert!(h.events.is_empty());
        let rows = h.db.query_sql("SELECT id FROM messages").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_leave_application_round_trip() {
        let h = harness(engineering(), MockTransport::new()).await;

        let mut req = request(&["HR Manager"], &["Team Lead"]);
        req.request_type = "Leave Application".to_string();
        req.leave = Some(LeaveRequestFields {
            leave_type: Some("Casual Leave".to_string()),
            from_date: Some("2026-11-02".to_string()),
            from_session: Some("First Half".to_string()),
            to_date: Some("2026-11-03".to_string()),
            to_session: Some("Second Half".to_string()),
        });

        let summary = h.coordinator.deliver(&req, &sender()).await.unwrap();
        let record = stored(&h, summary.message_id).await;

        let leave = record.leave_details.unwrap();
        assert_eq!(leave.leave_type, "Casual Leave");
        assert!(h.transport.requests()[0].html.contains("Casual Leave"));
    }

    #[tokio::test]
    async fn test_template_failure_is_recorded_under_batch_kind() {
        let h = harness_with(
            engineering(),
            MockTransport::new(),
            Arc::new(BrokenTemplate),
            DeliveryConfig::default(),
        )
        .await;

        let summary = h
            .coordinator
            .deliver(&request(&["Intern"], &["Team Lead"]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 0);
        assert_eq!(summary.email_status, EmailStatus::Failed);
        assert_eq!(summary.details.failed[0].kind, BatchKind::CcOnly);
        assert!(summary.details.failed[0].error.contains("missing layout"));
    }

    #[tokio::test]
    async fn test_invalid_sender_config_is_system_error() {
        let config = DeliveryConfig {
            from_address: "not-an-address".to_string(),
            ..Default::default()
        };
        let h = harness_with(
            engineering(),
            MockTransport::new(),
            Arc::new(StandardTemplate),
            config,
        )
        .await;

        let summary = h
            .coordinator
            .deliver(&request(&["Team Lead"], &[]), &sender())
            .await
            .unwrap();

        assert_eq!(h.transport.send_call_count(), 0);
        assert_eq!(summary.email_status, EmailStatus::Failed);
        assert_eq!(summary.details.failed[0].kind, BatchKind::SystemError);

        let record = stored(&h, summary.message_id).await;
        assert_eq!(record.email_status, EmailStatus::Failed);
    }

    #[tokio::test]
    async fn test_events_follow_pipeline_order() {
        let h = harness(engineering(), MockTransport::new()).await;

        let summary = h
            .coordinator
            .deliver(&request(&["Team Lead"], &["HR Manager"]), &sender())
            .await
            .unwrap();

        let events = h.events.events();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], RoutingEvent::PositionResolved { .. }));
        assert!(matches!(events[1], RoutingEvent::PositionResolved { .. }));
        assert!(matches!(
            events[2],
            RoutingEvent::RecordCreated { message_id, to_positions: 1, cc_positions: 1 }
                if message_id == summary.message_id
        ));
        assert!(matches!(
            events[3],
            RoutingEvent::BatchSent { kind: BatchKind::To, recipients: 2, .. }
        ));
        assert!(matches!(
            events[4],
            RoutingEvent::RecordFinalized { email_status: EmailStatus::Sent, sent: 1, failed: 0, .. }
        ));
    }
}
