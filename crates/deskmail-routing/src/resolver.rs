//! Position resolution
//!
//! Turns a `(position, department)` pair into the mailboxes that should
//! receive mail for it. Alias overrides (mapped recipients) replace the
//! personal mailbox of any holder whose display name matches an alias name.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::directory::{AliasMappingStore, PositionDirectory};
use crate::errors::RoutingError;
use crate::events::{EventSink, RoutingEvent};
use crate::recipients::{is_deliverable_email, name_key, RecipientEntry, StoredRecipient};
use crate::types::RecipientType;

/// Email-oriented resolution of one requested position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecipients {
    pub position: String,
    pub mapped: Vec<RecipientEntry>,
    pub personal: Vec<RecipientEntry>,
    /// Holders with a usable mailbox that an alias stands in for
    pub overridden: usize,
}

impl PositionRecipients {
    /// Mapped recipients first, then personal ones
    pub fn into_entries(self) -> Vec<RecipientEntry> {
        let mut entries = self.mapped;
        entries.extend(self.personal);
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty() && self.personal.is_empty()
    }
}

#[derive(Clone)]
pub struct RecipientResolver {
    directory: Arc<dyn PositionDirectory>,
    aliases: Arc<dyn AliasMappingStore>,
    events: Arc<dyn EventSink>,
}

impl RecipientResolver {
    pub fn new(
        directory: Arc<dyn PositionDirectory>,
        aliases: Arc<dyn AliasMappingStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            directory,
            aliases,
            events,
        }
    }

    /// Resolve the mailboxes for `position` in `department`
    ///
    /// Every call performs its own lookups; requesting the same position twice
    /// resolves (and delivers to) it twice.
    pub async fn resolve(
        &self,
        position: &str,
        department: &str,
        recipient_type: RecipientType,
    ) -> Result<PositionRecipients, RoutingError> {
        let holders: Vec<_> = self
            .directory
            .find_active(position, department)
            .await?
            .into_iter()
            .filter(|employee| {
                employee
                    .email
                    .as_deref()
                    .map(is_deliverable_email)
                    .unwrap_or(false)
            })
            .collect();

        // Alias lookup is keyed by position only
        let aliases = self.aliases.find_active(position).await?;

        let (mapped, personal, overridden) = if aliases.is_empty() {
            let personal: Vec<_> = holders
                .iter()
                .map(|employee| RecipientEntry::from_employee(employee, position, recipient_type))
                .collect();
            (Vec::new(), personal, 0)
        } else {
            let alias_names: HashSet<String> = aliases
                .iter()
                .map(|alias| name_key(&alias.employee_name))
                .collect();

            let personal: Vec<_> = holders
                .iter()
                .filter(|employee| !alias_names.contains(&name_key(&employee.display_name())))
                .map(|employee| RecipientEntry::from_employee(employee, position, recipient_type))
                .collect();
            let overridden = holders.len() - personal.len();

            let mapped: Vec<_> = aliases
                .iter()
                .map(|alias| RecipientEntry::from_alias(alias, position, department, recipient_type))
                .collect();

            (mapped, personal, overridden)
        };

        debug!(
            "Resolved '{}' ({}) in '{}': {} mapped, {} personal, {} overridden",
            position,
            recipient_type,
            department,
            mapped.len(),
            personal.len(),
            overridden
        );

        self.events.emit(RoutingEvent::PositionResolved {
            position: position.to_string(),
            department: department.to_string(),
            recipient_type,
            mapped: mapped.len(),
            personal: personal.len(),
            overridden,
        });

        Ok(PositionRecipients {
            position: position.to_string(),
            mapped,
            personal,
            overridden,
        })
    }

    /// Audit-oriented resolution: one entry per holder, or a single
    /// placeholder when nobody holds the position
    pub async fn directory_entries(
        &self,
        position: &str,
        department: &str,
    ) -> Result<Vec<StoredRecipient>, RoutingError> {
        let holders = self.directory.find_active(position, department).await?;

        if holders.is_empty() {
            return Ok(vec![StoredRecipient::vacant(position)]);
        }

        Ok(holders
            .iter()
            .map(|employee| StoredRecipient::from_employee(employee, position))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::events::RecordingEventSink;
    use crate::recipients::{RecipientSource, NO_EMAIL_PLACEHOLDER, VACANT_POSITION_NAME};

    fn resolver_for(directory: InMemoryDirectory) -> (RecipientResolver, Arc<RecordingEventSink>) {
        let directory = Arc::new(directory);
        let sink = Arc::new(RecordingEventSink::new());
        let resolver = RecipientResolver::new(directory.clone(), directory, sink.clone());
        (resolver, sink)
    }

    #[tokio::test]
    async fn test_alias_overrides_matching_holder() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "HR Manager", "HR")
            .with_alias("HR Manager", "Jane Doe", "jane.alias@co.com");
        let (resolver, _) = resolver_for(directory);

        let resolved = resolver
            .resolve("HR Manager", "HR", RecipientType::To)
            .await
            .unwrap();

        assert_eq!(resolved.mapped.len(), 1);
        assert_eq!(resolved.mapped[0].email, "jane.alias@co.com");
        assert!(resolved.mapped[0].is_mapped());
        assert!(resolved.personal.is_empty());
        assert_eq!(resolved.overridden, 1);
    }

    #[tokio::test]
    async fn test_alias_match_is_case_insensitive_and_trimmed() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "HR Manager", "HR")
            .with_alias("HR Manager", "  JANE doe ", "jane.alias@co.com");
        let (resolver, _) = resolver_for(directory);

        let resolved = resolver
            .resolve("HR Manager", "HR", RecipientType::To)
            .await
            .unwrap();

        assert!(resolved.personal.is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_holders_stay_personal_alongside_aliases() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "HR Manager", "HR")
            .with_employee("Raj", "Patel", Some("raj@co.com"), "HR Manager", "HR")
            .with_alias("HR Manager", "Jane Doe", "jane.alias@co.com")
            .with_alias("HR Manager", "HR Desk", "hr.desk@co.com");
        let (resolver, _) = resolver_for(directory);

        let resolved = resolver
            .resolve("HR Manager", "HR", RecipientType::To)
            .await
            .unwrap();

        // Every alias fans out, only the matched holder is excluded
        let mapped: Vec<_> = resolved.mapped.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(mapped, vec!["jane.alias@co.com", "hr.desk@co.com"]);
        let personal: Vec<_> = resolved.personal.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(personal, vec!["raj@co.com"]);
    }

    #[tokio::test]
    async fn test_personal_equals_holders_minus_alias_names() {
        let holders = [
            ("Jane", "Doe", "jane@co.com"),
            ("Raj", "Patel", "raj@co.com"),
            ("Mei", "Lin", "mei@co.com"),
            ("Omar", "Haddad", "omar@co.com"),
        ];
        let alias_sets: [&[&str]; 4] = [
            &["Jane Doe"],
            &["raj patel", "MEI LIN"],
            &["Nobody Here"],
            &["Jane Doe", "Raj Patel", "Mei Lin", "Omar Haddad"],
        ];

        for alias_names in alias_sets {
            let mut directory = InMemoryDirectory::new();
            for (first, last, email) in holders {
                directory = directory.with_employee(first, last, Some(email), "Analyst", "Ops");
            }
            for (i, name) in alias_names.iter().enumerate() {
                directory = directory.with_alias("Analyst", name, &format!("alias{}@co.com", i));
            }
            let (resolver, _) = resolver_for(directory);

            let resolved = resolver
                .resolve("Analyst", "Ops", RecipientType::To)
                .await
                .unwrap();

            let lowered: HashSet<String> = alias_names.iter().map(|n| name_key(n)).collect();
            let expected: Vec<String> = holders
                .iter()
                .filter(|(first, last, _)| !lowered.contains(&name_key(&format!("{} {}", first, last))))
                .map(|(_, _, email)| email.to_string())
                .collect();
            let actual: Vec<String> = resolved.personal.iter().map(|r| r.email.clone()).collect();

            assert_eq!(actual, expected, "alias set {:?}", alias_names);
            assert_eq!(resolved.mapped.len(), alias_names.len());
        }
    }

    #[tokio::test]
    async fn test_no_aliases_keeps_all_active_valid_holders() {
        let directory = InMemoryDirectory::new()
            .with_employee("Ada", "Lovelace", Some("ada@co.com"), "Developer", "Engineering")
            .with_employee("Alan", "Turing", Some("alan@co.com"), "Developer", "Engineering")
            .with_inactive_employee("Old", "Timer", Some("old@co.com"), "Developer", "Engineering");
        let (resolver, _) = resolver_for(directory);

        let resolved = resolver
            .resolve("Developer", "Engineering", RecipientType::To)
            .await
            .unwrap();

        assert!(resolved.mapped.is_empty());
        let personal: Vec<_> = resolved.personal.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(personal, vec!["ada@co.com", "alan@co.com"]);
        assert!(resolved
            .personal
            .iter()
            .all(|r| r.source == RecipientSource::Employee));
    }

    #[tokio::test]
    async fn test_unusable_emails_are_dropped() {
        let directory = InMemoryDirectory::new()
            .with_employee("No", "Mail", None, "Clerk", "Admin")
            .with_employee("Bad", "Mail", Some("not-an-address"), "Clerk", "Admin")
            .with_employee("Place", "Holder", Some(NO_EMAIL_PLACEHOLDER), "Clerk", "Admin")
            .with_employee("Good", "Mail", Some("good@co.com"), "Clerk", "Admin");
        let (resolver, _) = resolver_for(directory);

        let resolved = resolver
            .resolve("Clerk", "Admin", RecipientType::Cc)
            .await
            .unwrap();

        assert_eq!(resolved.personal.len(), 1);
        assert_eq!(resolved.personal[0].email, "good@co.com");
        assert_eq!(resolved.personal[0].recipient_type, RecipientType::Cc);
    }

    #[tokio::test]
    async fn test_aliases_ignore_department() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "Manager", "Sales")
            .with_alias("Manager", "Jane Doe", "manager.alias@co.com");
        let (resolver, _) = resolver_for(directory);

        // A department with no holders still receives the alias
        let resolved = resolver
            .resolve("Manager", "Finance", RecipientType::To)
            .await
            .unwrap();

        assert_eq!(resolved.mapped.len(), 1);
        assert_eq!(resolved.mapped[0].department, "Finance");
        assert!(resolved.personal.is_empty());
    }

    #[tokio::test]
    async fn test_inactive_aliases_do_not_override() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "HR Manager", "HR")
            .with_inactive_alias("HR Manager", "Jane Doe", "jane.alias@co.com");
        let (resolver, _) = resolver_for(directory);

        let resolved = resolver
            .resolve("HR Manager", "HR", RecipientType::To)
            .await
            .unwrap();

        assert!(resolved.mapped.is_empty());
        assert_eq!(resolved.personal.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_emits_event() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "HR Manager", "HR")
            .with_alias("HR Manager", "Jane Doe", "jane.alias@co.com");
        let (resolver, sink) = resolver_for(directory);

        resolver
            .resolve("HR Manager", "HR", RecipientType::Cc)
            .await
            .unwrap();

        assert_eq!(
            sink.events(),
            vec![RoutingEvent::PositionResolved {
                position: "HR Manager".to_string(),
                department: "HR".to_string(),
                recipient_type: RecipientType::Cc,
                mapped: 1,
                personal: 0,
                overridden: 1,
            }]
        );
    }

    #[tokio::test]
    async fn test_directory_entries_placeholder_for_vacant_position() {
        let (resolver, _) = resolver_for(InMemoryDirectory::new());

        let entries = resolver
            .directory_entries("Chief Whip", "Board")
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].position, "Chief Whip");
        assert_eq!(entries[0].email, NO_EMAIL_PLACEHOLDER);
        assert_eq!(entries[0].name, VACANT_POSITION_NAME);
    }

    #[tokio::test]
    async fn test_directory_entries_include_overridden_and_mailless_holders() {
        let directory = InMemoryDirectory::new()
            .with_employee("Jane", "Doe", Some("jane@co.com"), "HR Manager", "HR")
            .with_employee("No", "Mail", None, "HR Manager", "HR")
            .with_alias("HR Manager", "Jane Doe", "jane.alias@co.com");
        let (resolver, _) = resolver_for(directory);

        let entries = resolver.directory_entries("HR Manager", "HR").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].email, "jane@co.com");
        assert_eq!(entries[0].name, "Jane Doe");
        assert!(entries[1].is_placeholder());
        assert_eq!(entries[1].name, "No Mail");
    }

    #[tokio::test]
    async fn test_directory_failure_propagates() {
        let (resolver, sink) = resolver_for(InMemoryDirectory::new().with_failure());

        let result = resolver
            .resolve("Developer", "Engineering", RecipientType::To)
            .await;

        assert!(matches!(result, Err(RoutingError::Directory(_))));
        assert!(sink.is_empty());
    }
}
