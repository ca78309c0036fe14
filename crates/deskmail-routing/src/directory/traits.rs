//! Directory trait definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RoutingError;
use crate::recipients::UNKNOWN_EMPLOYEE_NAME;

/// An active employee holding a position, as returned by a [`PositionDirectory`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Single-field name kept by older employee records
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: String,
}

impl DirectoryEmployee {
    /// First and last name, falling back to `name`, then to a fixed label
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default().trim();
        let last = self.last_name.as_deref().unwrap_or_default().trim();
        let composed = format!("{} {}", first, last).trim().to_string();
        if !composed.is_empty() {
            return composed;
        }

        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_EMPLOYEE_NAME.to_string(),
        }
    }
}

/// An active alias override for a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub employee_name: String,
    pub email: String,
}

/// Source of position holders
#[async_trait]
pub trait PositionDirectory: Send + Sync {
    /// Active employees holding `position` in `department`
    async fn find_active(
        &self,
        position: &str,
        department: &str,
    ) -> Result<Vec<DirectoryEmployee>, RoutingError>;
}

/// Source of position-level alias overrides
///
/// Aliases are keyed by position title only; they are shared by every
/// department that uses the same title.
#[async_trait]
pub trait AliasMappingStore: Send + Sync {
    async fn find_active(&self, position: &str) -> Result<Vec<AliasRecord>, RoutingError>;
}
