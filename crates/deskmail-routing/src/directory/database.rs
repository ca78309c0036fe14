//! SeaORM-backed directories

use async_trait::async_trait;
use deskmail_entities::{employees, position_aliases};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::{AliasMappingStore, AliasRecord, DirectoryEmployee, PositionDirectory};
use crate::errors::RoutingError;
use crate::recipients::is_deliverable_email;

fn directory_error(err: sea_orm::DbErr) -> RoutingError {
    RoutingError::Directory(err.to_string())
}

/// Reads position holders from the `employees` table
#[derive(Clone)]
pub struct DbPositionDirectory {
    db: Arc<DatabaseConnection>,
}

impl DbPositionDirectory {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PositionDirectory for DbPositionDirectory {
    async fn find_active(
        &self,
        position: &str,
        department: &str,
    ) -> Result<Vec<DirectoryEmployee>, RoutingError> {
        let rows = employees::Entity::find()
            .filter(employees::Column::Position.eq(position))
            .filter(employees::Column::Department.eq(department))
            .filter(employees::Column::IsActive.eq(true))
            .order_by_asc(employees::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(directory_error)?;

        debug!(
            "Directory lookup for '{}' in '{}' returned {} employee(s)",
            position,
            department,
            rows.len()
        );

        Ok(rows
            .into_iter()
            .map(|row| DirectoryEmployee {
                first_name: row.first_name,
                last_name: row.last_name,
                name: row.name,
                email: row.email,
                department: row.department,
            })
            .collect())
    }
}

/// Reads and administers alias overrides in the `position_aliases` table
#[derive(Clone)]
pub struct DbAliasMappingStore {
    db: Arc<DatabaseConnection>,
}

impl DbAliasMappingStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Register a new active alias for `position`
    pub async fn create(
        &self,
        position: &str,
        employee_name: &str,
        email: &str,
    ) -> Result<position_aliases::Model, RoutingError> {
        let position = position.trim();
        let employee_name = employee_name.trim();
        let email = email.trim();

        if position.is_empty() {
            return Err(RoutingError::Validation("Position is required".to_string()));
        }
        if employee_name.is_empty() {
            return Err(RoutingError::Validation(
                "Alias employee name is required".to_string(),
            ));
        }
        if !is_deliverable_email(email) {
            return Err(RoutingError::Validation(format!(
                "Invalid alias email address: {}",
                email
            )));
        }

        let alias = position_aliases::ActiveModel {
            position: Set(position.to_string()),
            employee_name: Set(employee_name.to_string()),
            email: Set(email.to_string()),
            is_active: Set(true),
            ..Default::default()
        };

        let model = alias.insert(self.db.as_ref()).await?;
        info!(
            "Created alias {} for position '{}' -> {}",
            model.id, model.position, model.email
        );
        Ok(model)
    }

    /// Deactivate an alias; inactive aliases no longer override delivery
    pub async fn deactivate(&self, id: i32) -> Result<position_aliases::Model, RoutingError> {
        let alias = position_aliases::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RoutingError::AliasNotFound(id))?;

        let mut active_model: position_aliases::ActiveModel = alias.into();
        active_model.is_active = Set(false);
        let model = active_model.update(self.db.as_ref()).await?;

        info!("Deactivated alias {} for position '{}'", id, model.position);
        Ok(model)
    }

    /// All aliases for `position`, active or not, oldest first
    pub async fn list_for_position(
        &self,
        position: &str,
    ) -> Result<Vec<position_aliases::Model>, RoutingError> {
        Ok(position_aliases::Entity::find()
            .filter(position_aliases::Column::Position.eq(position.trim()))
            .order_by_asc(position_aliases::Column::Id)
            .all(self.db.as_ref())
            .await?)
    }
}

#[async_trait]
impl AliasMappingStore for DbAliasMappingStore {
    async fn find_active(&self, position: &str) -> Result<Vec<AliasRecord>, RoutingError> {
        let rows = position_aliases::Entity::find()
            .filter(position_aliases::Column::Position.eq(position))
            .filter(position_aliases::Column::IsActive.eq(true))
            .order_by_asc(position_aliases::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(directory_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AliasRecord {
                employee_name: row.employee_name,
                email: row.email,
            })
            .collect())
    }
}
