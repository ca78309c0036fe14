//! Employees entity
//!
//! Employees are owned by the HR side of the system; the routing engine only
//! reads them to find who currently holds a position in a department.

use async_trait::async_trait;
use deskmail_core::DBDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Legacy single-field name, used when first/last are absent
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: String,
    pub department: String,
    pub is_active: bool,
    pub created_at: DBDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(deskmail_core::db_now());
        }
        Ok(self)
    }
}
