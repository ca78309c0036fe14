//! Messages entity
//!
//! One row per submitted request. The row is inserted before delivery with
//! `email_status = "Not Sent"` and updated exactly once with the outcome.

use async_trait::async_trait;
use deskmail_core::DBDateTime;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sender_id: Option<i32>,
    pub sender_name: String,
    pub sender_email: String,
    pub request_type: String,
    pub subject: String,
    pub body: String,
    /// `[{position, email, name}]` for every TO position
    #[sea_orm(column_type = "JsonBinary")]
    pub recipients: Json,
    /// `[{position, email, name}]` for every CC position
    #[sea_orm(column_type = "JsonBinary")]
    pub cc_recipients: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub to_positions: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub cc_positions: Json,
    pub priority: String,
    pub department: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub leave_details: Option<Json>,
    pub status: String,
    pub email_status: String,
    /// `{sent: [...], failed: [...]}`
    #[sea_orm(column_type = "JsonBinary")]
    pub email_results: Json,
    pub created_at: DBDateTime,
    pub updated_at: DBDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = deskmail_core::db_now();

        if insert {
            if self.created_at.is_not_set() {
                self.created_at = Set(now);
            }
            if self.updated_at.is_not_set() {
                self.updated_at = Set(now);
            }
        } else {
            self.updated_at = Set(now);
        }

        Ok(self)
    }
}
