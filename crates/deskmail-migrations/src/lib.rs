//! Database migrations for the Deskmail schema

pub use sea_orm_migration::prelude::*;

mod migration;
pub use migration::Migrator;
