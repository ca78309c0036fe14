//! SeaORM entities for the Deskmail schema

pub mod employees;
pub mod messages;
pub mod position_aliases;
