//! Recipient directories: who holds a position, and which aliases override it

mod database;
mod traits;

#[cfg(test)]
pub mod memory;

pub use database::{DbAliasMappingStore, DbPositionDirectory};
pub use traits::*;

#[cfg(test)]
pub use memory::InMemoryDirectory;
