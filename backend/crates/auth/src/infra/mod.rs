//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::{MemoryStore, MemoryTables, MemoryUnitOfWork, UserCascade};
pub use postgres::{PgStore, PgUnitOfWork};
