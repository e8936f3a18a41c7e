//! Infrastructure Layer
//!
//! Repository impls for the unit-of-work types defined in `auth::infra`.

pub mod memory;
pub mod postgres;

pub use memory::{QaMemoryStore, QaTables};
