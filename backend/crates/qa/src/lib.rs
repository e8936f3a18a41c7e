//! Q&A (Questions and Answers) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Question and answer entities, repository traits
//! - `application/` - Question and answer lifecycles
//! - `infra/` - Repository impls on the `auth` units of work (PostgreSQL, memory)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every operation authorizes through `auth` inside the same unit of work
//! that reads and writes the question and answer tables.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::{AnswerLifecycle, QuestionLifecycle};
pub use error::{QaError, QaResult};
pub use infra::memory::{QaMemoryStore, QaTables};
pub use presentation::router::qa_router;
