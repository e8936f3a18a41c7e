//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{answer::Answer, question::Question};
pub use repository::{AnswerRepository, QaUnitOfWork, QuestionRepository};
