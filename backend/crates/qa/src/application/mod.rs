//! Application Layer
//!
//! Question and answer lifecycles. Every operation authorizes the bearer
//! token first, then checks the target exists, then ownership.

pub mod answer_lifecycle;
pub mod question_lifecycle;

pub use answer_lifecycle::AnswerLifecycle;
pub use question_lifecycle::QuestionLifecycle;
