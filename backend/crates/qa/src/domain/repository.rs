//! Repository Traits
//!
//! Implemented on the same unit-of-work types as the `auth` repositories,
//! so authorization and mutation share one transaction.

use auth::domain::repository::AuthUnitOfWork;
use kernel::id::{AnswerId, QuestionId, UserId};

use crate::domain::entity::{answer::Answer, question::Question};
use crate::error::QaResult;

#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    async fn create_question(&mut self, question: &Question) -> QaResult<()>;

    /// Locks the row until the unit of work ends
    async fn find_question(&mut self, question_id: &QuestionId) -> QaResult<Option<Question>>;

    /// `None` when the question no longer exists
    async fn update_question(&mut self, question: &Question) -> QaResult<Option<Question>>;

    /// Removes the question and its answers
    async fn delete_question(&mut self, question_id: &QuestionId)
    -> QaResult<Option<Question>>;

    /// All questions in insertion order
    async fn list_questions(&mut self) -> QaResult<Vec<Question>>;

    async fn list_questions_by_owner(&mut self, user_id: &UserId) -> QaResult<Vec<Question>>;
}

#[trait_variant::make(AnswerRepository: Send)]
pub trait LocalAnswerRepository {
    async fn create_answer(&mut self, answer: &Answer) -> QaResult<()>;

    /// Locks the row until the unit of work ends
    async fn find_answer(&mut self, answer_id: &AnswerId) -> QaResult<Option<Answer>>;

    /// `None` when the answer no longer exists
    async fn update_answer(&mut self, answer: &Answer) -> QaResult<Option<Answer>>;

    async fn delete_answer(&mut self, answer_id: &AnswerId) -> QaResult<Option<Answer>>;

    /// Answers to one question in insertion order
    ///
    /// `Some(vec![])` means the question has no answers; `None` means the
    /// question itself produced no result set.
    async fn list_answers_by_question(
        &mut self,
        question_id: &QuestionId,
    ) -> QaResult<Option<Vec<Answer>>>;
}

pub trait QaUnitOfWork: AuthUnitOfWork + QuestionRepository + AnswerRepository {}

impl<T> QaUnitOfWork for T where T: AuthUnitOfWork + QuestionRepository + AnswerRepository {}
