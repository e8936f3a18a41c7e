//! In-memory question and answer tables
//!
//! Stored as the extension tables of `auth`'s [`MemoryStore`], behind the
//! same lock and rollback snapshot.

use auth::infra::memory::{MemoryStore, MemoryUnitOfWork, UserCascade};
use kernel::id::{AnswerId, QuestionId, UserId};

use crate::domain::entity::{answer::Answer, question::Question};
use crate::domain::repository::{AnswerRepository, QuestionRepository};
use crate::error::QaResult;

#[derive(Debug, Clone, Default)]
pub struct QaTables {
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

pub type QaMemoryStore = MemoryStore<QaTables>;

impl UserCascade for QaTables {
    fn remove_user(&mut self, user_id: &UserId) {
        let removed: Vec<QuestionId> = self
            .questions
            .iter()
            .filter(|q| q.user_id == *user_id)
            .map(|q| q.question_id)
            .collect();

        self.questions.retain(|q| q.user_id != *user_id);
        self.answers
            .retain(|a| a.user_id != *user_id && !removed.contains(&a.question_id));
    }
}

impl QuestionRepository for MemoryUnitOfWork<QaTables> {
    async fn create_question(&mut self, question: &Question) -> QaResult<()> {
        self.ext().questions.push(question.clone());
        Ok(())
    }

    async fn find_question(&mut self, question_id: &QuestionId) -> QaResult<Option<Question>> {
        Ok(self
            .ext()
            .questions
            .iter()
            .find(|q| q.question_id == *question_id)
            .cloned())
    }

    async fn update_question(&mut self, question: &Question) -> QaResult<Option<Question>> {
        Ok(self
            .ext()
            .questions
            .iter_mut()
            .find(|q| q.question_id == question.question_id)
            .map(|stored| {
                *stored = question.clone();
                stored.clone()
            }))
    }

    async fn delete_question(&mut self, question_id: &QuestionId) -> QaResult<Option<Question>> {
        let tables = self.ext();
        let Some(pos) = tables
            .questions
            .iter()
            .position(|q| q.question_id == *question_id)
        else {
            return Ok(None);
        };

        let question = tables.questions.remove(pos);
        tables.answers.retain(|a| a.question_id != *question_id);
        Ok(Some(question))
    }

    async fn list_questions(&mut self) -> QaResult<Vec<Question>> {
        Ok(self.ext().questions.clone())
    }

    async fn list_questions_by_owner(&mut self, user_id: &UserId) -> QaResult<Vec<Question>> {
        Ok(self
            .ext()
            .questions
            .iter()
            .filter(|q| q.user_id == *user_id)
            .cloned()
            .collect())
    }
}

impl AnswerRepository for MemoryUnitOfWork<QaTables> {
    async fn create_answer(&mut self, answer: &Answer) -> QaResult<()> {
        self.ext().answers.push(answer.clone());
        Ok(())
    }

    async fn find_answer(&mut self, answer_id: &AnswerId) -> QaResult<Option<Answer>> {
        Ok(self
            .ext()
            .answers
            .iter()
            .find(|a| a.answer_id == *answer_id)
            .cloned())
    }

    async fn update_answer(&mut self, answer: &Answer) -> QaResult<Option<Answer>> {
        Ok(self
            .ext()
            .answers
            .iter_mut()
            .find(|a| a.answer_id == answer.answer_id)
            .map(|stored| {
                *stored = answer.clone();
                stored.clone()
            }))
    }

    async fn delete_answer(&mut self, answer_id: &AnswerId) -> QaResult<Option<Answer>> {
        let answers = &mut self.ext().answers;
        Ok(answers
            .iter()
            .position(|a| a.answer_id == *answer_id)
            .map(|pos| answers.remove(pos)))
    }

    async fn list_answers_by_question(
        &mut self,
        question_id: &QuestionId,
    ) -> QaResult<Option<Vec<Answer>>> {
        let tables = self.ext();
        if !tables.questions.iter().any(|q| q.question_id == *question_id) {
            return Ok(None);
        }

        Ok(Some(
            tables
                .answers
                .iter()
                .filter(|a| a.question_id == *question_id)
                .cloned()
                .collect(),
        ))
    }
}
