//! Answer Lifecycle

use auth::application::AuthorizeUseCase;
use auth::domain::policy::{Action, check_ownership};
use kernel::id::{AnswerId, QuestionId};

use crate::domain::entity::{answer::Answer, question::Question};
use crate::domain::repository::QaUnitOfWork;
use crate::error::{QaError, QaResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerLifecycle {
    authorize: AuthorizeUseCase,
}

fn parse_answer_id(raw: &str) -> QaResult<AnswerId> {
    AnswerId::parse_str(raw).map_err(|_| QaError::AnswerNotFound)
}

/// `None` from the store is an error; an empty list is not
fn answers_or_not_found(answers: Option<Vec<Answer>>) -> QaResult<Vec<Answer>> {
    answers.ok_or(QaError::NoAnswersForQuestion)
}

impl AnswerLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create<T>(
        &self,
        tx: &mut T,
        content: String,
        question_id: &str,
        bearer: &str,
    ) -> QaResult<Answer>
    where
        T: QaUnitOfWork + Send,
    {
        let requester = self
            .authorize
            .execute(tx, bearer, Action::CreateAnswer)
            .await?;

        let invalid = || QaError::InvalidQuestion("The question entered is invalid");
        let question_id = QuestionId::parse_str(question_id).map_err(|_| invalid())?;
        let question = tx.find_question(&question_id).await?.ok_or_else(invalid)?;

        let answer = Answer::new(content, requester.user_id, question.question_id);
        tx.create_answer(&answer).await?;

        tracing::info!(
            answer_id = %answer.answer_id,
            question_id = %answer.question_id,
            user_id = %requester.user_id,
            "Answer created"
        );
        Ok(answer)
    }

    pub async fn edit<T>(
        &self,
        tx: &mut T,
        answer_id: &str,
        content: String,
        bearer: &str,
    ) -> QaResult<Answer>
    where
        T: QaUnitOfWork + Send,
    {
        let requester = self
            .authorize
            .execute(tx, bearer, Action::EditAnswer)
            .await?;

        let answer_id = parse_answer_id(answer_id)?;
        let mut answer = tx
            .find_answer(&answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        check_ownership(&requester, Action::EditAnswer, &answer.user_id)?;

        answer.edit(content);
        let answer = tx
            .update_answer(&answer)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        tracing::info!(answer_id = %answer.answer_id, "Answer edited");
        Ok(answer)
    }

    /// Owner or any admin
    pub async fn delete<T>(&self, tx: &mut T, answer_id: &str, bearer: &str) -> QaResult<AnswerId>
    where
        T: QaUnitOfWork + Send,
    {
        let requester = self
            .authorize
            .execute(tx, bearer, Action::DeleteAnswer)
            .await?;

        let answer_id = parse_answer_id(answer_id)?;
        let answer = tx
            .find_answer(&answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        check_ownership(&requester, Action::DeleteAnswer, &answer.user_id)?;

        let removed = tx
            .delete_answer(&answer.answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        tracing::info!(
            answer_id = %removed.answer_id,
            user_id = %requester.user_id,
            by_admin = requester.user_id != removed.user_id,
            "Answer deleted"
        );
        Ok(removed.answer_id)
    }

    /// The question with its answers in insertion order
    pub async fn list_for_question<T>(
        &self,
        tx: &mut T,
        question_id: &str,
        bearer: &str,
    ) -> QaResult<(Question, Vec<Answer>)>
    where
        T: QaUnitOfWork + Send,
    {
        self.authorize
            .execute(tx, bearer, Action::GetAllAnswersToQuestion)
            .await?;

        let not_found = || {
            QaError::InvalidQuestion(
                "The question with entered uuid whose details are to be seen does not exist",
            )
        };
        let question_id = QuestionId::parse_str(question_id).map_err(|_| not_found())?;
        let question = tx.find_question(&question_id).await?.ok_or_else(not_found)?;

        // find_question above locked the question for this unit of work, so
        // None only comes from a store that drops that guarantee
        let answers = answers_or_not_found(tx.list_answers_by_question(&question_id).await?)?;
        Ok((question, answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    #[test]
    fn test_empty_answer_list_is_not_an_error() {
        assert!(answers_or_not_found(Some(Vec::new())).unwrap().is_empty());

        let answer = Answer::new("42", UserId::new(), QuestionId::new());
        assert_eq!(answers_or_not_found(Some(vec![answer])).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_result_set_is_othr_001() {
        let err = answers_or_not_found(None).unwrap_err();
        assert!(matches!(err, QaError::NoAnswersForQuestion));
        assert_eq!(err.code(), Some("OTHR-001"));
    }
}
