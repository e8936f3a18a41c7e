//! Question Lifecycle

use auth::application::AuthorizeUseCase;
use auth::domain::policy::{Action, check_ownership};
use auth::AuthError;
use kernel::id::{QuestionId, UserId};

use crate::domain::entity::question::Question;
use crate::domain::repository::QaUnitOfWork;
use crate::error::{QaError, QaResult};

const QUESTION_NOT_FOUND: &str = "Entered question uuid does not exist";

#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionLifecycle {
    authorize: AuthorizeUseCase,
}

/// Malformed ids are reported the same way as unknown ones
fn parse_question_id(raw: &str) -> QaResult<QuestionId> {
    QuestionId::parse_str(raw).map_err(|_| QaError::InvalidQuestion(QUESTION_NOT_FOUND))
}

impl QuestionLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create<T>(&self, tx: &mut T, content: String, bearer: &str) -> QaResult<Question>
    where
        T: QaUnitOfWork + Send,
    {
        let requester = self
            .authorize
            .execute(tx, bearer, Action::CreateQuestion)
            .await?;

        let question = Question::new(content, requester.user_id);
        tx.create_question(&question).await?;

        tracing::info!(
            question_id = %question.question_id,
            user_id = %requester.user_id,
            "Question created"
        );
        Ok(question)
    }

    pub async fn get<T>(&self, tx: &mut T, question_id: &str, bearer: &str) -> QaResult<Question>
    where
        T: QaUnitOfWork + Send,
    {
        self.authorize
            .execute(tx, bearer, Action::AllQuestions)
            .await?;

        let question_id = parse_question_id(question_id)?;
        tx.find_question(&question_id)
            .await?
            .ok_or(QaError::InvalidQuestion(QUESTION_NOT_FOUND))
    }

    pub async fn list_all<T>(&self, tx: &mut T, bearer: &str) -> QaResult<Vec<Question>>
    where
        T: QaUnitOfWork + Send,
    {
        self.authorize
            .execute(tx, bearer, Action::AllQuestions)
            .await?;

        tx.list_questions().await
    }

    /// Questions owned by the user named in the path, not the requester
    pub async fn list_by_user<T>(
        &self,
        tx: &mut T,
        user_id: &str,
        bearer: &str,
    ) -> QaResult<Vec<Question>>
    where
        T: QaUnitOfWork + Send,
    {
        self.authorize
            .execute(tx, bearer, Action::AllQuestionsForUser)
            .await?;

        let not_found = || {
            QaError::Auth(AuthError::UserNotFound(
                "User with entered uuid whose question details are to be seen does not exist",
            ))
        };
        let user_id = UserId::parse_str(user_id).map_err(|_| not_found())?;
        let owner = tx.find_user_by_id(&user_id).await?.ok_or_else(not_found)?;

        tx.list_questions_by_owner(&owner.user_id).await
    }

    pub async fn edit<T>(
        &self,
        tx: &mut T,
        question_id: &str,
        content: String,
        bearer: &str,
    ) -> QaResult<Question>
    where
        T: QaUnitOfWork + Send,
    {
        let requester = self
            .authorize
            .execute(tx, bearer, Action::EditQuestion)
            .await?;

        let question_id = parse_question_id(question_id)?;
        let mut question = tx
            .find_question(&question_id)
            .await?
            .ok_or(QaError::InvalidQuestion(QUESTION_NOT_FOUND))?;

        check_ownership(&requester, Action::EditQuestion, &question.user_id)?;

        question.edit(content);
        let question = tx
            .update_question(&question)
            .await?
            .ok_or(QaError::InvalidQuestion(QUESTION_NOT_FOUND))?;

        tracing::info!(question_id = %question.question_id, "Question edited");
        Ok(question)
    }

    /// Owner only; admins get no override here
    pub async fn delete<T>(&self, tx: &mut T, question_id: &str, bearer: &str) -> QaResult<QuestionId>
    where
        T: QaUnitOfWork + Send,
    {
        let requester = self
            .authorize
            .execute(tx, bearer, Action::DeleteQuestion)
            .await?;

        let question_id = parse_question_id(question_id)?;
        let question = tx
            .find_question(&question_id)
            .await?
            .ok_or(QaError::InvalidQuestion(QUESTION_NOT_FOUND))?;

        check_ownership(&requester, Action::DeleteQuestion, &question.user_id)?;

        let removed = tx
            .delete_question(&question.question_id)
            .await?
            .ok_or(QaError::InvalidQuestion(QUESTION_NOT_FOUND))?;

        tracing::info!(
            question_id = %removed.question_id,
            user_id = %requester.user_id,
            "Question deleted"
        );
        Ok(removed.question_id)
    }
}
