//! HTTP Handlers
//!
//! Same shape as the `auth` handlers: begin, run one lifecycle operation,
//! commit. An early `?` drops the unit of work and rolls it back.

use auth::domain::repository::{TransactionManager, UnitOfWork};
use auth::presentation::BearerToken;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{AnswerLifecycle, QuestionLifecycle};
use crate::domain::repository::QaUnitOfWork;
use crate::error::QaResult;
use crate::presentation::dto::{
    AnswerDetailsResponse, AnswerEditRequest, AnswerRequest, AnswerResponse,
    QuestionDetailsResponse, QuestionRequest, QuestionResponse,
};

#[derive(Clone)]
pub struct QaAppState<S> {
    pub store: S,
}

// ============================================================================
// Questions
// ============================================================================

/// POST /question/create
pub async fn create_question<S>(
    State(state): State<QaAppState<S>>,
    bearer: BearerToken,
    Json(req): Json<QuestionRequest>,
) -> QaResult<impl IntoResponse>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let question = QuestionLifecycle::new()
        .create(&mut tx, req.content, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionResponse {
            id: question.question_id.to_string(),
            status: "QUESTION CREATED",
        }),
    ))
}

/// GET /question/all
pub async fn all_questions<S>(
    State(state): State<QaAppState<S>>,
    bearer: BearerToken,
) -> QaResult<Json<Vec<QuestionDetailsResponse>>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let questions = QuestionLifecycle::new()
        .list_all(&mut tx, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

/// GET /question/{question_id}
pub async fn get_question<S>(
    State(state): State<QaAppState<S>>,
    Path(question_id): Path<String>,
    bearer: BearerToken,
) -> QaResult<Json<QuestionDetailsResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let question = QuestionLifecycle::new()
        .get(&mut tx, &question_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(question.into()))
}

/// PUT /question/edit/{question_id}
pub async fn edit_question<S>(
    State(state): State<QaAppState<S>>,
    Path(question_id): Path<String>,
    bearer: BearerToken,
    Json(req): Json<QuestionRequest>,
) -> QaResult<Json<QuestionResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let question = QuestionLifecycle::new()
        .edit(&mut tx, &question_id, req.content, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(QuestionResponse {
        id: question.question_id.to_string(),
        status: "QUESTION EDITED",
    }))
}

/// DELETE /question/delete/{question_id}
pub async fn delete_question<S>(
    State(state): State<QaAppState<S>>,
    Path(question_id): Path<String>,
    bearer: BearerToken,
) -> QaResult<Json<QuestionResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let question_id = QuestionLifecycle::new()
        .delete(&mut tx, &question_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(QuestionResponse {
        id: question_id.to_string(),
        status: "QUESTION DELETED",
    }))
}

/// GET /question/all/{user_id}
pub async fn questions_by_user<S>(
    State(state): State<QaAppState<S>>,
    Path(user_id): Path<String>,
    bearer: BearerToken,
) -> QaResult<Json<Vec<QuestionDetailsResponse>>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let questions = QuestionLifecycle::new()
        .list_by_user(&mut tx, &user_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(questions.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Answers
// ============================================================================

/// POST /question/{question_id}/answer/create
pub async fn create_answer<S>(
    State(state): State<QaAppState<S>>,
    Path(question_id): Path<String>,
    bearer: BearerToken,
    Json(req): Json<AnswerRequest>,
) -> QaResult<impl IntoResponse>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let answer = AnswerLifecycle::new()
        .create(&mut tx, req.answer, &question_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(AnswerResponse {
            id: answer.answer_id.to_string(),
            status: "ANSWER CREATED",
        }),
    ))
}

/// PUT /answer/edit/{answer_id}
pub async fn edit_answer<S>(
    State(state): State<QaAppState<S>>,
    Path(answer_id): Path<String>,
    bearer: BearerToken,
    Json(req): Json<AnswerEditRequest>,
) -> QaResult<Json<AnswerResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let answer = AnswerLifecycle::new()
        .edit(&mut tx, &answer_id, req.content, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(AnswerResponse {
        id: answer.answer_id.to_string(),
        status: "ANSWER EDITED",
    }))
}

/// DELETE /answer/delete/{answer_id}
pub async fn delete_answer<S>(
    State(state): State<QaAppState<S>>,
    Path(answer_id): Path<String>,
    bearer: BearerToken,
) -> QaResult<Json<AnswerResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let answer_id = AnswerLifecycle::new()
        .delete(&mut tx, &answer_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(AnswerResponse {
        id: answer_id.to_string(),
        status: "ANSWER DELETED",
    }))
}

/// GET /answer/all/{question_id}
pub async fn answers_for_question<S>(
    State(state): State<QaAppState<S>>,
    Path(question_id): Path<String>,
    bearer: BearerToken,
) -> QaResult<Json<Vec<AnswerDetailsResponse>>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let (question, answers) = AnswerLifecycle::new()
        .list_for_question(&mut tx, &question_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(
        answers
            .into_iter()
            .map(|answer| AnswerDetailsResponse::new(&question, answer))
            .collect(),
    ))
}
