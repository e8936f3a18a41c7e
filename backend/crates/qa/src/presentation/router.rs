//! Q&A Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use auth::domain::repository::TransactionManager;

use crate::domain::repository::QaUnitOfWork;
use crate::presentation::handlers::{self, QaAppState};

pub fn qa_router<S>(store: S) -> Router
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: QaUnitOfWork,
{
    let state = QaAppState { store };

    Router::new()
        .route("/question/create", post(handlers::create_question::<S>))
        .route("/question/all", get(handlers::all_questions::<S>))
        .route("/question/all/{user_id}", get(handlers::questions_by_user::<S>))
        .route("/question/{question_id}", get(handlers::get_question::<S>))
        .route(
            "/question/edit/{question_id}",
            put(handlers::edit_question::<S>),
        )
        .route(
            "/question/delete/{question_id}",
            delete(handlers::delete_question::<S>),
        )
        .route(
            "/question/{question_id}/answer/create",
            post(handlers::create_answer::<S>),
        )
        .route("/answer/edit/{answer_id}", put(handlers::edit_answer::<S>))
        .route(
            "/answer/delete/{answer_id}",
            delete(handlers::delete_answer::<S>),
        )
        .route(
            "/answer/all/{question_id}",
            get(handlers::answers_for_question::<S>),
        )
        .with_state(state)
}
