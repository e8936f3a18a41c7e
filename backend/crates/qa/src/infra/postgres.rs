//! PostgreSQL Repository Implementations
//!
//! Implemented on `auth`'s [`PgUnitOfWork`], so questions and answers are
//! written in the same transaction as the token check that guarded them.

use auth::infra::postgres::PgUnitOfWork;
use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, QuestionId, UserId};
use uuid::Uuid;

use crate::domain::entity::{answer::Answer, question::Question};
use crate::domain::repository::{AnswerRepository, QuestionRepository};
use crate::error::QaResult;

// ============================================================================
// Question Repository Implementation
// ============================================================================

impl QuestionRepository for PgUnitOfWork {
    async fn create_question(&mut self, question: &Question) -> QaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO questions (uuid, content, created_at, user_uuid)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(question.question_id.as_uuid())
        .bind(&question.content)
        .bind(question.created_at)
        .bind(question.user_id.as_uuid())
        .execute(self.conn())
        .await?;

        Ok(())
    }

    async fn find_question(&mut self, question_id: &QuestionId) -> QaResult<Option<Question>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            "SELECT uuid, content, created_at, user_uuid FROM questions WHERE uuid = $1 FOR UPDATE",
        )
        .bind(question_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(QuestionRow::into_question))
    }

    async fn update_question(&mut self, question: &Question) -> QaResult<Option<Question>> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            UPDATE questions SET content = $2
            WHERE uuid = $1
            RETURNING uuid, content, created_at, user_uuid
            "#,
        )
        .bind(question.question_id.as_uuid())
        .bind(&question.content)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(QuestionRow::into_question))
    }

    async fn delete_question(&mut self, question_id: &QuestionId) -> QaResult<Option<Question>> {
        // answers go with the FK cascade
        let row = sqlx::query_as::<_, QuestionRow>(
            "DELETE FROM questions WHERE uuid = $1 RETURNING uuid, content, created_at, user_uuid",
        )
        .bind(question_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(QuestionRow::into_question))
    }

    async fn list_questions(&mut self) -> QaResult<Vec<Question>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            "SELECT uuid, content, created_at, user_uuid FROM questions ORDER BY id",
        )
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(QuestionRow::into_question).collect())
    }

    async fn list_questions_by_owner(&mut self, user_id: &UserId) -> QaResult<Vec<Question>> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT uuid, content, created_at, user_uuid
            FROM questions
            WHERE user_uuid = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(self.conn())
        .await?;

        Ok(rows.into_iter().map(QuestionRow::into_question).collect())
    }
}

// ============================================================================
// Answer Repository Implementation
// ============================================================================

impl AnswerRepository for PgUnitOfWork {
    async fn create_answer(&mut self, answer: &Answer) -> QaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO answers (uuid, content, created_at, user_uuid, question_uuid)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(answer.answer_id.as_uuid())
        .bind(&answer.content)
        .bind(answer.created_at)
        .bind(answer.user_id.as_uuid())
        .bind(answer.question_id.as_uuid())
        .execute(self.conn())
        .await?;

        Ok(())
    }

    async fn find_answer(&mut self, answer_id: &AnswerId) -> QaResult<Option<Answer>> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT uuid, content, created_at, user_uuid, question_uuid
            FROM answers
            WHERE uuid = $1
            FOR UPDATE
            "#,
        )
        .bind(answer_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(AnswerRow::into_answer))
    }

    async fn update_answer(&mut self, answer: &Answer) -> QaResult<Option<Answer>> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            UPDATE answers SET content = $2, created_at = $3
            WHERE uuid = $1
            RETURNING uuid, content, created_at, user_uuid, question_uuid
            "#,
        )
        .bind(answer.answer_id.as_uuid())
        .bind(&answer.content)
        .bind(answer.created_at)
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(AnswerRow::into_answer))
    }

    async fn delete_answer(&mut self, answer_id: &AnswerId) -> QaResult<Option<Answer>> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            DELETE FROM answers
            WHERE uuid = $1
            RETURNING uuid, content, created_at, user_uuid, question_uuid
            "#,
        )
        .bind(answer_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        Ok(row.map(AnswerRow::into_answer))
    }

    async fn list_answers_by_question(
        &mut self,
        question_id: &QuestionId,
    ) -> QaResult<Option<Vec<Answer>>> {
        // LEFT JOIN from the question: no rows at all means no such question,
        // a single all-NULL answer row means it has no answers
        let rows = sqlx::query_as::<_, QuestionAnswerRow>(
            r#"
            SELECT
                q.uuid AS question_uuid,
                a.uuid,
                a.content,
                a.created_at,
                a.user_uuid
            FROM questions q
            LEFT JOIN answers a ON a.question_uuid = q.uuid
            WHERE q.uuid = $1
            ORDER BY a.id
            "#,
        )
        .bind(question_id.as_uuid())
        .fetch_all(self.conn())
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            rows.into_iter()
                .filter_map(QuestionAnswerRow::into_answer)
                .collect(),
        ))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct QuestionRow {
    uuid: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    user_uuid: Uuid,
}

impl QuestionRow {
    fn into_question(self) -> Question {
        Question {
            question_id: QuestionId::from_uuid(self.uuid),
            content: self.content,
            created_at: self.created_at,
            user_id: UserId::from_uuid(self.user_uuid),
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    uuid: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    user_uuid: Uuid,
    question_uuid: Uuid,
}

impl AnswerRow {
    fn into_answer(self) -> Answer {
        Answer {
            answer_id: AnswerId::from_uuid(self.uuid),
            content: self.content,
            created_at: self.created_at,
            user_id: UserId::from_uuid(self.user_uuid),
            question_id: QuestionId::from_uuid(self.question_uuid),
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionAnswerRow {
    question_uuid: Uuid,
    uuid: Option<Uuid>,
    content: Option<String>,
    created_at: Option<DateTime<Utc>>,
    user_uuid: Option<Uuid>,
}

impl QuestionAnswerRow {
    fn into_answer(self) -> Option<Answer> {
        Some(Answer {
            answer_id: AnswerId::from_uuid(self.uuid?),
            content: self.content?,
            created_at: self.created_at?,
            user_id: UserId::from_uuid(self.user_uuid?),
            question_id: QuestionId::from_uuid(self.question_uuid),
        })
    }
}
