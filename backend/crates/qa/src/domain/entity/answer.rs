//! Answer Entity

use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, QuestionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer_id: AnswerId,
    pub content: String,
    /// Creation time, refreshed on every edit
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
    pub question_id: QuestionId,
}

impl Answer {
    pub fn new(content: impl Into<String>, owner: UserId, question_id: QuestionId) -> Self {
        Self {
            answer_id: AnswerId::new(),
            content: content.into(),
            created_at: Utc::now(),
            user_id: owner,
            question_id,
        }
    }

    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.created_at = Utc::now();
    }
}
