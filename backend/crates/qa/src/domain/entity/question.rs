//! Question Entity

use chrono::{DateTime, Utc};
use kernel::id::{QuestionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question_id: QuestionId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Owner, fixed at creation
    pub user_id: UserId,
}

impl Question {
    pub fn new(content: impl Into<String>, owner: UserId) -> Self {
        Self {
            question_id: QuestionId::new(),
            content: content.into(),
            created_at: Utc::now(),
            user_id: owner,
        }
    }

    /// Replace the content; the creation time is kept
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}
