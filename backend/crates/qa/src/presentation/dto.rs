//! API DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entity::{answer::Answer, question::Question};

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRequest {
    pub content: String,
}

/// `{ id, status }` body for question mutations
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetailsResponse {
    pub id: String,
    pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.question_id.to_string(),
            content: question.content,
        }
    }
}

// ============================================================================
// Answers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEditRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetailsResponse {
    pub id: String,
    pub question_content: String,
    pub answer_content: String,
}

impl AnswerDetailsResponse {
    pub fn new(question: &Question, answer: Answer) -> Self {
        Self {
            id: answer.answer_id.to_string(),
            question_content: question.content.clone(),
            answer_content: answer.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    #[test]
    fn test_answer_details_use_camel_case() {
        let question = Question::new("Why lifetimes?", UserId::new());
        let answer = Answer::new("Borrow checking", UserId::new(), question.question_id);
        let id = answer.answer_id.to_string();

        let json = serde_json::to_value(AnswerDetailsResponse::new(&question, answer)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": id,
                "questionContent": "Why lifetimes?",
                "answerContent": "Borrow checking",
            })
        );
    }
}
