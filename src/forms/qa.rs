use super::catalog::required;
use super::{Draft, Form, Notification};
use crate::chatbot::{ChatbotClient, QaPair};
use crate::error::Result;

/// Manual entry of one QA pair
#[derive(Debug, Clone, PartialEq)]
pub struct QaPairDraft {
    pub question: String,
    pub answer: String,
    pub category: String,
    /// Comma-separated
    pub keywords: String,
    pub language: String,
}

impl Default for QaPairDraft {
    fn default() -> Self {
        Self {
            question: String::new(),
            answer: String::new(),
            category: QaPair::default_category(),
            keywords: String::new(),
            language: QaPair::default_language(),
        }
    }
}

impl QaPairDraft {
    /// Keywords split on commas, trimmed, blanks dropped
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Draft for QaPairDraft {
    type Payload = QaPair;

    fn validate(&self) -> Result<QaPair> {
        Ok(QaPair {
            question: required(&self.question, "Please provide a question")?,
            answer: required(&self.answer, "Please provide an answer")?,
            category: required(&self.category, "Please provide a category")?,
            keywords: self.keyword_list(),
            language: required(&self.language, "Please provide a language")?,
        })
    }
}

impl Form<QaPairDraft> {
    /// Import the drafted pair. On success the form is reset for the next entry.
    pub async fn submit_to(&mut self, chatbot: &ChatbotClient) -> Notification {
        let pair = match self.begin_submit() {
            Ok(pair) => pair,
            Err(notification) => return notification,
        };
        let result = chatbot.import(std::slice::from_ref(&pair)).await.map(|_| ());
        let notification = self.finish_submit(result, "QA pair added successfully".to_string());
        if notification.is_success() {
            self.update(|_| QaPairDraft::default());
        }
        notification
    }
}
