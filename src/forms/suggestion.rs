use super::catalog::required;
use super::Draft;
use crate::error::{Error, Result};
use crate::suggestions::{
    Suggestion, SuggestionCategory, SuggestionInput, SuggestionPriority, SuggestionStatus,
};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Moderator's edit of a suggestion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionDraft {
    pub title: String,
    pub description: String,
    pub status: SuggestionStatus,
    pub priority: SuggestionPriority,
    pub category: SuggestionCategory,
}

impl From<&Suggestion> for SuggestionDraft {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            title: suggestion.title.clone(),
            description: suggestion.description.clone(),
            status: suggestion.status,
            priority: suggestion.priority,
            category: suggestion.category,
        }
    }
}

fn bounded(text: &str, max: usize, missing: &str, field: &str) -> Result<String> {
    let text = required(text, missing)?;
    if text.chars().count() > max {
        return Err(Error::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(text)
}

impl Draft for SuggestionDraft {
    type Payload = SuggestionInput;

    fn validate(&self) -> Result<SuggestionInput> {
        Ok(SuggestionInput {
            title: bounded(&self.title, TITLE_MAX_CHARS, "Please provide a title", "Title")?,
            description: bounded(
                &self.description,
                DESCRIPTION_MAX_CHARS,
                "Please provide a description",
                "Description",
            )?,
            status: self.status,
            priority: self.priority,
            category: self.category,
        })
    }
}
