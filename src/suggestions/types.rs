//! Types for user suggestions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::Identified;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Implemented,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::UnderReview => "under-review",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
            SuggestionStatus::Implemented => "implemented",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl SuggestionPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionPriority::Low => "low",
            SuggestionPriority::Medium => "medium",
            SuggestionPriority::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    #[default]
    Feature,
    Improvement,
    Bug,
    Other,
}

impl SuggestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::Feature => "feature",
            SuggestionCategory::Improvement => "improvement",
            SuggestionCategory::Bug => "bug",
            SuggestionCategory::Other => "other",
        }
    }
}

/// Feedback submitted by a user of the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggestion ID
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: SuggestionStatus,

    #[serde(default)]
    pub priority: SuggestionPriority,

    #[serde(default)]
    pub category: SuggestionCategory,

    /// Comments as the backend stores them; only counted here
    #[serde(default)]
    pub comments: Vec<Value>,

    /// Upvotes as the backend stores them; only counted here
    #[serde(default)]
    pub upvotes: Vec<Value>,
}

impl Suggestion {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn upvote_count(&self) -> usize {
        self.upvotes.len()
    }
}

impl Identified for Suggestion {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of a suggestion edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionInput {
    pub title: String,
    pub description: String,
    pub status: SuggestionStatus,
    pub priority: SuggestionPriority,
    pub category: SuggestionCategory,
}

/// Server-side listing filters; `None` means "all"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub status: Option<SuggestionStatus>,
    pub category: Option<SuggestionCategory>,
    pub priority: Option<SuggestionPriority>,
}

impl SuggestionQuery {
    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category".to_string(), category.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority".to_string(), priority.as_str().to_string()));
        }
        pairs
    }
}
