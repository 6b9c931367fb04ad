//! Types for the chatbot knowledge base and query console

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One question/answer entry of the chatbot's knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,

    #[serde(default = "QaPair::default_category")]
    pub category: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default = "QaPair::default_language")]
    pub language: String,
}

impl QaPair {
    pub(crate) fn default_category() -> String {
        "general".to_string()
    }

    pub(crate) fn default_language() -> String {
        "en".to_string()
    }

    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            category: Self::default_category(),
            keywords: Vec::new(),
            language: Self::default_language(),
        }
    }
}

/// What the backend made of a test query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default)]
    pub intents: Vec<String>,

    #[serde(default)]
    pub key_phrases: Vec<String>,

    /// Entity type to the values found for it
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<String>>,
}

/// A knowledge base entry considered for a test query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaMatch {
    pub question: String,
    pub answer: String,
    pub score: f64,
}

/// Response to a test query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// The chatbot's reply
    pub message: String,

    /// Confidence in the reply, 0 to 1
    pub confidence: f64,

    #[serde(default)]
    pub analysis: Analysis,

    #[serde(default)]
    pub matches: Vec<QaMatch>,
}

impl TestResult {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }

    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceBand::High
        } else if confidence >= 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    /// Low-confidence replies come with tips for improving the knowledge base
    pub fn needs_tips(&self) -> bool {
        *self == ConfidenceBand::Low
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TestQuery<'a> {
    pub message: &'a str,
}
