//! Chatbot knowledge base import and query testing

mod types;

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{Action, Error, Operation, Result};
use crate::fetch::ApiClient;

pub use types::*;

const IMPORT: Operation = Operation::new(Action::Import, "QA pairs");
const TEST: Operation = Operation::new(Action::Test, "query");

/// Client for `/chatbot`
#[derive(Debug, Clone)]
pub struct ChatbotClient {
    api: ApiClient,
}

impl ChatbotClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Add QA pairs to the knowledge base, returning what the backend stored
    pub async fn import(&self, pairs: &[QaPair]) -> Result<Vec<QaPair>> {
        validate_pairs(pairs)?;
        let imported: Vec<QaPair> = self
            .api
            .post(self.api.endpoint(&["chatbot", "import"])?, IMPORT)
            .json(pairs)?
            .execute()
            .await?;
        debug!(count = imported.len(), "QA pairs imported");
        Ok(imported)
    }

    /// Import the QA pairs of a JSON file
    pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<Vec<QaPair>> {
        let pairs = read_import_file(path).await?;
        self.import(&pairs).await
    }

    /// Ask the chatbot a question and get its reply with the analysis behind it.
    ///
    /// Blank messages are rejected without a request.
    pub async fn test(&self, message: &str) -> Result<TestResult> {
        if message.trim().is_empty() {
            return Err(Error::validation("Please enter a query"));
        }
        self.api
            .post(self.api.endpoint(&["chatbot", "test"])?, TEST)
            .json(&TestQuery { message })?
            .execute()
            .await
    }
}

fn validate_pairs(pairs: &[QaPair]) -> Result<()> {
    if pairs.is_empty() {
        return Err(Error::validation("File must contain an array of QA pairs"));
    }
    if pairs
        .iter()
        .any(|p| p.question.trim().is_empty() || p.answer.trim().is_empty())
    {
        return Err(Error::validation(
            "All QA pairs must have 'question' and 'answer' fields",
        ));
    }
    Ok(())
}

/// Parse the contents of an import file: a JSON array of QA pairs
pub fn parse_import_file(content: &str) -> Result<Vec<QaPair>> {
    let value: Value =
        serde_json::from_str(content).map_err(|_| Error::validation("Invalid JSON format"))?;
    let Value::Array(entries) = value else {
        return Err(Error::validation("File must contain an array of QA pairs"));
    };

    let complete = entries.iter().all(|entry| {
        ["question", "answer"].iter().all(|key| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .map_or(false, |s| !s.is_empty())
        })
    });
    if !complete {
        return Err(Error::validation(
            "All QA pairs must have 'question' and 'answer' fields",
        ));
    }

    entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value(entry)
                .map_err(|err| Error::validation(format!("Invalid QA pair: {}", err)))
        })
        .collect()
}

/// Read and parse an import file; only `.json` files are accepted
pub async fn read_import_file(path: impl AsRef<Path>) -> Result<Vec<QaPair>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(Error::validation("Please upload a JSON file"));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| Error::validation(format!("Could not read {}: {}", path.display(), err)))?;
    parse_import_file(&content)
}
