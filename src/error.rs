//! Error handling for the dashboard client

use std::fmt;
use thiserror::Error;

/// The kind of request a failing operation was making
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Create,
    Update,
    Delete,
    Import,
    Test,
    Upload,
    SignIn,
    SignOut,
}

impl Action {
    /// Convert the action to the verb used in user-facing messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fetch => "fetch",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Import => "import",
            Action::Test => "test",
            Action::Upload => "upload",
            Action::SignIn => "sign in",
            Action::SignOut => "sign out",
        }
    }
}

/// Names the operation that failed, e.g. "create category"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub action: Action,
    pub entity: &'static str,
}

impl Operation {
    pub const fn new(action: Action, entity: &'static str) -> Self {
        Self { action, entity }
    }

    /// Message used when the backend does not supply one
    pub fn default_message(&self) -> String {
        if self.entity.is_empty() {
            format!("Failed to {}", self.action.as_str())
        } else {
            format!("Failed to {} {}", self.action.as_str(), self.entity)
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entity.is_empty() {
            write!(f, "{}", self.action.as_str())
        } else {
            write!(f, "{} {}", self.action.as_str(), self.entity)
        }
    }
}

/// Unified error type for the dashboard client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP client errors outside of a request/response cycle
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response whose body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or malformed input caught before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// A request that failed in transit or came back with a non-2xx status
    #[error("{message} ({operation})")]
    Request {
        operation: Operation,
        status: Option<reqwest::StatusCode>,
        message: String,
    },

    /// The backend exposes no route for this operation
    #[error("Unsupported operation: {0}")]
    Unsupported(Operation),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new request error
    pub fn request<T: fmt::Display>(
        operation: Operation,
        status: Option<reqwest::StatusCode>,
        msg: T,
    ) -> Self {
        Error::Request {
            operation,
            status,
            message: msg.to_string(),
        }
    }

    /// The operation that failed, when the error came from a request
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Request { operation, .. } | Error::Unsupported(operation) => Some(*operation),
            _ => None,
        }
    }

    /// HTTP status of a failed request, if a response was received
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Request { status, .. } => *status,
            Error::Http(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// The text to show the user in a notification
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Request { message, .. } => message.clone(),
            Error::Unsupported(operation) => operation.default_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
