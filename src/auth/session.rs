//! Session state for the signed-in administrator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in session.
///
/// The credential itself is a cookie held by the shared HTTP client; this
/// records who signed in and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The username used to sign in
    pub username: String,

    /// When the sign-in succeeded
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    /// Create a session starting now
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            signed_in_at: Utc::now(),
        }
    }

    /// How long the session has been open as of `now`
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.signed_in_at
    }
}

/// Body of `POST /auth/signin`
#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
