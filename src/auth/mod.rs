//! Administrator sign-in and sign-out

mod session;

use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::error::{Action, Error, Operation, Result};
use crate::fetch::ApiClient;

pub use session::*;

const SIGN_IN: Operation = Operation::new(Action::SignIn, "");
const SIGN_OUT: Operation = Operation::new(Action::SignOut, "");

/// Client for `/auth`.
///
/// Cloning shares the session, and the session cookie lives in the
/// [`ApiClient`] every other service client is built from.
#[derive(Debug, Clone)]
pub struct AuthClient {
    /// The shared backend connection
    api: ApiClient,

    /// The current session
    session: Arc<Mutex<Option<Session>>>,
}

impl AuthClient {
    /// Create a new AuthClient
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Sign in with a username and password
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session> {
        if username.is_empty() {
            return Err(Error::validation("Please provide a username"));
        }
        if password.is_empty() {
            return Err(Error::validation("Please provide a password"));
        }

        self.api
            .post(self.api.endpoint(&["auth", "signin"])?, SIGN_IN)
            .json(&Credentials { username, password })?
            .execute_empty()
            .await?;

        let session = Session::new(username);
        debug!(username, "signed in");
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Sign out. The local session is cleared only if the backend confirms.
    pub async fn sign_out(&self) -> Result<()> {
        self.api
            .get(self.api.endpoint(&["auth", "logout"])?, SIGN_OUT)
            .execute_empty()
            .await?;

        self.set_session(None);
        debug!("signed out");
        Ok(())
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }
}
