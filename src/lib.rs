//! Catalog Admin Client Library
//!
//! A Rust client for the catalog administration backend: categories with
//! their sections, items and samples, the business directory,
//! announcements, user suggestions, and the chatbot knowledge base.
//!
//! Each entity type is owned by a [`controller::ListController`] that keeps
//! the fetched collection, its local filter/sort view and the open modal
//! state. [`forms::Form`] holds drafts and submits them through a controller.

pub mod announcements;
pub mod auth;
pub mod business;
pub mod catalog;
pub mod chatbot;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod resource;
pub mod storage;
pub mod suggestions;

use crate::announcements::{AnnouncementController, AnnouncementResource};
use crate::auth::AuthClient;
use crate::business::BusinessDirectory;
use crate::catalog::{CategoryController, CategoryDetail, CategoryResource};
use crate::chatbot::ChatbotClient;
use crate::config::{ClientOptions, DashboardConfig};
use crate::controller::ListController;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::storage::UploadClient;
use crate::suggestions::{SuggestionController, SuggestionResource};

/// The main entry point for the dashboard client.
///
/// Owns the one backend connection every controller and client shares, so
/// a sign-in through [`Dashboard::auth`] authenticates them all.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Shared backend connection
    api: ApiClient,
    /// Auth client for sign-in state
    auth: AuthClient,
}

impl Dashboard {
    /// Create a new dashboard client
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_admin::Dashboard;
    ///
    /// let dashboard = Dashboard::new("http://localhost:4000").unwrap();
    /// let categories = dashboard.categories();
    /// assert!(categories.entities().is_empty());
    /// ```
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(DashboardConfig::new(url)?)
    }

    /// Create a new dashboard client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use catalog_admin::{Dashboard, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_search_debounce(Duration::from_millis(250));
    /// let dashboard = Dashboard::new_with_options("http://localhost:4000", options).unwrap();
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Result<Self> {
        Self::with_config(DashboardConfig::new(url)?.with_options(options))
    }

    /// Create a dashboard client from `DASHBOARD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(DashboardConfig::from_env()?)
    }

    pub fn with_config(config: DashboardConfig) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        Ok(Self::with_api(api))
    }

    /// Wrap an existing connection
    pub fn with_api(api: ApiClient) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            api,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// A controller for the category list
    pub fn categories(&self) -> CategoryController {
        ListController::new(CategoryResource::new(self.api.clone()))
    }

    /// The detail page of one category, with its sections, items and samples
    pub fn category(&self, category_id: &str) -> CategoryDetail {
        CategoryDetail::new(self.api.clone(), category_id)
    }

    /// The business directory with debounced search and paging
    pub fn businesses(&self) -> BusinessDirectory {
        BusinessDirectory::new(self.api.clone())
    }

    pub fn announcements(&self) -> AnnouncementController {
        ListController::new(AnnouncementResource::new(self.api.clone()))
    }

    pub fn suggestions(&self) -> SuggestionController {
        ListController::new(SuggestionResource::new(self.api.clone()))
    }

    pub fn chatbot(&self) -> ChatbotClient {
        ChatbotClient::new(self.api.clone())
    }

    /// Image uploads for form fields holding image URLs
    pub fn uploads(&self) -> UploadClient {
        UploadClient::new(self.api.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientOptions, DashboardConfig};
    pub use crate::controller::{Confirmation, ListController, LoadOutcome, Modal};
    pub use crate::error::{Error, Result};
    pub use crate::forms::{Draft, Form, FormMode, FormStatus, Notification};
    pub use crate::Dashboard;
}
