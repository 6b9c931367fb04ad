//! The seam between controllers and the backend

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::error::{Action, Error, Operation, Result};
use crate::fetch::ApiClient;

/// Entities carry an opaque identifier assigned by the backend
pub trait Identified {
    fn id(&self) -> &str;
}

/// One fetched page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Total number of pages the backend reports; 1 for unpaginated collections
    pub pages: u32,
}

impl<T> Listing<T> {
    /// A complete, unpaginated collection
    pub fn single(items: Vec<T>) -> Self {
        Self { items, pages: 1 }
    }
}

/// CRUD access to one kind of entity.
///
/// Every call performs exactly one request and reflects server state at
/// completion; nothing is cached or retried.
#[async_trait]
pub trait Resource: Send + Sync {
    type Entity: Identified + Clone + Send + Sync;
    /// Complete document sent on create and update
    type Input: Serialize + Send + Sync;
    /// Server-side listing parameters
    type Query: Clone + Default + Send + Sync;

    /// Singular entity name used in messages, e.g. "category"
    const ENTITY: &'static str;

    async fn list(&self, query: &Self::Query) -> Result<Listing<Self::Entity>>;

    async fn create(&self, input: &Self::Input) -> Result<Self::Entity>;

    async fn update(&self, id: &str, input: &Self::Input) -> Result<Self::Entity>;

    async fn remove(&self, id: &str) -> Result<()>;

    /// Section this collection is nested in, for items and samples
    fn parent_section(&self) -> Option<&str> {
        None
    }
}

/// Error for an operation the backend has no route for
pub(crate) fn unsupported(action: Action, entity: &'static str) -> Error {
    Error::Unsupported(Operation::new(action, entity))
}

/// A REST collection route: `GET`/`POST` on the collection path,
/// `GET`/`PATCH`/`DELETE` on `<path>/<id>`.
#[derive(Debug, Clone)]
pub(crate) struct RestCollection {
    api: ApiClient,
    segments: Vec<String>,
    entity: &'static str,
}

impl RestCollection {
    pub(crate) fn new<S: Into<String>>(
        api: ApiClient,
        segments: impl IntoIterator<Item = S>,
        entity: &'static str,
    ) -> Self {
        Self {
            api,
            segments: segments.into_iter().map(Into::into).collect(),
            entity,
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn operation(&self, action: Action) -> Operation {
        Operation::new(action, self.entity)
    }

    /// URL of the collection, extended by `extra` segments
    pub(crate) fn url(&self, extra: &[&str]) -> Result<Url> {
        let segments: Vec<&str> = self
            .segments
            .iter()
            .map(String::as_str)
            .chain(extra.iter().copied())
            .collect();
        self.api.endpoint(&segments)
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.api
            .get(self.url(&[])?, self.operation(Action::Fetch))
            .execute()
            .await
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.api
            .get(self.url(&[id])?, self.operation(Action::Fetch))
            .execute()
            .await
    }

    pub(crate) async fn create<T, I>(&self, input: &I) -> Result<T>
    where
        T: DeserializeOwned,
        I: Serialize + ?Sized,
    {
        self.api
            .post(self.url(&[])?, self.operation(Action::Create))
            .json(input)?
            .execute()
            .await
    }

    pub(crate) async fn update<T, I>(&self, id: &str, input: &I) -> Result<T>
    where
        T: DeserializeOwned,
        I: Serialize + ?Sized,
    {
        self.api
            .patch(self.url(&[id])?, self.operation(Action::Update))
            .json(input)?
            .execute()
            .await
    }

    pub(crate) async fn remove(&self, id: &str) -> Result<()> {
        self.api
            .delete(self.url(&[id])?, self.operation(Action::Delete))
            .execute_empty()
            .await
    }
}
