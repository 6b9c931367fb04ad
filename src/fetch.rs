//! HTTP client abstraction for making requests to the dashboard backend

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientOptions, DashboardConfig};
use crate::error::{Error, Operation, Result};

/// Every successful backend response wraps its payload in `data`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Connection to the backend shared by every service client.
///
/// Cloning is cheap and clones share one cookie store, so a session
/// established through [`crate::auth::AuthClient`] is carried by every
/// request made through any clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    options: ClientOptions,
}

impl ApiClient {
    /// Create a new ApiClient with a session-aware HTTP client
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a new ApiClient around an existing HTTP client
    pub fn with_http_client(config: &DashboardConfig, http: Client) -> Self {
        Self {
            base: config.url.clone(),
            http,
            options: config.options.clone(),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// Build the URL of a backend route from its path segments.
    ///
    /// Segments are percent-encoded, so identifiers can be passed as-is.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::config("base URL cannot carry a path"))?;
            path.pop_if_empty();
            path.extend(self.options.prefix_segments());
            path.extend(segments);
        }
        Ok(url)
    }

    /// Create a GET request
    pub fn get(&self, url: Url, operation: Operation) -> FetchBuilder<'_> {
        self.request(Method::GET, url, operation)
    }

    /// Create a POST request
    pub fn post(&self, url: Url, operation: Operation) -> FetchBuilder<'_> {
        self.request(Method::POST, url, operation)
    }

    /// Create a PATCH request
    pub fn patch(&self, url: Url, operation: Operation) -> FetchBuilder<'_> {
        self.request(Method::PATCH, url, operation)
    }

    /// Create a DELETE request
    pub fn delete(&self, url: Url, operation: Operation) -> FetchBuilder<'_> {
        self.request(Method::DELETE, url, operation)
    }

    fn request(&self, method: Method, url: Url, operation: Operation) -> FetchBuilder<'_> {
        FetchBuilder::new(&self.http, url, method, operation)
            .header("X-Client-Info", &self.options.client_info)
    }
}

/// Helper for building and executing a single HTTP request
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: Url,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    operation: Operation,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: Url, method: Method, operation: Operation) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        Self {
            client,
            url,
            method,
            headers,
            query_params: Vec::new(),
            body: None,
            operation,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add a single query parameter to the request
    pub fn query_pair(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add query parameters to the request
    pub fn query<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query_params.extend(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    fn build(&self) -> RequestBuilder {
        let mut url = self.url.clone();
        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                pairs.append_pair(key, value);
            }
        }

        let mut req = self
            .client
            .request(self.method.clone(), url)
            .headers(self.headers.clone());
        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }
        req
    }

    async fn send(&self) -> Result<Response> {
        debug!(
            method = %self.method,
            url = %self.url,
            operation = %self.operation,
            "sending request"
        );
        send_request(self.build(), self.operation).await
    }

    /// Execute the request and return the `data` field of the response
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;
        let envelope: Envelope<T> = decode(response).await?;
        Ok(envelope.data)
    }

    /// Execute the request and decode the whole response body
    pub async fn execute_body<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.send().await?;
        decode(response).await
    }

    /// Execute the request, ignoring whatever the response body holds
    pub async fn execute_empty(&self) -> Result<()> {
        self.send().await?;
        Ok(())
    }
}

/// Send a prepared request, turning transport failures and non-2xx
/// statuses into [`Error::Request`].
pub(crate) async fn send_request(
    request: RequestBuilder,
    operation: Operation,
) -> Result<Response> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => {
            warn!(operation = %operation, error = %err, "request did not complete");
            return Err(Error::request(operation, None, operation.default_message()));
        }
    };

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(error_from_body(operation, status, &text))
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The backend's `message`, else its `error`, else the operation's default
fn error_from_body(operation: Operation, status: StatusCode, text: &str) -> Error {
    let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);
    let message = ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| operation.default_message());

    warn!(operation = %operation, status = %status, message = %message, "request rejected");
    Error::request(operation, Some(status), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Action;

    const CREATE_CATEGORY: Operation = Operation::new(Action::Create, "category");

    fn message_of(err: Error) -> String {
        match err {
            Error::Request { message, .. } => message,
            other => panic!("Expected Request error, got {:?}", other),
        }
    }

    #[test]
    fn backend_message_wins() {
        let err = error_from_body(
            CREATE_CATEGORY,
            StatusCode::CONFLICT,
            r#"{"message":"Category already exists","error":"conflict"}"#,
        );
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(message_of(err), "Category already exists");
    }

    #[test]
    fn error_field_is_second_choice() {
        let err = error_from_body(
            CREATE_CATEGORY,
            StatusCode::BAD_REQUEST,
            r#"{"error":"Name is required"}"#,
        );
        assert_eq!(message_of(err), "Name is required");
    }

    #[test]
    fn falls_back_to_operation_default() {
        let err = error_from_body(
            CREATE_CATEGORY,
            StatusCode::BAD_GATEWAY,
            "<html>bad gateway</html>",
        );
        assert_eq!(message_of(err), "Failed to create category");

        let err = error_from_body(CREATE_CATEGORY, StatusCode::BAD_REQUEST, r#"{"message":"  "}"#);
        assert_eq!(message_of(err), "Failed to create category");
    }

    #[test]
    fn endpoint_joins_prefix_and_encodes_segments() {
        let config = DashboardConfig::new("http://localhost:4000/").unwrap();
        let api = ApiClient::with_http_client(&config, Client::new());
        let url = api.endpoint(&["categories", "a b", "sections"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/categories/a%20b/sections");
    }
}
