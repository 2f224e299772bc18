use crate::core::config::BackendConfig;
use crate::core::error::ApiError;
use crate::models::customer::{Customer, CustomerPayload, ErrorBody};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP client for the customers resource
///
/// Each call issues exactly one request. There is no timeout, retry or
/// cancellation; a failure is returned to the caller as-is.
pub struct CustomerClient {
    client: reqwest::Client,
    collection: Url,
}

impl CustomerClient {
    pub fn new(base_url: &str, resource_path: &str) -> Result<Self, ApiError> {
        let mut collection = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        {
            let mut segments = collection
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base", base_url)))?;
            segments.pop_if_empty();
            segments.extend(resource_path.split('/').filter(|s| !s.is_empty()));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self { client, collection })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, &config.resource_path)
    }

    /// `{base}/customers`
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// `{base}/customers/{id}` or `{base}/customers/{id}/{action}`
    ///
    /// The id is pushed as a single escaped path segment.
    pub fn member_url(&self, id: &str, action: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.collection.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.collection.to_string()))?;
            segments.push(id);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    /// POST a new customer
    pub async fn create(&self, payload: &CustomerPayload) -> Result<Customer, ApiError> {
        let url = self.collection.clone();
        let request = self.request(Method::POST, url).json(payload);
        self.fetch(request).await
    }

    /// GET a single customer
    pub async fn retrieve(&self, id: &str) -> Result<Customer, ApiError> {
        let url = self.member_url(id, None)?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// PUT the full customer body
    pub async fn update(&self, id: &str, payload: &CustomerPayload) -> Result<Customer, ApiError> {
        let url = self.member_url(id, None)?;
        let request = self.request(Method::PUT, url).json(payload);
        self.fetch(request).await
    }

    /// DELETE a customer. Any response body is ignored.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.member_url(id, None)?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    pub async fn activate(&self, id: &str) -> Result<Customer, ApiError> {
        let url = self.member_url(id, Some("activate"))?;
        self.fetch(self.request(Method::PUT, url)).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<Customer, ApiError> {
        let url = self.member_url(id, Some("deactivate"))?;
        self.fetch(self.request(Method::PUT, url)).await
    }

    /// GET the collection with a prebuilt query string
    pub async fn list(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        let mut url = self.collection.clone();
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        self.fetch(self.request(Method::GET, url)).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "Sending request to customers backend");
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "Failed to parse JSON response from customers backend");
            ApiError::InvalidBody(e.to_string())
        })
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to send request to customers backend");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Customers backend responded");

        if status.is_success() {
            return Ok(response);
        }

        // Pull a structured `{message}` out of the error body when there is one
        let bytes = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message);

        warn!(
            status = status.as_u16(),
            message = ?message,
            "Customers backend returned error status"
        );

        Err(match message {
            Some(message) => ApiError::Server {
                status: status.as_u16(),
                message,
            },
            None => ApiError::Unstructured {
                status: status.as_u16(),
            },
        })
    }
}
