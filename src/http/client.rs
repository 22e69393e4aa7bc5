//! Shared bearer-authenticated request helper.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};

use crate::error::{ApiErrors, ClientError};

/// Bearer-authenticated HTTP client for the panel API.
///
/// Holds the API key behind `authorize`/`unauthorize` accessors and maps
/// every response status the same way:
///
/// - 2xx → parsed body (or unit for no-content endpoints)
/// - 404 → [`ClientError::NotFound`]
/// - 500 → [`ClientError::ServerError`]
/// - anything else → [`ClientError::Remote`] from the error payload
#[derive(Debug)]
pub(crate) struct PanelHttp {
    client: reqwest::Client,
    base_url: String,
    api_key: RwLock<Option<String>>,
}

impl PanelHttp {
    /// Creates a helper for the given panel base URL.
    pub(crate) fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: RwLock::new(api_key),
        }
    }

    /// Stores the API key used for subsequent requests.
    pub(crate) fn authorize(&self, api_key: String) {
        *self
            .api_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(api_key);
    }

    /// Clears the stored API key.
    pub(crate) fn unauthorize(&self) {
        *self
            .api_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn api_key(&self) -> String {
        self.api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }

    /// Starts a request to `{base_url}{path}` with the standard headers.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(self.api_key())
    }

    /// Sends a prepared request and parses a JSON body on success.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Sends a prepared request and returns the plain-text body on success.
    pub(crate) async fn send_text(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.text().await?)
    }

    /// Sends a prepared request and discards the body on success.
    pub(crate) async fn send_unit(&self, request: RequestBuilder) -> Result<(), ClientError> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    /// `GET {path}` with a JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send_json(self.request(Method::GET, path)).await
    }

    /// `POST {path}` with a JSON body, expecting no content back.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::POST, path).json(body))
            .await
    }

    /// `POST {path}` with a JSON body and a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send_json(self.request(Method::POST, path).json(body))
            .await
    }

    /// `POST {path}` with no body, expecting no content back.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::POST, path)).await
    }

    /// `DELETE {path}` with a JSON body, expecting no content back.
    pub(crate) async fn delete_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::DELETE, path).json(body))
            .await
    }

    /// The uniform status mapping, applied to every response.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        tracing::debug!(status = %status, url = %response.url(), "panel returned an error status");
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::INTERNAL_SERVER_ERROR => Err(ClientError::ServerError),
            _ => {
                let payload: ApiErrors = response.json().await?;
                Err(ClientError::from_api(payload))
            }
        }
    }
}
