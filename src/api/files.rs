//! File endpoints: directory listing, read, and write.

use std::sync::Arc;

use reqwest::Method;

use crate::error::ClientError;
use crate::http::PanelHttp;
use crate::types::{ApiData, ApiObject, FileEntry};

/// Wrapper for the file-management endpoints of one server.
#[derive(Debug, Clone)]
pub struct FileClient {
    http: Arc<PanelHttp>,
    server_id: String,
}

impl FileClient {
    pub(crate) fn new(http: Arc<PanelHttp>, server_id: String) -> Self {
        Self { http, server_id }
    }

    fn path(&self, suffix: &str) -> String {
        format!("/api/client/servers/{}/files{suffix}", self.server_id)
    }

    /// Lists the entries of a directory. `None` lists the server root.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn list(&self, directory: Option<&str>) -> Result<Vec<FileEntry>, ClientError> {
        let mut request = self.http.request(Method::GET, &self.path("/list"));
        if let Some(directory) = directory {
            request = request.query(&[("directory", directory)]);
        }
        let wire: ApiData<Vec<ApiObject<FileEntry>>> = self.http.send_json(request).await?;
        Ok(wire.data.into_iter().map(|o| o.attributes).collect())
    }

    /// Reads the content of a file as text.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn read(&self, file: &str) -> Result<String, ClientError> {
        let request = self
            .http
            .request(Method::GET, &self.path("/contents"))
            .query(&[("file", file)]);
        self.http.send_text(request).await
    }

    /// Creates or overwrites a file with the given content.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn write(&self, file: &str, content: impl Into<String>) -> Result<(), ClientError> {
        let request = self
            .http
            .request(Method::POST, &self.path("/write"))
            .query(&[("file", file)])
            .body(content.into());
        self.http.send_unit(request).await
    }
}
