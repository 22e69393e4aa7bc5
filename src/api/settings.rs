//! Settings endpoints: rename, reinstall, Docker image.

use std::sync::Arc;

use serde_json::json;

use crate::error::ClientError;
use crate::http::PanelHttp;

/// Wrapper for the settings endpoints of one server.
#[derive(Debug, Clone)]
pub struct SettingsClient {
    http: Arc<PanelHttp>,
    server_id: String,
}

impl SettingsClient {
    pub(crate) fn new(http: Arc<PanelHttp>, server_id: String) -> Self {
        Self { http, server_id }
    }

    fn path(&self, suffix: &str) -> String {
        format!("/api/client/servers/{}/settings{suffix}", self.server_id)
    }

    /// Renames the server.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn rename(&self, name: &str) -> Result<(), ClientError> {
        self.http
            .post_unit(&self.path("/rename"), &json!({ "name": name }))
            .await
    }

    /// Triggers a reinstall of the server from its egg.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn reinstall(&self) -> Result<(), ClientError> {
        self.http.post_empty(&self.path("/reinstall")).await
    }

    /// Changes the Docker image the server runs in.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn set_docker_image(&self, docker_image: &str) -> Result<(), ClientError> {
        self.http
            .post_unit(
                &self.path("/docker-image"),
                &json!({ "docker_image": docker_image }),
            )
            .await
    }
}
