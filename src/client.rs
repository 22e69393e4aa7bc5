//! Root client object shared by all API wrappers.

use std::sync::Arc;

use crate::api::{AccountClient, ServerClient};
use crate::config::PanelConfig;
use crate::http::PanelHttp;

/// Entry point to the panel API.
///
/// Holds the configuration and the shared bearer-authenticated HTTP
/// helper. Wrapper objects created from it ([`AccountClient`],
/// [`ServerClient`]) share the same credentials, so one
/// [`authorize`](PanelClient::authorize) call covers all of them.
#[derive(Debug, Clone)]
pub struct PanelClient {
    config: PanelConfig,
    http: Arc<PanelHttp>,
}

impl PanelClient {
    /// Creates a client from the given configuration.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        let http = Arc::new(PanelHttp::new(
            config.base_url.clone(),
            config.api_key.clone(),
        ));
        Self { config, http }
    }

    /// Creates a client from environment variables (see
    /// [`PanelConfig::from_env`]).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(PanelConfig::from_env())
    }

    /// Stores the API key used for all subsequent requests.
    pub fn authorize(&self, api_key: impl Into<String>) {
        self.http.authorize(api_key.into());
    }

    /// Clears the stored API key.
    pub fn unauthorize(&self) {
        self.http.unauthorize();
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Account-scoped API wrapper.
    #[must_use]
    pub fn account(&self) -> AccountClient {
        AccountClient::new(Arc::clone(&self.http))
    }

    /// Server-scoped API wrapper for the given server identifier.
    #[must_use]
    pub fn server(&self, server_id: impl Into<String>) -> ServerClient {
        ServerClient::new(
            Arc::clone(&self.http),
            server_id.into(),
            self.config.clone(),
        )
    }
}
