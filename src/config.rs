//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with programmatic overrides via
//! [`PanelConfig::new`].

/// Top-level client configuration.
///
/// Loaded once via [`PanelConfig::from_env`] or built directly with
/// [`PanelConfig::new`] when the caller already knows the panel host.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Base URL of the panel, without a trailing slash
    /// (e.g. `https://ptero.mathost.eu`).
    pub base_url: String,

    /// Value of the `Origin` header sent on the WebSocket handshake.
    /// The panel rejects connections whose origin is not its web UI.
    pub origin: String,

    /// API key applied on construction, if any. The key can be changed
    /// later through `authorize`/`unauthorize` on the client.
    pub api_key: Option<String>,

    /// Capacity of the socket event broadcast channel.
    pub event_capacity: usize,
}

/// Default panel host used when `PANEL_BASE_URL` is not set.
const DEFAULT_BASE_URL: &str = "https://ptero.mathost.eu";

/// Default socket event channel capacity.
const DEFAULT_EVENT_CAPACITY: usize = 256;

impl PanelConfig {
    /// Builds a configuration for the given panel base URL with defaults
    /// for everything else. The origin defaults to the base URL itself.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = trim_trailing_slash(base_url.into());
        Self {
            origin: base_url.clone(),
            base_url,
            api_key: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// Recognized keys: `PANEL_BASE_URL`, `PANEL_ORIGIN`, `PANEL_API_KEY`,
    /// `SOCKET_EVENT_CAPACITY`.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = trim_trailing_slash(
            std::env::var("PANEL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );
        let origin = std::env::var("PANEL_ORIGIN").unwrap_or_else(|_| base_url.clone());
        let api_key = std::env::var("PANEL_API_KEY").ok();
        let event_capacity = parse_env("SOCKET_EVENT_CAPACITY", DEFAULT_EVENT_CAPACITY);

        Self {
            base_url,
            origin,
            api_key,
            event_capacity,
        }
    }

    /// Sets the API key, consuming and returning the config.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the WebSocket origin header value, consuming and returning
    /// the config.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
