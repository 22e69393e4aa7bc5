//! Account endpoints: profile and two-factor authentication.

use std::sync::Arc;

use serde_json::json;

use crate::error::ClientError;
use crate::http::PanelHttp;
use crate::types::{Account, ApiData, ApiObject, RecoveryTokens, TwoFactorSetup};

/// Wrapper for the account-scoped endpoints.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: Arc<PanelHttp>,
}

impl AccountClient {
    pub(crate) fn new(http: Arc<PanelHttp>) -> Self {
        Self { http }
    }

    /// Fetches the account profile.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn account(&self) -> Result<Account, ClientError> {
        let wire: ApiObject<Account> = self.http.get_json("/api/client/account").await?;
        Ok(wire.attributes)
    }

    /// Fetches the QR code for enrolling a two-factor authenticator.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn two_factor_qr(&self) -> Result<TwoFactorSetup, ClientError> {
        let wire: ApiData<TwoFactorSetup> =
            self.http.get_json("/api/client/account/two-factor").await?;
        Ok(wire.data)
    }

    /// Enables two-factor authentication with a code from the
    /// authenticator app, returning one-time recovery tokens.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn enable_two_factor(&self, code: &str) -> Result<RecoveryTokens, ClientError> {
        let wire: ApiObject<RecoveryTokens> = self
            .http
            .post_json("/api/client/account/two-factor", &json!({ "code": code }))
            .await?;
        Ok(wire.attributes)
    }

    /// Disables two-factor authentication. The panel requires the account
    /// password as confirmation.
    ///
    /// # Errors
    ///
    /// Returns the uniform status mapping of [`ClientError`].
    pub async fn disable_two_factor(&self, password: &str) -> Result<(), ClientError> {
        self.http
            .delete_unit(
                "/api/client/account/two-factor",
                &json!({ "password": password }),
            )
            .await
    }
}
