//! Account DTOs: profile and two-factor authentication.

use serde::Deserialize;

/// Panel account profile, from `GET /api/client/account`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Numeric account ID.
    pub id: i64,
    /// Whether the account has panel admin rights.
    pub admin: bool,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// UI language code (e.g. `en`).
    pub language: String,
}

/// Two-factor enrollment data, from `GET /api/client/account/two-factor`.
#[derive(Debug, Clone, Deserialize)]
pub struct TwoFactorSetup {
    /// `data:` URL of the QR code image to scan with an authenticator app.
    pub image_url_data: String,
}

/// Recovery tokens issued when two-factor authentication is enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct RecoveryTokens {
    /// One-time recovery codes.
    pub tokens: Vec<String>,
}
