//! Authentication against Google OAuth 2.0.
//!
//! The OAuth mechanics (installed-app flow, token refresh, service-account
//! JWT exchange) are delegated to `yup-oauth2`; this module only decides
//! which flow to run and hands the resulting bearer token to the session.

use std::path::PathBuf;

use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod, ServiceAccountAuthenticator};

use crate::error::{DriveError, Result};

/// OAuth scope granting full Drive access.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Where to find credentials and where to cache tokens.
///
/// Passed explicitly into [`authenticate`] so callers control the paths;
/// there are no process-wide defaults beyond [`AuthConfig::default`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// OAuth client secrets file (installed-app flow).
    pub credentials: PathBuf,
    /// Token cache, read at startup and rewritten after each successful
    /// authentication.
    pub token_cache: PathBuf,
    /// Service account key file. Takes precedence over the interactive
    /// flow when set.
    pub service_account: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials: PathBuf::from("credentials.json"),
            token_cache: PathBuf::from("token.json"),
            service_account: None,
        }
    }
}

/// Run the appropriate OAuth flow and return a bearer access token.
///
/// Service-account authentication is non-interactive. The installed-app
/// flow opens a browser consent page on first use and reuses the on-disk
/// token cache afterwards.
pub async fn authenticate(config: &AuthConfig) -> Result<String> {
    if let Some(key_path) = &config.service_account {
        let key = yup_oauth2::read_service_account_key(key_path)
            .await
            .map_err(|e| {
                DriveError::AuthError(format!(
                    "Failed to read service account key {}: {}",
                    key_path.display(),
                    e
                ))
            })?;

        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| DriveError::AuthError(format!("Service account flow failed: {}", e)))?;

        return token_string(auth.token(&[DRIVE_SCOPE]).await);
    }

    let secret = yup_oauth2::read_application_secret(&config.credentials)
        .await
        .map_err(|e| {
            DriveError::AuthError(format!(
                "No usable credentials at {}: {}",
                config.credentials.display(),
                e
            ))
        })?;

    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(config.token_cache.clone())
        .build()
        .await
        .map_err(|e| DriveError::AuthError(format!("OAuth flow failed: {}", e)))?;

    token_string(auth.token(&[DRIVE_SCOPE]).await)
}

fn token_string(
    token: std::result::Result<yup_oauth2::AccessToken, yup_oauth2::Error>,
) -> Result<String> {
    let token = token.map_err(|e| DriveError::AuthError(format!("Token request failed: {}", e)))?;

    token
        .token()
        .map(str::to_owned)
        .ok_or_else(|| DriveError::AuthError("Token response carried no access token".to_string()))
}
