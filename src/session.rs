//! Authenticated Drive session.

use crate::api::ApiClient;
use crate::auth::{authenticate, AuthConfig};
use crate::error::Result;
use crate::progress::{ProgressCallback, TransferProgress};

/// An authenticated handle used for all remote calls in one run.
///
/// Operations (`create_folder`, `upload_file`, `mirror_folder`,
/// `list_folders`) are implemented in `fs::operations` as inherent
/// methods. The session is used strictly sequentially.
pub struct Session {
    api: ApiClient,
    progress_callback: Option<ProgressCallback>,
}

impl Session {
    /// Authenticate and open a session.
    ///
    /// # Example
    /// ```no_run
    /// use drivelib::{AuthConfig, Session};
    ///
    /// # async fn example() -> drivelib::Result<()> {
    /// let session = Session::connect(&AuthConfig::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(config: &AuthConfig) -> Result<Self> {
        let token = authenticate(config).await?;
        let mut api = ApiClient::new();
        api.set_access_token(token);

        Ok(Self {
            api,
            progress_callback: None,
        })
    }

    /// Build a session around an already-obtained access token.
    pub fn with_access_token(token: String) -> Self {
        let mut api = ApiClient::new();
        api.set_access_token(token);

        Self {
            api,
            progress_callback: None,
        }
    }

    /// Install a transfer progress callback.
    ///
    /// The callback can return `false` to cancel the transfer in flight.
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    /// Remove the progress callback.
    pub fn clear_progress_callback(&mut self) {
        self.progress_callback = None;
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Report progress to the callback; returns `false` when the caller
    /// asked to cancel.
    pub(crate) fn report_progress(&mut self, progress: &TransferProgress) -> bool {
        match &mut self.progress_callback {
            Some(callback) => callback(progress),
            None => true,
        }
    }
}
