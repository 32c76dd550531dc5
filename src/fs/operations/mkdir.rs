//! Folder creation.

use serde_json::json;

use crate::error::{DriveError, Result};
use crate::fs::node::FOLDER_MIME_TYPE;
use crate::session::Session;

impl Session {
    /// Create a folder and return its id.
    ///
    /// `parent_id` of `None` places the folder at the Drive root. No
    /// lookup-before-create is performed: calling this twice with the same
    /// name creates two distinct folders.
    pub async fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<String> {
        let mut metadata = json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE
        });

        if let Some(parent) = parent_id {
            metadata["parents"] = json!([parent]);
        }

        let response = self
            .api()
            .post("files", &[("fields", "id".to_string())], &metadata)
            .await?;

        response
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                DriveError::TransferError(format!(
                    "Folder creation response for '{}' carried no id",
                    name
                ))
            })
    }
}
