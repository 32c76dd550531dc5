//! Remote browsing helpers.

use crate::error::Result;
use crate::fs::node::{Node, NodeKind, FOLDER_MIME_TYPE};
use crate::session::Session;

impl Session {
    /// List folders visible at the Drive root, up to `max_results`.
    ///
    /// Read-only; trashed folders are excluded.
    pub async fn list_folders(&mut self, max_results: u32) -> Result<Vec<Node>> {
        let query = format!("mimeType='{}' and trashed=false", FOLDER_MIME_TYPE);

        let response = self
            .api()
            .get(
                "files",
                &[
                    ("q", query),
                    ("spaces", "drive".to_string()),
                    ("fields", "files(id, name)".to_string()),
                    ("pageSize", max_results.to_string()),
                ],
            )
            .await?;

        let folders = response
            .get("files")
            .and_then(|v| v.as_array())
            .map(|files| {
                files
                    .iter()
                    .filter_map(|f| Node::from_json(f, None))
                    .map(|mut node| {
                        // The narrow fields selector drops mimeType; these
                        // are folders by construction of the query.
                        node.kind = NodeKind::Folder;
                        node
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(folders)
    }
}
