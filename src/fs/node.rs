//! Remote node types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MIME type Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Node kind: folders contain children, files are leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file
    File,
    /// Folder/directory
    Folder,
}

impl NodeKind {
    /// Derive the kind from a Drive MIME type.
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type == FOLDER_MIME_TYPE {
            NodeKind::Folder
        } else {
            NodeKind::File
        }
    }
}

/// A node in the remote Drive hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    /// Opaque identifier assigned by Drive at creation; immutable.
    pub id: String,
    /// Display name, taken from the local basename at creation time.
    pub name: String,
    /// Node kind
    pub kind: NodeKind,
    /// Id of the containing node; `None` means root-level.
    pub parent_id: Option<String>,
}

impl Node {
    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Parse a node from a Drive `files` resource.
    ///
    /// Requires `id` and `name`; the kind falls back to `File` when the
    /// response omits `mimeType` (e.g. with a narrow `fields` selector).
    pub fn from_json(value: &Value, parent_id: Option<&str>) -> Option<Self> {
        let id = value.get("id")?.as_str()?.to_string();
        let name = value.get("name")?.as_str()?.to_string();
        let kind = value
            .get("mimeType")
            .and_then(|v| v.as_str())
            .map(NodeKind::from_mime_type)
            .unwrap_or(NodeKind::File);

        Some(Self {
            id,
            name,
            kind,
            parent_id: parent_id.map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_from_mime_type() {
        assert_eq!(
            NodeKind::from_mime_type("application/vnd.google-apps.folder"),
            NodeKind::Folder
        );
        assert_eq!(NodeKind::from_mime_type("text/plain"), NodeKind::File);
        assert_eq!(
            NodeKind::from_mime_type("application/octet-stream"),
            NodeKind::File
        );
    }

    #[test]
    fn test_from_json() {
        let value = json!({
            "id": "1AbC",
            "name": "report.pdf",
            "mimeType": "application/pdf"
        });

        let node = Node::from_json(&value, Some("0Root")).unwrap();
        assert_eq!(node.id, "1AbC");
        assert_eq!(node.name, "report.pdf");
        assert!(node.is_file());
        assert_eq!(node.parent_id.as_deref(), Some("0Root"));
    }

    #[test]
    fn test_from_json_folder() {
        let value = json!({
            "id": "1Dir",
            "name": "photos",
            "mimeType": "application/vnd.google-apps.folder"
        });

        let node = Node::from_json(&value, None).unwrap();
        assert!(node.is_folder());
        assert!(node.parent_id.is_none());
    }

    #[test]
    fn test_from_json_missing_fields() {
        assert!(Node::from_json(&json!({"name": "x"}), None).is_none());
        assert!(Node::from_json(&json!({"id": "1"}), None).is_none());

        // Narrow fields selectors drop mimeType; default to a file.
        let node = Node::from_json(&json!({"id": "1", "name": "x"}), None).unwrap();
        assert!(node.is_file());
    }
}
