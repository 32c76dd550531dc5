//! Local-tree-to-remote-tree mirroring.
//!
//! Walks a local directory and reproduces it remotely: one folder per
//! directory, one file node per file, parents created strictly before
//! their children. Entries are visited in lexical order so creation order
//! is deterministic. The first failed remote call aborts the whole
//! operation; nodes created up to that point are left in place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{DriveError, Result};
use crate::fs::node::Node;
use crate::session::Session;

/// The remote calls the mirroring walk depends on.
///
/// [`Session`] is the real implementation; tests substitute a recording
/// store.
#[async_trait]
pub trait RemoteStore {
    /// Create a remote folder, returning its id.
    async fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<String>;

    /// Upload a local file under the given parent, returning the created node.
    async fn upload_file(&mut self, local_path: &Path, parent_id: Option<&str>) -> Result<Node>;
}

#[async_trait]
impl RemoteStore for Session {
    async fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<String> {
        Session::create_folder(self, name, parent_id).await
    }

    async fn upload_file(&mut self, local_path: &Path, parent_id: Option<&str>) -> Result<Node> {
        Session::upload_file(self, local_path, parent_id).await
    }
}

impl Session {
    /// Mirror a local directory tree to Drive. See [`mirror_tree`].
    pub async fn mirror_folder<P: AsRef<Path>>(
        &mut self,
        local_path: P,
        parent_id: Option<&str>,
        preserve_structure: bool,
    ) -> Result<String> {
        mirror_tree(self, local_path.as_ref(), parent_id, preserve_structure).await
    }
}

/// Reproduce `local_path`'s directory structure remotely and upload every
/// contained file. Returns the id of the top-level created folder.
///
/// A folder named after `local_path`'s basename is created under
/// `parent_id`, then the tree is walked pre-order. With
/// `preserve_structure` each visited directory gets its own remote folder,
/// parented under the folder of its containing directory; without it,
/// every file regardless of depth is uploaded flat into the top-level
/// folder.
///
/// Symlinks and special files are skipped.
pub async fn mirror_tree<S: RemoteStore + Send>(
    store: &mut S,
    local_path: &Path,
    parent_id: Option<&str>,
    preserve_structure: bool,
) -> Result<String> {
    let is_dir = tokio::fs::metadata(local_path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(DriveError::InvalidInput(format!(
            "{} is not a directory",
            local_path.display()
        )));
    }

    let folder_name = local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            DriveError::InvalidInput(format!(
                "Cannot derive a folder name from {}",
                local_path.display()
            ))
        })?;

    let root_id = store.create_folder(&folder_name, parent_id).await?;

    // Each entry pairs a directory with the remote folder its contents go
    // into; that running reference is what keeps parent ids correct
    // without recomputing relative paths.
    let mut pending: Vec<(PathBuf, String)> = vec![(local_path.to_path_buf(), root_id.clone())];

    while let Some((dir, folder_id)) = pending.pop() {
        let mut subdirs = Vec::new();

        for entry in sorted_entries(&dir).await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;

            if file_type.is_dir() {
                if preserve_structure {
                    let name = entry.file_name().to_string_lossy().to_string();
                    let sub_id = store.create_folder(&name, Some(&folder_id)).await?;
                    subdirs.push((path, sub_id));
                } else {
                    // Flat mode: descend, but everything lands in the
                    // top-level folder.
                    subdirs.push((path, root_id.clone()));
                }
            } else if file_type.is_file() {
                store.upload_file(&path, Some(&folder_id)).await?;
            }
        }

        // Reverse so the stack pops subdirectories in lexical order.
        while let Some(item) = subdirs.pop() {
            pending.push(item);
        }
    }

    Ok(root_id)
}

/// Directory entries sorted lexically by file name.
async fn sorted_entries(dir: &Path) -> Result<Vec<tokio::fs::DirEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        entries.push(entry);
    }
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::node::NodeKind;
    use std::fs;
    use tempfile::TempDir;

    /// One remote call observed by the mock store.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Recorded {
        id: String,
        kind: NodeKind,
        name: String,
        parent_id: Option<String>,
    }

    /// Records every create/upload; optionally fails one upload by name.
    #[derive(Default)]
    struct MockStore {
        nodes: Vec<Recorded>,
        fail_upload_on: Option<String>,
    }

    impl MockStore {
        fn record(&mut self, kind: NodeKind, name: &str, parent_id: Option<&str>) -> String {
            let id = format!("n{}", self.nodes.len() + 1);
            self.nodes.push(Recorded {
                id: id.clone(),
                kind,
                name: name.to_string(),
                parent_id: parent_id.map(str::to_owned),
            });
            id
        }

        fn files(&self) -> Vec<&Recorded> {
            self.nodes.iter().filter(|n| n.kind == NodeKind::File).collect()
        }

        fn folders(&self) -> Vec<&Recorded> {
            self.nodes.iter().filter(|n| n.kind == NodeKind::Folder).collect()
        }

        fn find(&self, name: &str) -> &Recorded {
            self.nodes.iter().find(|n| n.name == name).unwrap()
        }
    }

    #[async_trait]
    impl RemoteStore for MockStore {
        async fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<String> {
            Ok(self.record(NodeKind::Folder, name, parent_id))
        }

        async fn upload_file(&mut self, local_path: &Path, parent_id: Option<&str>) -> Result<Node> {
            let name = local_path.file_name().unwrap().to_string_lossy().to_string();
            if self.fail_upload_on.as_deref() == Some(name.as_str()) {
                return Err(DriveError::TransferError(format!("injected failure: {}", name)));
            }
            let id = self.record(NodeKind::File, &name, parent_id);
            Ok(Node {
                id,
                name,
                kind: NodeKind::File,
                parent_id: parent_id.map(str::to_owned),
            })
        }
    }

    /// `project/a.txt` and `project/sub/b.txt`.
    fn example_tree() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("a.txt"), b"alpha").unwrap();
        fs::create_dir(project.join("sub")).unwrap();
        fs::write(project.join("sub").join("b.txt"), b"beta").unwrap();
        (tmp, project)
    }

    #[tokio::test]
    async fn test_preserve_structure_worked_example() {
        let (_tmp, project) = example_tree();
        let mut store = MockStore::default();

        let root_id = mirror_tree(&mut store, &project, None, true).await.unwrap();

        // Four nodes, created in this relative order.
        let summary: Vec<(NodeKind, &str)> = store
            .nodes
            .iter()
            .map(|n| (n.kind, n.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (NodeKind::Folder, "project"),
                (NodeKind::File, "a.txt"),
                (NodeKind::Folder, "sub"),
                (NodeKind::File, "b.txt"),
            ]
        );

        // Every node's parent is the folder of its containing directory.
        assert_eq!(store.find("project").parent_id, None);
        assert_eq!(store.find("project").id, root_id);
        assert_eq!(store.find("a.txt").parent_id.as_deref(), Some(root_id.as_str()));
        assert_eq!(store.find("sub").parent_id.as_deref(), Some(root_id.as_str()));
        assert_eq!(
            store.find("b.txt").parent_id.as_deref(),
            Some(store.find("sub").id.as_str())
        );
    }

    #[tokio::test]
    async fn test_one_folder_per_directory_one_file_per_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");
        fs::create_dir(&root).unwrap();
        for dir in ["d1", "d2", "d2/nested"] {
            fs::create_dir(root.join(dir)).unwrap();
        }
        for file in ["top.bin", "d1/one.txt", "d2/two.txt", "d2/nested/three.txt"] {
            fs::write(root.join(file), b"x").unwrap();
        }

        let mut store = MockStore::default();
        mirror_tree(&mut store, &root, None, true).await.unwrap();

        // data, d1, d2, nested
        assert_eq!(store.folders().len(), 4);
        assert_eq!(store.files().len(), 4);
        assert_eq!(
            store.find("three.txt").parent_id.as_deref(),
            Some(store.find("nested").id.as_str())
        );
        assert_eq!(
            store.find("nested").parent_id.as_deref(),
            Some(store.find("d2").id.as_str())
        );
    }

    #[tokio::test]
    async fn test_flat_mode_parents_everything_under_root() {
        let (_tmp, project) = example_tree();
        let mut store = MockStore::default();

        let root_id = mirror_tree(&mut store, &project, None, false).await.unwrap();

        // Only the top-level folder is created.
        assert_eq!(store.folders().len(), 1);
        let files = store.files();
        assert_eq!(files.len(), 2);
        for file in files {
            assert_eq!(file.parent_id.as_deref(), Some(root_id.as_str()));
        }
    }

    #[tokio::test]
    async fn test_empty_directory_creates_one_folder() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        fs::create_dir(&empty).unwrap();

        let mut store = MockStore::default();
        mirror_tree(&mut store, &empty, None, true).await.unwrap();

        assert_eq!(store.folders().len(), 1);
        assert!(store.files().is_empty());
    }

    #[tokio::test]
    async fn test_nests_under_given_parent() {
        let (_tmp, project) = example_tree();
        let mut store = MockStore::default();

        mirror_tree(&mut store, &project, Some("existing"), true)
            .await
            .unwrap();

        assert_eq!(store.find("project").parent_id.as_deref(), Some("existing"));
    }

    #[tokio::test]
    async fn test_aborts_on_first_upload_failure() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("docs");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.txt"), b"a").unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("c.txt"), b"c").unwrap();

        let mut store = MockStore {
            fail_upload_on: Some("b.txt".to_string()),
            ..MockStore::default()
        };

        let err = mirror_tree(&mut store, &root, None, true).await.unwrap_err();
        assert!(matches!(err, DriveError::TransferError(_)));

        // Nothing after the failing file in traversal order was uploaded,
        // and nodes created before it are left in place.
        let uploaded: Vec<&str> = store.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(uploaded, vec!["a.txt"]);
        assert_eq!(store.folders().len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_non_directory_input() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, b"not a dir").unwrap();

        let mut store = MockStore::default();

        let err = mirror_tree(&mut store, &file, None, true).await.unwrap_err();
        assert!(matches!(err, DriveError::InvalidInput(_)));
        assert!(store.nodes.is_empty());

        let missing = tmp.path().join("missing");
        let err = mirror_tree(&mut store, &missing, None, true).await.unwrap_err();
        assert!(matches!(err, DriveError::InvalidInput(_)));
    }
}
