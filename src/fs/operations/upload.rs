//! Upload operations.

use std::path::Path;

use serde_json::{json, Value};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::api::UploadStatus;
use crate::error::{DriveError, Result};
use crate::fs::node::Node;
use crate::progress::TransferProgress;
use crate::session::Session;

/// Chunk size for resumable uploads. The API requires a multiple of 256 KiB
/// for every chunk but the last.
const UPLOAD_CHUNK_SIZE: usize = 8 * 1024 * 1024;

impl Session {
    /// Upload one local file as a new remote file node.
    ///
    /// The content type is inferred from the file extension, falling back
    /// to `application/octet-stream`. Bytes are sent in bounded chunks and
    /// progress is reported after each one; a chunk failure aborts the
    /// whole file with no resume and no retry.
    ///
    /// # Arguments
    /// * `local_path` - Path to the readable local file
    /// * `parent_id` - Remote folder to create the file under; `None` for
    ///   the Drive root
    pub async fn upload_file<P: AsRef<Path>>(
        &mut self,
        local_path: P,
        parent_id: Option<&str>,
    ) -> Result<Node> {
        let path = local_path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                DriveError::InvalidInput(format!("Invalid file path: {}", path.display()))
            })?;

        let file_meta = tokio::fs::metadata(path).await?;
        if !file_meta.is_file() {
            return Err(DriveError::InvalidInput(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let file_size = file_meta.len();

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        let mut metadata = json!({ "name": file_name });
        if let Some(parent) = parent_id {
            metadata["parents"] = json!([parent]);
        }

        let session_url = self
            .api()
            .begin_resumable_upload(&metadata, &mime_type, file_size)
            .await?;

        let created = if file_size == 0 {
            self.upload_empty(&session_url, &file_name).await?
        } else {
            self.upload_chunks(&session_url, path, &file_name, file_size)
                .await?
        };

        Node::from_json(&created, parent_id).ok_or_else(|| {
            DriveError::TransferError(format!(
                "Could not parse created node for '{}'",
                file_name
            ))
        })
    }

    /// Sequential chunk loop for non-empty files.
    async fn upload_chunks(
        &mut self,
        session_url: &str,
        path: &Path,
        file_name: &str,
        file_size: u64,
    ) -> Result<Value> {
        let mut file = File::open(path).await?;
        let mut offset: u64 = 0;
        let mut created: Option<Value> = None;

        while offset < file_size {
            let chunk_size = UPLOAD_CHUNK_SIZE.min((file_size - offset) as usize);
            let mut buffer = vec![0u8; chunk_size];
            file.read_exact(&mut buffer).await?;

            let status = self
                .api()
                .upload_chunk(session_url, buffer, offset, file_size)
                .await?;
            offset += chunk_size as u64;

            match status {
                UploadStatus::Incomplete => {
                    if offset >= file_size {
                        return Err(DriveError::TransferError(format!(
                            "Server expected more data after the final chunk of '{}'",
                            file_name
                        )));
                    }
                }
                UploadStatus::Complete(value) => {
                    if offset < file_size {
                        return Err(DriveError::TransferError(format!(
                            "Server finalized '{}' before all bytes were sent",
                            file_name
                        )));
                    }
                    created = Some(value);
                }
            }

            let progress = TransferProgress::new(offset, file_size, file_name);
            if !self.report_progress(&progress) {
                return Err(DriveError::TransferError(
                    "Upload cancelled by caller".to_string(),
                ));
            }
        }

        created.ok_or_else(|| {
            DriveError::TransferError(format!(
                "Upload of '{}' finished without a completion response",
                file_name
            ))
        })
    }

    /// Zero-byte files finalize the session with a single empty chunk.
    async fn upload_empty(&mut self, session_url: &str, file_name: &str) -> Result<Value> {
        let status = self.api().upload_chunk(session_url, Vec::new(), 0, 0).await?;

        let progress = TransferProgress::new(0, 0, file_name);
        if !self.report_progress(&progress) {
            return Err(DriveError::TransferError(
                "Upload cancelled by caller".to_string(),
            ));
        }

        match status {
            UploadStatus::Complete(value) => Ok(value),
            UploadStatus::Incomplete => Err(DriveError::TransferError(format!(
                "Server expected data for empty file '{}'",
                file_name
            ))),
        }
    }
}
