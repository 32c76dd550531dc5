//! Drive API client with request/response handling.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE, LOCATION};
use reqwest::Response;
use serde_json::Value;

use crate::error::{DriveError, Result};
use crate::http::HttpClient;

/// Base URL for Drive v3 metadata calls.
const API_URL: &str = "https://www.googleapis.com/drive/v3";

/// Endpoint for media uploads.
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";

/// Outcome of a single resumable-upload chunk.
#[derive(Debug)]
pub enum UploadStatus {
    /// The server accepted the chunk and expects more (`308 Resume Incomplete`).
    Incomplete,
    /// The final chunk was accepted; carries the created file's metadata.
    Complete(Value),
}

/// Drive API client.
///
/// Wraps [`HttpClient`] with bearer authorization and decodes the Drive
/// error envelope (`{"error": {"code", "message"}}`) on non-success
/// statuses. Calls are made one at a time; there is no retry.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
            access_token: None,
        }
    }

    /// Set the bearer token used for authorized requests.
    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    /// Get the current bearer token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Make a GET request against a Drive v3 path (e.g. `"files"`).
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", API_URL, path);
        let response = self.http.get(&url, self.access_token(), query).await?;
        Self::decode_json(response).await
    }

    /// Make a POST request with a JSON body against a Drive v3 path.
    pub async fn post(&self, path: &str, query: &[(&str, String)], body: &Value) -> Result<Value> {
        let url = format!("{}/{}", API_URL, path);
        let response = self
            .http
            .post_json(&url, self.access_token(), query, HeaderMap::new(), body)
            .await?;
        Self::decode_json(response).await
    }

    /// Start a resumable upload session.
    ///
    /// Sends the file metadata and announces the media's content type and
    /// size; the returned URL accepts the subsequent chunk `PUT`s.
    pub async fn begin_resumable_upload(
        &self,
        metadata: &Value,
        content_type: &str,
        content_length: u64,
    ) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Upload-Content-Type",
            HeaderValue::from_str(content_type)
                .map_err(|_| DriveError::InvalidInput(format!("Bad content type: {}", content_type)))?,
        );
        headers.insert(
            "X-Upload-Content-Length",
            HeaderValue::from(content_length),
        );

        let response = self
            .http
            .post_json(
                UPLOAD_URL,
                self.access_token(),
                &[("uploadType", "resumable".to_string())],
                headers,
                metadata,
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                DriveError::TransferError("Upload session response carried no URL".to_string())
            })
    }

    /// Upload one chunk of a resumable session.
    ///
    /// `offset` is the position of the chunk's first byte; `total` is the
    /// full file size. A zero-byte file is finalized with a single empty
    /// chunk (`Content-Range: bytes */0`).
    pub async fn upload_chunk(
        &self,
        session_url: &str,
        chunk: Vec<u8>,
        offset: u64,
        total: u64,
    ) -> Result<UploadStatus> {
        let range = if chunk.is_empty() && total == 0 {
            "bytes */0".to_string()
        } else {
            format!(
                "bytes {}-{}/{}",
                offset,
                offset + chunk.len() as u64 - 1,
                total
            )
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_RANGE,
            HeaderValue::from_str(&range)
                .map_err(|_| DriveError::TransferError(format!("Bad content range: {}", range)))?,
        );

        let response = self
            .http
            .put_bytes(session_url, self.access_token(), headers, chunk)
            .await?;

        // Google signals "chunk stored, send the next one" with a bare 308.
        if response.status().as_u16() == 308 {
            return Ok(UploadStatus::Incomplete);
        }

        if response.status().is_success() {
            let value: Value = response.json().await?;
            return Ok(UploadStatus::Complete(value));
        }

        Err(Self::decode_error(response).await)
    }

    /// Decode a JSON body on success, the error envelope otherwise.
    async fn decode_json(response: Response) -> Result<Value> {
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Turn a non-success response into an [`DriveError::ApiError`].
    async fn decode_error(response: Response) -> DriveError {
        let code = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => envelope_message(&body).unwrap_or(body),
            Err(e) => return DriveError::RequestError(e),
        };

        DriveError::ApiError { code, message }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `error.message` from a Drive error envelope, if the body is one.
fn envelope_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}
