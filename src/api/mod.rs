//! Google Drive v3 API client.

mod client;

pub use client::{ApiClient, UploadStatus};
