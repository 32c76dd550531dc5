//! HTTP client wrapper for Google Drive API requests.

use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::error::Result;

/// HTTP client for making requests to Google servers.
///
/// Status handling is left to the caller: transport failures are errors,
/// non-success statuses are returned as-is so the API layer can decode the
/// Drive error envelope (or a `308 Resume Incomplete` during uploads).
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Make a GET request with query parameters.
    pub async fn get(
        &self,
        url: &str,
        bearer: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Response> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        query: &[(&str, String)],
        headers: HeaderMap,
        body: &Value,
    ) -> Result<Response> {
        let mut request = self
            .client
            .post(url)
            .query(query)
            .headers(headers)
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    /// Make a PUT request with a raw byte body.
    pub async fn put_bytes(
        &self,
        url: &str,
        bearer: Option<&str>,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<Response> {
        let mut request = self.client.put(url).headers(headers).body(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
