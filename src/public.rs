//! Public file download without authentication.
//!
//! Resolves a Drive file id or shareable link and streams the bytes to
//! disk through the `uc?export=download` endpoint, including the
//! interstitial confirmation step for files too large to virus-scan.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::{Client, Response};
use tokio::io::AsyncWriteExt;

use crate::error::{DriveError, Result};

/// Download endpoint for shared files.
const DOWNLOAD_URL: &str = "https://drive.google.com/uc";

/// Cookie prefix Drive sets on the large-file interstitial page.
const CONFIRM_COOKIE_PREFIX: &str = "download_warning";

/// Extract the file id from a bare id or a shareable link.
///
/// Supports:
/// - bare ids (returned unchanged)
/// - `https://drive.google.com/file/d/<ID>/view?...`
/// - `https://drive.google.com/uc?id=<ID>&...`
/// - `https://drive.google.com/open?id=<ID>`
pub fn extract_file_id(input: &str) -> Result<String> {
    let looks_like_url = input.starts_with("http://")
        || input.starts_with("https://")
        || input.contains("drive.google.com");

    if !looks_like_url {
        return Ok(input.to_string());
    }

    // Path segment following the /d/ marker.
    if let Some(pos) = input.find("/d/") {
        let rest = &input[pos + 3..];
        let id: String = rest
            .chars()
            .take_while(|c| !matches!(c, '/' | '?' | '#'))
            .collect();
        if !id.is_empty() {
            return Ok(id);
        }
    }

    // id query parameter (uc and open style links).
    for marker in ["?id=", "&id="] {
        if let Some(pos) = input.find(marker) {
            let rest = &input[pos + marker.len()..];
            let id: String = rest
                .chars()
                .take_while(|c| !matches!(c, '&' | '#'))
                .collect();
            if !id.is_empty() {
                return Ok(id);
            }
        }
    }

    Err(DriveError::InvalidInput(format!(
        "Could not extract a file id from {}",
        input
    )))
}

/// Download a shared file given an id or shareable link.
///
/// Convenience entry point: resolves the id out of whatever form the
/// caller passed, then delegates to [`download_with_id`].
pub async fn download(
    file_id_or_url: &str,
    output: Option<&Path>,
    quiet: bool,
) -> Result<PathBuf> {
    let file_id = extract_file_id(file_id_or_url)?;
    download_with_id(&file_id, output, quiet).await
}

/// Download a shared file given its bare id.
///
/// The output path is the caller's when supplied, else the
/// `Content-Disposition` filename, else the id itself. Bytes are streamed
/// to disk; percentage progress is printed while the total size is known
/// and `quiet` is off.
pub async fn download_with_id(
    file_id: &str,
    output: Option<&Path>,
    quiet: bool,
) -> Result<PathBuf> {
    let client = Client::builder().cookie_store(true).build()?;

    let url = format!("{}?export=download&id={}", DOWNLOAD_URL, file_id);
    let mut response = client.get(&url).send().await?;

    // Files too large to scan get an interstitial; the warning cookie's
    // value must be echoed back as a query parameter to proceed.
    if let Some(token) = confirm_token(&response) {
        let confirmed = format!("{}&confirm={}", url, token);
        response = client.get(&confirmed).send().await?;
    }

    if !response.status().is_success() {
        return Err(DriveError::ApiError {
            code: response.status().as_u16(),
            message: format!("Server returned status {}", response.status()),
        });
    }

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(
            filename_from_headers(response.headers()).unwrap_or_else(|| file_id.to_string()),
        ),
    };

    write_stream(response, &output_path, quiet).await?;
    Ok(output_path)
}

fn confirm_token(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name().starts_with(CONFIRM_COOKIE_PREFIX))
        .map(|cookie| cookie.value().to_string())
}

fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    let disposition = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    parse_disposition_filename(disposition)
}

/// Pull the plain `filename=` value out of a Content-Disposition header.
fn parse_disposition_filename(disposition: &str) -> Option<String> {
    let rest = disposition.split("filename=").nth(1)?;
    let name = rest.split(';').next()?.trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

async fn write_stream(response: Response, output_path: &Path, quiet: bool) -> Result<()> {
    let total = response.content_length().unwrap_or(0);
    let mut file = tokio::fs::File::create(output_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        // Progress is suppressed when the total size is unknown.
        if !quiet && total > 0 {
            print!(
                "\rDownloading: {:.1}% ({}/{} bytes)",
                (downloaded as f64 / total as f64) * 100.0,
                downloaded,
                total
            );
            let _ = std::io::stdout().flush();
        }
    }

    file.flush().await?;
    if !quiet && total > 0 {
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_passes_through() {
        let id = extract_file_id("1a2B3c4D5e6F7g8H").unwrap();
        assert_eq!(id, "1a2B3c4D5e6F7g8H");
    }

    #[test]
    fn test_share_link_matches_bare_id() {
        let bare = extract_file_id("1a2B3c4D5e6F7g8H").unwrap();
        let link = extract_file_id(
            "https://drive.google.com/file/d/1a2B3c4D5e6F7g8H/view?usp=sharing",
        )
        .unwrap();
        assert_eq!(bare, link);
    }

    #[test]
    fn test_d_segment_without_trailing_path() {
        let id = extract_file_id("https://drive.google.com/file/d/1a2B3c4D").unwrap();
        assert_eq!(id, "1a2B3c4D");
    }

    #[test]
    fn test_uc_and_open_links() {
        let id = extract_file_id("https://drive.google.com/uc?id=1a2B3c4D&export=download").unwrap();
        assert_eq!(id, "1a2B3c4D");

        let id = extract_file_id("https://drive.google.com/open?id=1a2B3c4D").unwrap();
        assert_eq!(id, "1a2B3c4D");

        let id = extract_file_id("https://drive.google.com/uc?export=download&id=1a2B3c4D").unwrap();
        assert_eq!(id, "1a2B3c4D");
    }

    #[test]
    fn test_url_without_id_is_rejected() {
        let err = extract_file_id("https://drive.google.com/drive/my-drive").unwrap_err();
        assert!(matches!(err, DriveError::InvalidInput(_)));
    }

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            parse_disposition_filename(r#"attachment; filename="archive.zip""#).as_deref(),
            Some("archive.zip")
        );
        assert_eq!(
            parse_disposition_filename("attachment; filename=plain.txt").as_deref(),
            Some("plain.txt")
        );
        assert_eq!(
            parse_disposition_filename(r#"attachment; filename="a b.txt"; filename*=UTF-8''a%20b.txt"#)
                .as_deref(),
            Some("a b.txt")
        );
        assert_eq!(parse_disposition_filename("attachment"), None);
    }
}
