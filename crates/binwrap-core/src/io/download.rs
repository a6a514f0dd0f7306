//! Release asset download with bounded, manual redirect handling.
//!
//! Redirects are followed by hand rather than by reqwest's policy so that
//! the hop limit surfaces as its own error and every hop is logged.

use std::path::Path;

use futures::StreamExt;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Maximum number of redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 5;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Too many redirects (more than {limit})")]
    TooManyRedirects { limit: usize },

    #[error("Unexpected status: {0}")]
    Status(u16),
}

/// Build the HTTP client used for release downloads.
///
/// Automatic redirects are disabled; see [`download_following_redirects`].
pub fn client() -> Result<Client, DownloadError> {
    Ok(Client::builder()
        .redirect(Policy::none())
        .user_agent(crate::USER_AGENT)
        .build()?)
}

/// Download `url` into `dest`, following at most [`MAX_REDIRECTS`] hops.
///
/// A 3xx response is only treated as a redirect when it carries a
/// `Location` header; relative locations resolve against the URL that
/// produced them. Anything other than `200 OK` at the end of the chain is
/// an error and nothing is written. On success the body is streamed to
/// `dest` and the number of bytes written is returned.
///
/// `dest` is created (or truncated) only once the final response is known
/// to be good; if streaming fails part-way the caller owns cleanup.
pub async fn download_following_redirects(
    client: &Client,
    url: &str,
    dest: &Path,
) -> Result<u64, DownloadError> {
    let mut current = Url::parse(url).map_err(|source| DownloadError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let mut hops = 0;

    let response = loop {
        tracing::debug!(url = %current, hops, "Requesting release asset");
        let response = client.get(current.clone()).send().await?;
        let status = response.status();

        if status.is_redirection()
            && let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
        {
            if hops >= MAX_REDIRECTS {
                return Err(DownloadError::TooManyRedirects {
                    limit: MAX_REDIRECTS,
                });
            }
            let next = current
                .join(location)
                .map_err(|source| DownloadError::InvalidUrl {
                    url: location.to_string(),
                    source,
                })?;
            tracing::debug!(from = %current, to = %next, status = status.as_u16(), "Following redirect");
            current = next;
            hops += 1;
            continue;
        }

        if status != StatusCode::OK {
            return Err(DownloadError::Status(status.as_u16()));
        }
        break response;
    };

    let total_size = response.content_length();
    tracing::debug!(
        asset = crate::paths::filename_from_url(current.as_str()),
        total_size,
        dest = %dest.display(),
        "Streaming release asset"
    );

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(downloaded)
}
