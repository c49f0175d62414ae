//! Shared HTTP plumbing for the hosted-service clients.

use std::time::Duration;

use reqwest::{Response, Url};
use veriseal_store::CollaboratorError;

use crate::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest response body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

pub(crate) fn build_client() -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| ClientError::Build(e.to_string()))
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: "scheme must be http or https".into(),
        });
    }
    Ok(url)
}

/// Join `path` onto a base URL, keeping any path prefix the base already has.
pub(crate) fn endpoint(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map a transport-level failure.
pub(crate) fn transport(e: reqwest::Error) -> CollaboratorError {
    if e.is_timeout() || e.is_connect() {
        CollaboratorError::Unavailable(e.to_string())
    } else if e.is_decode() {
        CollaboratorError::InvalidResponse(e.to_string())
    } else {
        CollaboratorError::Other(e.to_string())
    }
}

/// Pass successful responses through; turn anything else into `Http`.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, CollaboratorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(CollaboratorError::Http {
        status: status.as_u16(),
        body,
    })
}
