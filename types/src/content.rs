//! Content addresses returned by the content store.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::TypesError;

/// A publicly resolvable URL pointing at stored content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Wrap a URL string. Only `http://` and `https://` URLs with a host are
    /// accepted.
    pub fn new(url: impl Into<String>) -> Result<Self, TypesError> {
        let url = url.into();
        match Url::parse(&url) {
            Ok(parsed)
                if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some() =>
            {
                Ok(Self(url))
            }
            _ => Err(TypesError::InvalidContentAddress(url)),
        }
    }

    /// Gateway URL for a CID on an IPFS subdomain gateway:
    /// `https://{cid}.ipfs.{gateway_host}/{file_name}`, with the file name
    /// percent-encoded as a single path segment.
    pub fn ipfs_gateway(cid: &str, gateway_host: &str, file_name: &str) -> Result<Self, TypesError> {
        if cid.is_empty() {
            return Err(TypesError::InvalidContentAddress(
                "empty content identifier".to_string(),
            ));
        }
        let base = format!("https://{cid}.ipfs.{gateway_host}/");
        let mut url =
            Url::parse(&base).map_err(|_| TypesError::InvalidContentAddress(base.clone()))?;
        url.path_segments_mut()
            .map_err(|()| TypesError::InvalidContentAddress(base.clone()))?
            .pop_if_empty()
            .push(file_name);
        Self::new(String::from(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
