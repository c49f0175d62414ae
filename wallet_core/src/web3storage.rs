//! Web3.Storage pinning client.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};
use veriseal_store::{CollaboratorError, ContentStore};
use veriseal_types::{ContentAddress, UploadCandidate};

use crate::http::{self, build_client, ensure_success, parse_base_url, transport};
use crate::ClientError;

pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://api.web3.storage";
pub const DEFAULT_GATEWAY_HOST: &str = "w3s.link";

#[derive(Deserialize)]
struct UploadResponse {
    cid: String,
}

/// Pins candidates on Web3.Storage and hands back their gateway URL.
pub struct Web3StorageClient {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    gateway_host: String,
}

impl Web3StorageClient {
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_endpoint(DEFAULT_UPLOAD_ENDPOINT, token)
    }

    pub fn with_endpoint(endpoint: &str, token: impl Into<String>) -> Result<Self, ClientError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::MissingCredential("web3.storage token"));
        }
        Ok(Self {
            client: build_client()?,
            endpoint: parse_base_url(endpoint)?,
            token,
            gateway_host: DEFAULT_GATEWAY_HOST.to_string(),
        })
    }

    pub fn with_gateway_host(mut self, host: impl Into<String>) -> Self {
        self.gateway_host = host.into();
        self
    }

    pub fn gateway_host(&self) -> &str {
        &self.gateway_host
    }
}

#[async_trait]
impl ContentStore for Web3StorageClient {
    async fn store(&self, candidate: &UploadCandidate) -> Result<ContentAddress, CollaboratorError> {
        let name = urlencoding::encode(candidate.name());
        debug!(name = candidate.name(), bytes = candidate.size(), "uploading to web3.storage");

        let response = self
            .client
            .post(http::endpoint(&self.endpoint, "upload"))
            .bearer_auth(&self.token)
            .header("X-NAME", name.as_ref())
            .header(reqwest::header::CONTENT_TYPE, candidate.media_type())
            .body(candidate.payload().to_vec())
            .send()
            .await
            .map_err(transport)?;

        let body: UploadResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        let address = ContentAddress::ipfs_gateway(&body.cid, &self.gateway_host, candidate.name())
            .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
        info!(cid = %body.cid, "content pinned");
        Ok(address)
    }
}
