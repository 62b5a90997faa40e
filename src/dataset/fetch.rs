//! HTTP client for fetching a remote dataset.

use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::LoadError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Blocking client used for `http(s)://` dataset sources
pub struct DatasetClient {
    client: Client,
}

impl DatasetClient {
    /// Create a new client with the default fetch timeout
    pub fn new() -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(DEFAULT_FETCH_TIMEOUT)
            .build()
            .map_err(LoadError::RequestFailed)?;

        Ok(Self { client })
    }

    /// Download the raw CSV body
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        info!("Fetching dataset from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(LoadError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::BadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().map_err(LoadError::RequestFailed)?;
        debug!("Fetched {} bytes", body.len());

        Ok(body.to_vec())
    }
}
