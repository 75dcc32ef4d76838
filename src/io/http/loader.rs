use std::time::Duration;

use log::{debug, trace};
use reqwest::blocking::Client;

use crate::io::common::loader::{LoadError, RawAssetLoader};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Fetches models from raw-content urls. Blocking, so only ever used from the loader thread.
pub struct HttpModelLoader {
    client: Client,
}

impl HttpModelLoader {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("nextar/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl RawAssetLoader for HttpModelLoader {
    fn load_raw_owned(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        debug!("Fetching {}", url);
        let http_error = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(http_error)?;
        trace!("Fetched {} ({} bytes)", url, body.len());
        Ok(body.to_vec())
    }
}
