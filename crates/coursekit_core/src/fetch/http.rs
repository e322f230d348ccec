//! Blocking HTTP fetcher for a deployed static site.

use crate::fetch::{FetchError, FetchResult, Fetcher};
use log::debug;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches documents relative to `base_url` (e.g. `https://host/resources`).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> FetchResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| FetchError::Transport {
                path: base_url.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { base_url, client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, path: &str) -> FetchResult<Option<Vec<u8>>> {
        let url = format!("{}/{}", self.base_url, path);
        let transport = |err: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            message: err.to_string(),
        };

        let response = self.client.get(&url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            debug!(
                "event=document_fetch module=fetch status=missing source=http path={} http_status={}",
                path,
                status.as_u16()
            );
            return Ok(None);
        }
        let body = response.bytes().map_err(transport)?;
        debug!(
            "event=document_fetch module=fetch status=ok source=http path={} bytes={}",
            path,
            body.len()
        );
        Ok(Some(body.to_vec()))
    }
}
