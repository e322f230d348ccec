//! Filesystem fetcher rooted at a static site's resources directory.

use crate::fetch::{FetchError, FetchResult, Fetcher};
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads documents from `root/<path>`.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, path: &str) -> FetchResult<Option<Vec<u8>>> {
        let full_path = path
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        match std::fs::read(&full_path) {
            Ok(bytes) => {
                debug!(
                    "event=document_fetch module=fetch status=ok source=fs path={} bytes={}",
                    path,
                    bytes.len()
                );
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("event=document_fetch module=fetch status=missing source=fs path={path}");
                Ok(None)
            }
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}
