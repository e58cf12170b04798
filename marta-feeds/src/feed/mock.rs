//! Offline fetcher for testing without API access.
//!
//! Serves canned feed responses as if they were live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use super::error::ClientError;
use super::fetch::{FetchJson, parse_array, redact_query};

/// Fetcher that serves canned JSON arrays instead of calling the API.
///
/// Responses are keyed by the last path segment of the requested URL, with
/// any query string removed: `GetRealtimeArrivals`, `GetAllBus`, or the route
/// number for `GetBusByRoute/{route}`.
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    fixtures: Arc<HashMap<String, Vec<Value>>>,
    requests: Arc<AtomicUsize>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `{key}.json` file in a directory.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, ClientError> {
        let data_dir = data_dir.as_ref();
        let mut fixtures = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            ClientError::NotConfigured(format!("Failed to read fixture directory: {e}"))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                ClientError::NotConfigured(format!("Failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| ClientError::NotConfigured(format!("Invalid filename: {path:?}")))?
                .to_string();

            let json = std::fs::read_to_string(&path).map_err(|e| {
                ClientError::NotConfigured(format!("Failed to read {path:?}: {e}"))
            })?;

            fixtures.insert(key, parse_array(&json)?);
        }

        if fixtures.is_empty() {
            return Err(ClientError::NotConfigured(format!(
                "No fixture files found in {data_dir:?}"
            )));
        }

        Ok(Self {
            fixtures: Arc::new(fixtures),
            requests: Arc::default(),
        })
    }

    /// Add or replace the response served for `key`.
    pub fn with_fixture(mut self, key: impl Into<String>, records: Vec<Value>) -> Self {
        Arc::make_mut(&mut self.fixtures).insert(key.into(), records);
        self
    }

    /// Number of fetches served so far, across all clones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }
}

impl FetchJson for FixtureFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Vec<Value>, ClientError> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let key = fixture_key(url);
        self.fixtures
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::ApiError {
                status: 404,
                message: format!(
                    "No fixture for {key}. Available: {:?}",
                    self.fixtures.keys().collect::<Vec<_>>()
                ),
            })
    }
}

fn fixture_key(url: &str) -> &str {
    let path = redact_query(url);
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}
