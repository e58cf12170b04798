//! Rail and bus feed clients.
//!
//! Each client owns a [`FetchJson`] collaborator and turns one fetch into one
//! snapshot. The rail client also carries a [`StationDirectory`], which can be
//! shared between clients so that new stations are learned once.

use std::fmt;

use reqwest::Url;
use tracing::debug;

use crate::snapshot::{Arrivals, BatchPolicy, Buses};
use crate::stations::StationDirectory;

use super::error::ClientError;
use super::fetch::{FetchJson, HttpFetcher};

/// Default base URL for the rail feed.
const DEFAULT_RAIL_BASE_URL: &str = "http://developer.itsmarta.com";

/// Default base URL for the bus feed.
const DEFAULT_BUS_BASE_URL: &str = "http://developer.itsmarta.com/BRDRestService";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VAR: &str = "MARTA_API_KEY";
const BASE_URL_VAR: &str = "MARTA_BASE_URL";

/// Configuration for the rail client.
#[derive(Clone)]
pub struct RailConfig {
    /// API key, sent as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// What to do with records that fail to normalize
    pub batch_policy: BatchPolicy,
}

impl RailConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_RAIL_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_policy: BatchPolicy::default(),
        }
    }

    /// Read `MARTA_API_KEY` and, if set, `MARTA_BASE_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClientError::NotConfigured(format!("{API_KEY_VAR} is not set")))?;

        let mut config = Self::new(api_key);
        if let Some(url) = lookup(BASE_URL_VAR).filter(|url| !url.is_empty()) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    /// The real-time arrivals URL, including the API key.
    pub fn arrivals_url(&self) -> Result<String, ClientError> {
        let base = self.base_url.trim_end_matches('/');
        let url = Url::parse_with_params(
            &format!("{base}/RealtimeTrain/RestServiceNextTrain/GetRealtimeArrivals"),
            &[("apikey", self.api_key.as_str())],
        )
        .map_err(|e| ClientError::NotConfigured(format!("invalid base URL {base}: {e}")))?;
        Ok(url.to_string())
    }
}

impl fmt::Debug for RailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RailConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_concurrent", &self.max_concurrent)
            .field("timeout_secs", &self.timeout_secs)
            .field("batch_policy", &self.batch_policy)
            .finish()
    }
}

/// Configuration for the bus client. The bus feed needs no key.
#[derive(Debug, Clone)]
pub struct BusConfig {
    pub base_url: String,
    pub max_concurrent: usize,
    pub timeout_secs: u64,
    pub batch_policy: BatchPolicy,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BUS_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_policy: BatchPolicy::default(),
        }
    }
}

impl BusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    /// The URL for all buses, or for one route.
    pub fn buses_url(&self, route: Option<&str>) -> Result<String, ClientError> {
        let base = self.base_url.trim_end_matches('/');
        let invalid = |reason: String| ClientError::NotConfigured(format!("invalid base URL {base}: {reason}"));

        let mut url = Url::parse(&format!("{base}/RestBusRealTimeService"))
            .map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("cannot carry a path".to_string()))?;
            match route {
                Some(route) => {
                    segments.push("GetBusByRoute").push(route);
                }
                None => {
                    segments.push("GetAllBus");
                }
            }
        }
        Ok(url.to_string())
    }
}

/// Rail arrivals client.
///
/// # Examples
///
/// ```no_run
/// use marta_feeds::{RailClient, RailConfig};
///
/// # async fn run() -> Result<(), marta_feeds::ClientError> {
/// let client = RailClient::new(RailConfig::from_env()?)?;
/// let arrivals = client.arrivals().await?;
/// for arrival in arrivals.by_station(client.directory(), "five points").northbound() {
///     println!("{} {}", arrival.line(), arrival.waiting_time());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RailClient<F = HttpFetcher> {
    fetcher: F,
    config: RailConfig,
    directory: StationDirectory,
}

impl RailClient {
    /// Create a client that talks to the live API.
    pub fn new(config: RailConfig) -> Result<Self, ClientError> {
        let fetcher = HttpFetcher::new(config.timeout_secs, config.max_concurrent)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: FetchJson> RailClient<F> {
    /// Create a client over any fetcher, with a fresh default directory.
    pub fn with_fetcher(config: RailConfig, fetcher: F) -> Self {
        Self {
            fetcher,
            config,
            directory: StationDirectory::new(),
        }
    }

    /// Use a shared station directory.
    pub fn with_directory(mut self, directory: StationDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    pub fn config(&self) -> &RailConfig {
        &self.config
    }

    /// Fetch a fresh arrivals snapshot, sorted by next arrival time.
    ///
    /// New stations seen in the response are added to the directory.
    pub async fn arrivals(&self) -> Result<Arrivals, ClientError> {
        let url = self.config.arrivals_url()?;
        let values = self.fetcher.fetch_json(&url).await?;
        debug!(records = values.len(), "received rail feed");

        Ok(Arrivals::from_arrivals(
            &values,
            &self.directory,
            self.config.batch_policy,
        )?)
    }
}

/// Bus positions client.
#[derive(Debug, Clone)]
pub struct BusClient<F = HttpFetcher> {
    fetcher: F,
    config: BusConfig,
}

impl BusClient {
    /// Create a client for the live API with default settings.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Result<Self, ClientError> {
        let fetcher = HttpFetcher::new(config.timeout_secs, config.max_concurrent)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: FetchJson> BusClient<F> {
    pub fn with_fetcher(config: BusConfig, fetcher: F) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Fetch all buses, or only those on `route`. Feed order is kept.
    pub async fn buses(&self, route: Option<&str>) -> Result<Buses, ClientError> {
        let url = self.config.buses_url(route)?;
        let values = self.fetcher.fetch_json(&url).await?;
        debug!(records = values.len(), route, "received bus feed");

        Ok(Buses::from_buses(&values, self.config.batch_policy)?)
    }
}
