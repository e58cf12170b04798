//! The network collaborator: fetch a URL, get back a JSON array.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::ClientError;

/// Fetches a feed URL and returns its top-level JSON array.
///
/// Implemented by [`HttpFetcher`] for the live API and by
/// [`FixtureFetcher`](super::FixtureFetcher) for canned data.
pub trait FetchJson: Send + Sync {
    fn fetch_json(&self, url: &str) -> impl Future<Output = Result<Vec<Value>, ClientError>> + Send;
}

/// Live HTTP fetcher.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
/// The request timeout is the only time policy; there are no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    semaphore: Arc<Semaphore>,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64, max_concurrent: usize) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        })
    }
}

impl FetchJson for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Vec<Value>, ClientError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ClientError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        debug!(endpoint = redact_query(url), "fetching feed");
        let response = self.http.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let records = parse_array(&body)?;
        debug!(records = records.len(), "feed fetched");
        Ok(records)
    }
}

/// Parse a response body that must be a JSON array.
pub(crate) fn parse_array(body: &str) -> Result<Vec<Value>, ClientError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ClientError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(ClientError::Json {
            message: format!("expected a JSON array, got {}", kind(&other)),
            body: Some(body.chars().take(500).collect()),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The URL without its query string, which carries the API key.
pub(crate) fn redact_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_array_accepts_arrays() {
        let records = parse_array(r#"[{"A": "1"}, {"A": "2"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert!(parse_array("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_array_rejects_other_shapes() {
        let err = parse_array(r#"{"Message": "An error has occurred."}"#).unwrap_err();
        assert!(matches!(err, ClientError::Json { .. }));
        assert!(err.to_string().contains("got an object"));

        let err = parse_array("<html>").unwrap_err();
        assert!(matches!(err, ClientError::Json { body: Some(_), .. }));
    }

    #[test]
    fn parse_array_truncates_long_bodies() {
        let body = format!("\"{}\"", "x".repeat(2000));
        match parse_array(&body).unwrap_err() {
            ClientError::Json { body: Some(body), .. } => assert_eq!(body.len(), 500),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn redact_query_drops_api_key() {
        assert_eq!(
            redact_query("http://example.test/GetRealtimeArrivals?apikey=secret"),
            "http://example.test/GetRealtimeArrivals"
        );
        assert_eq!(redact_query("http://example.test/GetAllBus"), "http://example.test/GetAllBus");
    }

    #[test]
    fn builds_with_defaults() {
        assert!(HttpFetcher::new(30, 5).is_ok());
    }
}
