//! HTTP client for the payment record API.

use std::time::Duration;

use aquameter_types::{Account, PaymentHistory};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::wire;

/// Query endpoint of the utility's invoicing service.
pub const DEFAULT_ENDPOINT: &str = "http://dzfp.xazls.com:54432/invoice/ew/queryPayRecords";

/// Connection timeout, separate from the request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the payment client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Query endpoint URL.
    pub endpoint: String,
    /// Request timeout. Sized to tolerate a slow upstream, not to bound
    /// latency tightly.
    pub timeout: Duration,
    /// Number of most recent records to request (first page only).
    pub page_size: u32,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(120),
            page_size: 10,
            user_agent: format!("aquameter/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur during one fetch.
///
/// Every variant resolves to "no estimate this cycle"; none of them crash
/// the process. `Rejected` (upstream refused the query, e.g. bad
/// credentials) is deliberately distinct from `Transport`/`Timeout`
/// (transient network trouble) so operators can tell them apart.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network or connection failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The bounded wait elapsed before a response arrived.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream explicitly refused the query.
    #[error("upstream rejected the query: {message}")]
    Rejected {
        /// Message supplied by upstream, when available.
        message: String,
    },

    /// The response carried no payment records.
    #[error("payment history is empty")]
    EmptyHistory,

    /// A record was missing an expected field or carried an unparsable
    /// value. Fails the whole batch; no partial results.
    #[error("malformed payment record at index {index}: bad or missing `{field}`")]
    MalformedRecord {
        /// Position of the offending record in the response.
        index: usize,
        /// The upstream field that was missing or unparsable.
        field: &'static str,
    },

    /// Any other parse or runtime error.
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Client for the payment record API.
///
/// Holds one reusable pooled session across calls. The session is created
/// lazily, released by [`close`](Self::close), and re-created on the next
/// query after a close. The underlying `reqwest::Client` is safe to share
/// across concurrent independent requests.
#[derive(Debug)]
pub struct PaymentClient {
    http: Option<reqwest::Client>,
    config: ClientConfig,
}

impl PaymentClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP session cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = Self::build_session(&config)?;
        Ok(Self {
            http: Some(http),
            config,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP session cannot be created.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Queries the most recent payment records for `account`.
    ///
    /// Issues a single request; there is no retry within one call. The next
    /// scheduled cycle is the only retry mechanism.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing exactly which stage failed.
    pub async fn query_history(&mut self, account: &Account) -> Result<PaymentHistory, FetchError> {
        let request = wire::QueryRequest {
            client_code: account.client_code(),
            client_type: account.client_type(),
            cid: account.cid(),
            page: wire::PageSpec {
                current: 1,
                size: self.config.page_size,
            },
        };
        let endpoint = self.config.endpoint.clone();
        let timeout = self.config.timeout;
        let http = self.session()?;

        debug!(account = %account, endpoint = %endpoint, "querying payment records");

        let response = http
            .post(&endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;
        let response = response.error_for_status().map_err(|e| classify(e, timeout))?;
        let body: wire::QueryResponse =
            response.json().await.map_err(|e| classify(e, timeout))?;

        evaluate_response(account, body)
    }

    /// Releases the HTTP session.
    ///
    /// Idempotent: closing an already-closed client is a no-op. A later
    /// query re-creates the session.
    pub fn close(&mut self) {
        self.http = None;
    }

    /// Returns true if the HTTP session is currently released.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Returns the live session, re-creating it if the client was closed.
    fn session(&mut self) -> Result<&reqwest::Client, FetchError> {
        let http = match self.http.take() {
            Some(client) => client,
            None => Self::build_session(&self.config)?,
        };
        Ok(self.http.insert(http))
    }

    fn build_session(config: &ClientConfig) -> Result<reqwest::Client, FetchError> {
        let client = reqwest::Client::builder()
            // One account polled on the order of once per day; a single idle
            // connection is plenty
            .pool_max_idle_per_host(1)
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(client)
    }
}

/// Validates a decoded response envelope and maps it to a payment history.
///
/// A falsy success flag means upstream explicitly refused the request and
/// must stay distinguishable from transport trouble.
fn evaluate_response(
    account: &Account,
    body: wire::QueryResponse,
) -> Result<PaymentHistory, FetchError> {
    if !body.success {
        let message = body
            .message
            .unwrap_or_else(|| "no message supplied".to_string());
        error!(account = %account, %message, "upstream rejected payment query");
        return Err(FetchError::Rejected { message });
    }

    let records = body.result_data.map(|d| d.records).unwrap_or_default();
    if records.is_empty() {
        warn!(account = %account, "payment query returned no records");
        return Err(FetchError::EmptyHistory);
    }

    wire::into_history(records)
}

/// Splits `reqwest` failures: elapsed timeouts, body-decode problems, and
/// everything else as transport trouble.
fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else if err.is_decode() {
        FetchError::Unexpected(err.to_string())
    } else {
        FetchError::Transport(err)
    }
}
