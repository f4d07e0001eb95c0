//! Per-account poll state.

use aquameter_lib::{
    Account, ClientConfig, CycleError, FetchError, PaymentClient, UsageEstimate, run_cycle,
};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

/// One configured account and everything needed to poll it.
///
/// Replaces the original host's implicit shared registry: the poller owns
/// its account, its own payment client, and the last known good estimate.
/// A failed refresh leaves the previous estimate in place so the rendering
/// layer can keep showing it as stale rather than dropping to zero.
#[derive(Debug)]
pub struct AccountPoller {
    account: Account,
    client: PaymentClient,
    last_estimate: Option<UsageEstimate>,
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
}

impl AccountPoller {
    /// Creates a poller for `account` with the given client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP session cannot be created.
    pub fn new(account: Account, config: ClientConfig) -> Result<Self, FetchError> {
        let client = PaymentClient::new(config)?;
        Ok(Self {
            account,
            client,
            last_estimate: None,
            last_success: None,
            consecutive_failures: 0,
        })
    }

    /// Creates a poller with default client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP session cannot be created.
    pub fn with_defaults(account: Account) -> Result<Self, FetchError> {
        Self::new(account, ClientConfig::default())
    }

    /// Runs one fetch-then-estimate cycle.
    ///
    /// On success the retained estimate is replaced wholesale; on failure it
    /// is left untouched and the failure is logged with its stage.
    ///
    /// # Errors
    ///
    /// Returns the cycle failure; the previous estimate stays available via
    /// [`last_estimate`](Self::last_estimate).
    pub async fn refresh(&mut self, as_of: NaiveDate) -> Result<&UsageEstimate, CycleError> {
        match run_cycle(&mut self.client, &self.account, as_of).await {
            Ok(estimate) => {
                self.consecutive_failures = 0;
                self.last_success = Some(Utc::now());
                info!(
                    account = %self.account,
                    balance = estimate.balance,
                    daily_cost = estimate.daily_cost,
                    remaining_days = estimate.remaining_days,
                    "refreshed usage estimate"
                );
                Ok(self.last_estimate.insert(estimate))
            }
            Err(err) => {
                self.consecutive_failures += 1;
                warn!(
                    account = %self.account,
                    error = %err,
                    consecutive_failures = self.consecutive_failures,
                    "refresh failed; keeping last known estimate"
                );
                Err(err)
            }
        }
    }

    /// Returns the account being polled.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    /// Returns the last known good estimate, if any refresh has succeeded.
    #[must_use]
    pub const fn last_estimate(&self) -> Option<&UsageEstimate> {
        self.last_estimate.as_ref()
    }

    /// Returns when the last successful refresh completed.
    #[must_use]
    pub const fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    /// Returns the number of refresh failures since the last success.
    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Releases the client's HTTP session. Idempotent.
    pub fn close(&mut self) {
        self.client.close();
    }

    /// Returns true if the client's session is currently released.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.client.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_account() -> Account {
        Account::new("002024195152", "IC", "00FE4A8A2E").unwrap()
    }

    fn unreachable_config() -> ClientConfig {
        ClientConfig {
            endpoint: "http://127.0.0.1:1/invoice/ew/queryPayRecords".to_string(),
            timeout: Duration::from_secs(2),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_poller_starts_empty() {
        let poller = AccountPoller::with_defaults(test_account()).unwrap();
        assert!(poller.last_estimate().is_none());
        assert!(poller.last_success().is_none());
        assert_eq!(poller.consecutive_failures(), 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_state_and_counts() {
        let mut poller = AccountPoller::new(test_account(), unreachable_config()).unwrap();
        let as_of = chrono::NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        assert!(poller.refresh(as_of).await.is_err());
        assert!(poller.last_estimate().is_none());
        assert_eq!(poller.consecutive_failures(), 1);

        assert!(poller.refresh(as_of).await.is_err());
        assert_eq!(poller.consecutive_failures(), 2);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let mut poller = AccountPoller::with_defaults(test_account()).unwrap();
        poller.close();
        assert!(poller.is_closed());
        poller.close();
        assert!(poller.is_closed());
    }
}
