//! The fetch-then-estimate pipeline.

use aquameter_estimate::{EstimateError, UsageEstimate, estimate};
use aquameter_fetch::{FetchError, PaymentClient};
use aquameter_types::Account;
use chrono::NaiveDate;
use thiserror::Error;

/// Failure of one pipeline cycle.
///
/// Either half can fail; both resolve to "no estimate this cycle". A partial
/// or garbage estimate is never produced.
#[derive(Error, Debug)]
pub enum CycleError {
    /// The fetch stage failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The estimation stage failed.
    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

/// Runs one fetch-then-estimate cycle for `account`.
///
/// This is the single entry point a host scheduler calls on its interval.
/// The pipeline is strictly sequential with one outstanding network call and
/// holds no state between invocations; retaining the last good estimate
/// across failures is the caller's job.
///
/// # Errors
///
/// Returns a [`CycleError`] naming the stage that failed.
pub async fn run_cycle(
    client: &mut PaymentClient,
    account: &Account,
    as_of: NaiveDate,
) -> Result<UsageEstimate, CycleError> {
    let history = client.query_history(account).await?;
    let usage = estimate(history, as_of)?;
    Ok(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquameter_fetch::ClientConfig;
    use aquameter_types::{PaymentHistory, PaymentRecord};
    use chrono::NaiveDate;
    use std::time::Duration;

    #[test]
    fn test_cycle_error_wraps_both_stages() {
        let fetch: CycleError = FetchError::EmptyHistory.into();
        assert!(matches!(fetch, CycleError::Fetch(FetchError::EmptyHistory)));

        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let est: CycleError = EstimateError::InsufficientSpan { date }.into();
        assert!(matches!(est, CycleError::Estimate(_)));
    }

    #[test]
    fn test_estimation_failure_reachable_through_pipeline_types() {
        // A same-date history passes the fetch contract but must fail
        // estimation, surfacing as the estimate stage.
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let history = PaymentHistory::new(vec![
            PaymentRecord::new(date, 100.0),
            PaymentRecord::new(date, 30.0),
        ])
        .unwrap();

        let result: Result<UsageEstimate, CycleError> =
            estimate(history, date).map_err(CycleError::from);
        assert!(matches!(
            result,
            Err(CycleError::Estimate(EstimateError::InsufficientSpan { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cycle_fails_as_fetch_stage_when_unreachable() {
        let mut client = PaymentClient::new(ClientConfig {
            endpoint: "http://127.0.0.1:1/invoice/ew/queryPayRecords".to_string(),
            timeout: Duration::from_secs(2),
            ..ClientConfig::default()
        })
        .unwrap();
        let account = Account::new("002024195152", "IC", "00FE4A8A2E").unwrap();
        let as_of = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        let result = run_cycle(&mut client, &account, as_of).await;
        assert!(matches!(result, Err(CycleError::Fetch(_))));
    }
}
