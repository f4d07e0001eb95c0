//! Usage estimation from payment history.

use aquameter_types::PaymentHistory;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during estimation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// All records share one date (or the page holds a single record), so
    /// no daily rate can be derived.
    #[error("cannot derive a daily rate: all records dated {date}")]
    InsufficientSpan {
        /// The date shared by the newest and oldest record.
        date: NaiveDate,
    },
}

/// A derived account reading, recomputed fresh every cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageEstimate {
    /// Average currency units consumed per day, rounded to 2 decimals.
    pub daily_cost: f64,
    /// Projected currency units remaining, rounded to 2 decimals. Negative
    /// when the account has depleted; never clamped.
    pub balance: f64,
    /// Projected days until the balance reaches zero at the current daily
    /// cost, truncated toward zero.
    pub remaining_days: i64,
    /// The payment history the estimate was derived from, retained for
    /// display and audit.
    pub history: PaymentHistory,
}

/// Derives a usage estimate from `history` as of the given calendar date.
///
/// The first record is the most recent top-up: its cost is the currently
/// credited amount and is excluded from the consumption sum. The remaining
/// records are charges spread over the span between the newest and oldest
/// record dates.
///
/// `remaining_days` is truncated toward zero from the unrounded quotient, so
/// the 2-decimal presentation rounding of `daily_cost` and `balance` never
/// changes it. A zero daily cost yields `remaining_days = 0`, an inherited
/// upstream convention rather than an error.
///
/// # Errors
///
/// Returns [`EstimateError::InsufficientSpan`] when the newest and oldest
/// records share a date.
pub fn estimate(
    history: PaymentHistory,
    as_of: NaiveDate,
) -> Result<UsageEstimate, EstimateError> {
    let first = *history.newest();
    let span_days = history.span_days();
    if span_days == 0 {
        return Err(EstimateError::InsufficientSpan { date: first.date });
    }

    let total_cost: f64 = history.records()[1..].iter().map(|r| r.cost).sum();
    let daily_cost = total_cost / span_days as f64;

    let days_since_first = (as_of - first.date).num_days().abs();
    let balance = first.cost - daily_cost * days_since_first as f64;

    let remaining_days = if daily_cost > 0.0 {
        (balance / daily_cost).trunc() as i64
    } else {
        0
    };

    Ok(UsageEstimate {
        daily_cost: round2(daily_cost),
        balance: round2(balance),
        remaining_days,
        history,
    })
}

/// Rounds to 2 decimal places for presentation.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquameter_types::PaymentRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history(records: &[(NaiveDate, f64)]) -> PaymentHistory {
        PaymentHistory::new(
            records
                .iter()
                .map(|&(date, cost)| PaymentRecord::new(date, cost))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_estimate_reference_values() {
        // 61-day span, first record excluded from the consumption sum.
        let input = history(&[
            (date(2024, 1, 10), 100.0),
            (date(2023, 12, 10), 30.0),
            (date(2023, 11, 10), 20.0),
        ]);

        let result = estimate(input, date(2024, 1, 20)).unwrap();

        // total_cost = 50, span = 61 days
        assert!((result.daily_cost - 0.82).abs() < 1e-9);
        // balance = 100 - (50/61) * 10
        assert!((result.balance - 91.80).abs() < 1e-9);
        // floor(91.8032... / 0.8196...) = 111, truncated not rounded
        assert_eq!(result.remaining_days, 111);
    }

    #[test]
    fn test_estimate_retains_history() {
        let input = history(&[(date(2024, 1, 10), 100.0), (date(2023, 11, 10), 20.0)]);

        let result = estimate(input.clone(), date(2024, 1, 20)).unwrap();
        assert_eq!(result.history, input);
    }

    #[test]
    fn test_insufficient_span_single_record() {
        let input = history(&[(date(2024, 1, 10), 100.0)]);

        assert_eq!(
            estimate(input, date(2024, 1, 20)),
            Err(EstimateError::InsufficientSpan {
                date: date(2024, 1, 10)
            })
        );
    }

    #[test]
    fn test_insufficient_span_same_dates() {
        let input = history(&[
            (date(2024, 1, 10), 100.0),
            (date(2024, 1, 10), 30.0),
            (date(2024, 1, 10), 20.0),
        ]);

        assert!(matches!(
            estimate(input, date(2024, 1, 20)),
            Err(EstimateError::InsufficientSpan { .. })
        ));
    }

    #[test]
    fn test_daily_cost_non_negative_for_non_negative_costs() {
        let input = history(&[
            (date(2024, 1, 10), 0.0),
            (date(2023, 12, 20), 12.5),
            (date(2023, 11, 10), 7.5),
        ]);

        let result = estimate(input, date(2024, 1, 20)).unwrap();
        assert!(result.daily_cost >= 0.0);
    }

    #[test]
    fn test_zero_daily_cost_forces_zero_remaining_days() {
        // Only the opening record carries a cost, so the derived rate is
        // zero. Remaining days is zero by inherited convention, regardless
        // of the balance sign.
        let input = history(&[
            (date(2024, 1, 10), 100.0),
            (date(2023, 12, 10), 0.0),
            (date(2023, 11, 10), 0.0),
        ]);

        let result = estimate(input, date(2024, 1, 20)).unwrap();
        assert_eq!(result.daily_cost, 0.0);
        assert_eq!(result.balance, 100.0);
        assert_eq!(result.remaining_days, 0);
    }

    #[test]
    fn test_zero_daily_cost_with_zero_balance() {
        let input = history(&[
            (date(2024, 1, 10), 0.0),
            (date(2023, 11, 10), 0.0),
        ]);

        let result = estimate(input, date(2024, 1, 20)).unwrap();
        assert_eq!(result.remaining_days, 0);
    }

    #[test]
    fn test_negative_balance_is_not_clamped() {
        // Depleted well past zero: 10 - (61/61) * 100 = -90.
        let input = history(&[
            (date(2024, 1, 10), 10.0),
            (date(2023, 11, 10), 61.0),
        ]);

        let result = estimate(input, date(2024, 4, 19)).unwrap();
        assert!((result.balance - -90.0).abs() < 1e-9);
        // Truncation toward zero: -90 / 1 = -90 days.
        assert_eq!(result.remaining_days, -90);
    }

    #[test]
    fn test_remaining_days_truncates_toward_zero() {
        let input = history(&[
            (date(2024, 1, 10), 9.5),
            (date(2024, 1, 3), 4.0),
            (date(2023, 12, 31), 6.0),
        ]);

        // span = 10, total = 10, daily = 1.0, days_since = 3,
        // balance = 9.5 - 3 = 6.5, remaining = trunc(6.5) = 6
        let result = estimate(input, date(2024, 1, 13)).unwrap();
        assert_eq!(result.remaining_days, 6);
    }

    #[test]
    fn test_rounding_does_not_alter_remaining_days_near_zero() {
        // Unrounded balance is a hair above zero; the 2-decimal rounding of
        // the displayed balance must not flip remaining_days negative.
        let input = history(&[
            (date(2024, 1, 10), 3.001),
            (date(2023, 12, 11), 3.0),
        ]);

        // span = 30, daily = 0.1, days_since = 30, balance = 0.001
        let result = estimate(input, date(2024, 2, 9)).unwrap();
        assert_eq!(result.remaining_days, 0);
        assert!(result.balance >= 0.0);
    }

    #[test]
    fn test_as_of_before_first_record_uses_absolute_distance() {
        let input = history(&[
            (date(2024, 1, 10), 100.0),
            (date(2023, 11, 10), 61.0),
        ]);

        // as_of five days before the newest record still debits five days.
        let result = estimate(input, date(2024, 1, 5)).unwrap();
        assert!((result.balance - 95.0).abs() < 1e-9);
    }
}
