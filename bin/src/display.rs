//! Display utilities for the aquameter CLI.

use aquameter_lib::UsageEstimate;

/// Print a human-readable estimate summary: the balance as the primary
/// reading, then the derived attributes and the top-up detail rows.
pub(crate) fn print_estimate(estimate: &UsageEstimate) {
    println!("Balance:        ¥{:.2}", estimate.balance);
    println!("Daily cost:     ¥{:.2}", estimate.daily_cost);
    println!("Remaining days: {}", estimate.remaining_days);

    println!();
    println!("{:<12} {:>10}", "TOP-UP DATE", "AMOUNT");
    println!("{}", "-".repeat(23));
    for record in estimate.history.records() {
        println!("{:<12} {:>10.2}", record.date.to_string(), record.cost);
    }
}
