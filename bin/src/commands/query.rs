//! Query command implementation.
//!
//! Runs a single fetch-and-estimate cycle and prints the result. Also the
//! quickest way to check that a set of account identifiers is accepted by
//! the upstream service.

use anyhow::{Context, Result};
use aquameter_lib::prelude::*;
use chrono::Local;

use crate::display;

/// Run one cycle and print the estimate.
pub(crate) async fn query(account: Account, config: ClientConfig, json: bool) -> Result<()> {
    let mut client = PaymentClient::new(config)?;
    let as_of = Local::now().date_naive();

    let result = run_cycle(&mut client, &account, as_of).await;
    client.close();

    let estimate = result.with_context(|| format!("no estimate for account {account}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        display::print_estimate(&estimate);
    }

    Ok(())
}
