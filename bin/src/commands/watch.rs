//! Watch command implementation.
//!
//! Polls the account on a fixed interval until interrupted, retaining the
//! last known estimate across failed refreshes.

use std::time::Duration;

use anyhow::Result;
use aquameter_daemon::{AccountPoller, Scheduler};
use aquameter_lib::prelude::*;

use crate::display;

/// Poll the account every `interval` until ctrl-c.
pub(crate) async fn watch(account: Account, config: ClientConfig, interval: Duration) -> Result<()> {
    let poller = AccountPoller::new(account, config)?;
    let scheduler = Scheduler::new(poller, interval);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let poller = scheduler.run(shutdown).await;

    if let Some(estimate) = poller.last_estimate() {
        println!("Last known estimate:");
        display::print_estimate(estimate);
    }

    Ok(())
}
