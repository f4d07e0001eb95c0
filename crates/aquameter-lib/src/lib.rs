//! Library facade for the aquameter water account monitor.
//!
//! This is a facade crate that re-exports functionality from the aquameter
//! workspace crates and provides the fetch-then-estimate pipeline.
//!
//! # Quick Start
//!
//! ```ignore
//! use aquameter_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let account = Account::new("002024195152", "IC", "00FE4A8A2E")?;
//!     let mut client = PaymentClient::with_defaults()?;
//!
//!     let as_of = chrono::Local::now().date_naive();
//!     let estimate = run_cycle(&mut client, &account, as_of).await?;
//!     println!("balance: {:.2}", estimate.balance);
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/aquameter/aquameter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod pipeline;

// Re-export core types
pub use aquameter_types::*;

// Re-export fetch functionality
pub use aquameter_fetch::{ClientConfig, DEFAULT_ENDPOINT, FetchError, PaymentClient};

// Re-export estimation
pub use aquameter_estimate::{EstimateError, UsageEstimate, estimate};

pub use pipeline::{CycleError, run_cycle};

/// Prelude module for convenient imports.
///
/// ```
/// use aquameter_lib::prelude::*;
/// ```
pub mod prelude {
    pub use aquameter_types::{Account, AccountError, PaymentHistory, PaymentRecord};

    pub use aquameter_fetch::{ClientConfig, FetchError, PaymentClient};

    pub use aquameter_estimate::{EstimateError, UsageEstimate, estimate};

    pub use crate::pipeline::{CycleError, run_cycle};
}
