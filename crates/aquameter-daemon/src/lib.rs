//! Interval scheduling and poll state for the aquameter water account
//! monitor.
//!
//! This crate plays the host-scheduler role around the core pipeline:
//!
//! - [`AccountPoller`] - per-account state: its own client and the last
//!   known good estimate
//! - [`Scheduler`] - invokes the pipeline on a fixed interval, serialized,
//!   until shut down

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/aquameter/aquameter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod poller;
mod scheduler;

pub use poller::AccountPoller;
pub use scheduler::{DEFAULT_INTERVAL, Scheduler};
