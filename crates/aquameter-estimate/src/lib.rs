//! Usage and balance estimation for the aquameter water account monitor.
//!
//! This crate provides the derive half of the pipeline:
//!
//! - [`estimate`] - computes a [`UsageEstimate`] from a payment history
//! - [`UsageEstimate`] - daily cost, projected balance, and remaining days
//! - [`EstimateError`] - the single algorithmic failure state

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/aquameter/aquameter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimator;

pub use estimator::{EstimateError, UsageEstimate, estimate};
