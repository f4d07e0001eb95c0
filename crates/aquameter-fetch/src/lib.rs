//! Payment API client for the aquameter water account monitor.
//!
//! This crate provides the fetch half of the pipeline:
//!
//! - [`PaymentClient`] - HTTP client that queries the payment record API
//! - [`ClientConfig`] - endpoint, timeout, and paging configuration
//! - [`FetchError`] - taxonomy of everything that can go wrong in one fetch

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/aquameter/aquameter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod wire;

pub use client::{ClientConfig, DEFAULT_ENDPOINT, FetchError, PaymentClient};
