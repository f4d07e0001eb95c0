//! Core types for the aquameter water account monitor.
//!
//! This crate provides the fundamental data structures used throughout
//! aquameter:
//!
//! - [`PaymentRecord`] - A single top-up transaction with date and amount
//! - [`PaymentHistory`] - A non-empty, newest-first sequence of payment records
//! - [`Account`] - The opaque identifiers that select a water account

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/aquameter/aquameter/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod account;
mod payment;

pub use account::{
    Account, AccountError, DEFAULT_CID, DEFAULT_CLIENT_CODE, DEFAULT_CLIENT_TYPE,
};
pub use payment::{PaymentHistory, PaymentRecord};
