//! Water account identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Illustrative default client code.
pub const DEFAULT_CLIENT_CODE: &str = "002024195152";

/// Illustrative default client type.
pub const DEFAULT_CLIENT_TYPE: &str = "IC";

/// Illustrative default cid credential.
pub const DEFAULT_CID: &str = "00FE4A8A2E";

/// Error for invalid account identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// A required identifier was empty.
    #[error("account field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// The three opaque identifiers that select a water account.
///
/// All three are required and must be non-empty. Their format is not
/// validated here; the upstream service rejects identifiers it does not
/// recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    client_code: String,
    client_type: String,
    cid: String,
}

impl Account {
    /// Creates a new account, validating that every identifier is non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if any identifier is empty.
    pub fn new(
        client_code: impl Into<String>,
        client_type: impl Into<String>,
        cid: impl Into<String>,
    ) -> Result<Self, AccountError> {
        let client_code = client_code.into();
        let client_type = client_type.into();
        let cid = cid.into();

        if client_code.is_empty() {
            return Err(AccountError::EmptyField("client_code"));
        }
        if client_type.is_empty() {
            return Err(AccountError::EmptyField("client_type"));
        }
        if cid.is_empty() {
            return Err(AccountError::EmptyField("cid"));
        }

        Ok(Self {
            client_code,
            client_type,
            cid,
        })
    }

    /// Returns the client code.
    #[must_use]
    pub fn client_code(&self) -> &str {
        &self.client_code
    }

    /// Returns the client type code.
    #[must_use]
    pub fn client_type(&self) -> &str {
        &self.client_type
    }

    /// Returns the cid credential.
    #[must_use]
    pub fn cid(&self) -> &str {
        &self.cid
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.client_code, self.client_type)
    }
}
