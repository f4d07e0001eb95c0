//! Wire format of the payment record API.
//!
//! Field names mirror the upstream JSON exactly. The response is validated
//! all-or-nothing: one malformed record fails the whole batch.

use aquameter_types::{PaymentHistory, PaymentRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::FetchError;

/// Date format used by the `pdate` field.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request body for the payment record query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
    pub(crate) client_code: &'a str,
    pub(crate) client_type: &'a str,
    pub(crate) cid: &'a str,
    pub(crate) page: PageSpec,
}

/// Paging parameters; the query always asks for the first page.
#[derive(Debug, Serialize)]
pub(crate) struct PageSpec {
    pub(crate) current: u32,
    pub(crate) size: u32,
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(rename = "resultData")]
    pub(crate) result_data: Option<ResultData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultData {
    #[serde(default)]
    pub(crate) records: Vec<RawRecord>,
}

/// One record as sent by upstream. Fields are optional so that a missing
/// field surfaces as a `MalformedRecord` failure rather than a decode error.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub(crate) pdate: Option<String>,
    pub(crate) rlje: Option<CostValue>,
}

/// The `rlje` amount arrives as either a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CostValue {
    Number(f64),
    Text(String),
}

/// Maps raw records into a validated [`PaymentHistory`].
///
/// Upstream ordering (newest first) is preserved. Any record with a missing
/// or unparsable field fails the whole batch.
pub(crate) fn into_history(records: Vec<RawRecord>) -> Result<PaymentHistory, FetchError> {
    let mut out = Vec::with_capacity(records.len());

    for (index, raw) in records.into_iter().enumerate() {
        let pdate = raw.pdate.ok_or(FetchError::MalformedRecord {
            index,
            field: "pdate",
        })?;
        let date = NaiveDate::parse_from_str(&pdate, DATE_FORMAT).map_err(|_| {
            FetchError::MalformedRecord {
                index,
                field: "pdate",
            }
        })?;

        let cost = match raw.rlje {
            Some(CostValue::Number(n)) => n,
            Some(CostValue::Text(text)) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| FetchError::MalformedRecord {
                        index,
                        field: "rlje",
                    })?
            }
            None => {
                return Err(FetchError::MalformedRecord {
                    index,
                    field: "rlje",
                });
            }
        };

        out.push(PaymentRecord::new(date, cost));
    }

    PaymentHistory::new(out).ok_or(FetchError::EmptyHistory)
}
