//! Wire models for the Lockstep Platform API.
//!
//! # Design
//! Field names are camelCase on the wire. Every struct carries
//! `#[serde(default)]` so a missing field decodes to its default and unknown
//! fields are ignored; the server owns the schema and adds fields over time.
//! Only `Option` fields accept an explicit `null`. Server-assigned
//! identifiers are `Option<Uuid>` so the same type can be sent on create
//! without inventing an id.

mod attachment;
mod company;
mod invoice;
mod payment;
mod transaction;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use attachment::AttachmentModel;
pub use company::{CompanyModel, ContactModel};
pub use invoice::{AtRiskInvoiceSummaryModel, InvoiceModel, InvoiceSummaryModel};
pub use payment::{
    PaymentDetailHeaderModel, PaymentDetailModel, PaymentModel, PaymentSummaryModel,
    PaymentSummaryTotalsModel,
};
pub use transaction::TransactionModel;

/// Problem-details body returned by the platform for non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorResult {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub title: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub instance: Option<String>,
    pub content: Option<serde_json::Value>,
}

impl ErrorResult {
    /// Decode an error body, falling back to the raw text in `detail` when the
    /// body is not a problem-details object.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorResult>(body) {
            Ok(mut parsed) => {
                parsed.status.get_or_insert(status);
                parsed
            }
            Err(_) => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                ErrorResult {
                    status: Some(status),
                    detail: (!text.is_empty()).then_some(text),
                    ..Default::default()
                }
            }
        }
    }
}

/// Result of a delete or other action that has no record to return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionResultModel {
    pub messages: Vec<String>,
}

/// One page of a Searchlight query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchResult<T> {
    pub records: Vec<T>,
    pub total_count: Option<u64>,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total_count: None,
            page_size: None,
            page_number: None,
        }
    }
}

/// A page of results together with an aggregate summary of the whole query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryFetchResult<T, S> {
    pub records: Vec<T>,
    pub total_count: Option<u64>,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub summary: Option<S>,
}

impl<T, S> Default for SummaryFetchResult<T, S> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total_count: None,
            page_size: None,
            page_number: None,
            summary: None,
        }
    }
}

/// Identity of the caller as seen by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusModel {
    pub user_name: Option<String>,
    pub account_name: Option<String>,
    pub account_company_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub group_key: Option<Uuid>,
    pub logged_in: bool,
    pub error_message: Option<String>,
    pub roles: Vec<String>,
    pub last_logged_in: Option<String>,
    pub api_key_id: Option<Uuid>,
    pub environment: Option<String>,
    pub version: Option<String>,
}
