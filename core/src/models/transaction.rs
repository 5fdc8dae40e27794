use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An invoice, credit memo or payment seen through the unified transaction view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionModel {
    pub group_key: Option<Uuid>,
    pub base_currency_code: Option<String>,
    pub reference_number: Option<String>,
    pub transaction_id: Option<Uuid>,
    pub transaction_status: Option<String>,
    pub transaction_type: Option<String>,
    pub transaction_sub_type: Option<String>,
    pub transaction_date: Option<String>,
    pub due_date: Option<String>,
    pub days_past_due: i32,
    pub currency_code: Option<String>,
    pub transaction_amount: f64,
    pub outstanding_amount: Option<f64>,
    pub base_currency_transaction_amount: f64,
    pub base_currency_outstanding_amount: Option<f64>,
    pub transaction_detail_count: u32,
    pub supports_erp_pdf_retrieval: bool,
    pub transaction_customer_id: Option<Uuid>,
}
