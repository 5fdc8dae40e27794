use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AttachmentModel;

/// Money sent from one company to another.
///
/// `company_id` is the recipient; the payer is the customer on the applied
/// invoices. A nonzero `unapplied_amount` is a deposit that has not yet been
/// applied to an invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentModel {
    pub group_key: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub erp_key: Option<String>,
    pub erp_update_status: i32,
    pub erp_update_action: i32,
    /// `AR Payment` or `AP Payment`.
    pub payment_type: Option<String>,
    pub tender_type: Option<String>,
    pub is_open: bool,
    pub memo_text: Option<String>,
    pub payment_date: Option<String>,
    pub post_date: Option<String>,
    pub payment_amount: f64,
    pub unapplied_amount: f64,
    pub currency_code: Option<String>,
    pub bank_account_id: Option<Uuid>,
    pub reference_code: Option<String>,
    pub created: Option<String>,
    pub created_user_id: Option<Uuid>,
    pub modified: Option<String>,
    pub modified_user_id: Option<Uuid>,
    pub app_enrollment_id: Option<Uuid>,
    pub is_voided: bool,
    pub in_dispute: bool,
    pub currency_rate: Option<f64>,
    pub base_currency_payment_amount: Option<f64>,
    pub base_currency_unapplied_amount: Option<f64>,
    pub source_modified_date: Option<String>,
    pub attachments: Option<Vec<AttachmentModel>>,
}

/// Row of the payment summary view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentSummaryModel {
    pub group_key: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub erp_key: Option<String>,
    pub payment_type: Option<String>,
    pub tender_type: Option<String>,
    pub payment_date: Option<String>,
    pub post_date: Option<String>,
    pub memo_text: Option<String>,
    pub reference_code: Option<String>,
    pub customer_name: Option<String>,
    pub customer_id: Option<Uuid>,
    pub payment_amount: f64,
    pub unapplied_amount: f64,
    pub invoice_count: Option<u32>,
    pub total_payments_applied: Option<f64>,
    pub is_open: bool,
    pub currency_code: Option<String>,
}

/// Aggregates returned alongside a page of `PaymentSummaryModel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentSummaryTotalsModel {
    pub total_payments_applied: Option<f64>,
    pub total_amount_collected: Option<f64>,
    pub total_unapplied_amount: Option<f64>,
}

/// Aggregated payment figures for the whole account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentDetailHeaderModel {
    pub group_key: Option<Uuid>,
    pub base_currency_code: Option<String>,
    pub customer_count: Option<u32>,
    pub amount_collected: Option<f64>,
    pub unapplied_amount: Option<f64>,
    pub paid_invoice_count: Option<u32>,
    pub open_invoice_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentDetailModel {
    pub group_key: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub memo_text: Option<String>,
    pub reference_code: Option<String>,
    pub primary_contact: Option<String>,
    pub email: Option<String>,
    pub payment_amount: f64,
    pub unapplied_amount: f64,
    pub payment_type: Option<String>,
    pub payment_date: Option<String>,
    pub post_date: Option<String>,
}
