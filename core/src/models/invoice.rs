use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AttachmentModel;

/// A bill sent from one company (`company_id`) to another (`customer_id`).
///
/// Once payments have been applied, `outstanding_balance_amount` drops below
/// `total_amount`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceModel {
    pub group_key: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub erp_key: Option<String>,
    pub purchase_order_code: Option<String>,
    pub reference_code: Option<String>,
    pub salesperson_name: Option<String>,
    pub invoice_type_code: Option<String>,
    pub invoice_status_code: Option<String>,
    pub terms_code: Option<String>,
    pub currency_code: Option<String>,
    pub total_amount: Option<f64>,
    pub sales_tax_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub outstanding_balance_amount: Option<f64>,
    pub invoice_date: Option<String>,
    pub discount_date: Option<String>,
    pub posted_date: Option<String>,
    pub invoice_closed_date: Option<String>,
    pub payment_due_date: Option<String>,
    pub is_voided: bool,
    pub in_dispute: bool,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub attachments: Option<Vec<AttachmentModel>>,
}

/// Row of the invoice summary view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceSummaryModel {
    pub group_key: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub payment_due_date: Option<String>,
    pub status: Option<String>,
    pub days_past_due: Option<i32>,
    pub invoice_amount: Option<f64>,
    pub outstanding_balance: Option<f64>,
    pub currency_code: Option<String>,
}

/// Row of the at-risk invoice summary view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtRiskInvoiceSummaryModel {
    pub group_key: Option<Uuid>,
    pub invoice_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub customer_name: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub payment_due_date: Option<String>,
    pub invoice_status: Option<String>,
    pub days_past_due: Option<i32>,
    pub invoice_amount: Option<f64>,
    pub outstanding_balance: Option<f64>,
    pub amount_collected: Option<f64>,
}
