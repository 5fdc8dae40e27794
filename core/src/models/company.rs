use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A business entity: the account owner itself, a customer or a vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyModel {
    pub group_key: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub erp_key: Option<String>,
    /// `Customer`, `Vendor`, `Companies` or `Group`.
    pub company_type: Option<String>,
    pub company_status: Option<String>,
    pub parent_company_id: Option<Uuid>,
    pub is_active: bool,
    pub default_currency_code: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

/// A person at a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactModel {
    pub group_key: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub erp_key: Option<String>,
    pub contact_name: Option<String>,
    pub contact_code: Option<String>,
    pub title: Option<String>,
    pub role_code: Option<String>,
    pub email_address: Option<String>,
    pub phone: Option<String>,
    pub is_primary: bool,
    pub is_active: bool,
    pub created: Option<String>,
    pub modified: Option<String>,
}
