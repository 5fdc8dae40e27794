use bytes::Bytes;
use uuid::Uuid;

use crate::client::NO_BODY;
use crate::error::ApiError;
use crate::http::{HttpMethod, QueryOptions};
use crate::models::{AtRiskInvoiceSummaryModel, FetchResult, InvoiceModel, InvoiceSummaryModel};
use crate::response::LockstepResponse;

const BASE: &str = "/api/v1/Invoices";

resource! {
    /// Bills sent from one company to another.
    ///
    /// Available `include` collections: Addresses, Lines, Payments, Notes,
    /// Attachments, Company, Customer, CustomFields, CreditMemos.
    InvoicesClient => BASE, InvoiceModel {
        retrieve: retrieve_invoice,
        update: update_invoice,
        delete: delete_invoice,
        create: create_invoices,
        query: query_invoices,
    }
}

impl InvoicesClient<'_> {
    /// Query invoices through the summary view, which adds customer and
    /// aging fields.
    pub async fn query_invoice_summary_view(
        &self,
        filter: Option<&str>,
        include: Option<&str>,
        order: Option<&str>,
        page_size: Option<u32>,
        page_number: Option<u32>,
    ) -> Result<LockstepResponse<FetchResult<InvoiceSummaryModel>>, ApiError> {
        let query = QueryOptions::searchlight(filter, include, order, page_size, page_number);
        self.api
            .request(HttpMethod::Get, &format!("{BASE}/views/summary"), query, NO_BODY)
            .await
    }

    pub async fn query_at_risk_invoice_summary_view(
        &self,
        filter: Option<&str>,
        include: Option<&str>,
        order: Option<&str>,
        page_size: Option<u32>,
        page_number: Option<u32>,
    ) -> Result<LockstepResponse<FetchResult<AtRiskInvoiceSummaryModel>>, ApiError> {
        let query = QueryOptions::searchlight(filter, include, order, page_size, page_number);
        self.api
            .request(HttpMethod::Get, &format!("{BASE}/views/at-risk-summary"), query, NO_BODY)
            .await
    }

    /// Download the invoice as a PDF. Only available for invoices synced
    /// from an app that supports it.
    pub async fn retrieve_invoice_pdf(&self, id: Uuid) -> Result<LockstepResponse<Bytes>, ApiError> {
        self.api
            .request_blob(HttpMethod::Get, &format!("{BASE}/{id}/pdf"), QueryOptions::new(), NO_BODY)
            .await
    }
}
