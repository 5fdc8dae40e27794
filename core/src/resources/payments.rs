use bytes::Bytes;
use uuid::Uuid;

use crate::client::NO_BODY;
use crate::error::ApiError;
use crate::http::{HttpMethod, QueryOptions};
use crate::models::{
    FetchResult, PaymentDetailHeaderModel, PaymentDetailModel, PaymentModel, PaymentSummaryModel,
    PaymentSummaryTotalsModel, SummaryFetchResult,
};
use crate::response::LockstepResponse;

const BASE: &str = "/api/v1/Payments";

resource! {
    /// Money sent from one company to another.
    ///
    /// Available `include` collections: Applications, Notes, Attachments,
    /// CustomFields.
    PaymentsClient => BASE, PaymentModel {
        retrieve: retrieve_payment,
        update: update_payment,
        delete: delete_payment,
        create: create_payments,
        query: query_payments,
    }
}

impl PaymentsClient<'_> {
    /// Download the payment as a PDF, for payments synced from an app that
    /// supports it.
    pub async fn retrieve_payment_pdf(&self, id: Uuid) -> Result<LockstepResponse<Bytes>, ApiError> {
        self.api
            .request_blob(HttpMethod::Get, &format!("{BASE}/{id}/pdf"), QueryOptions::new(), NO_BODY)
            .await
    }

    /// Query the payment summary view. `include` accepts Summary and Aging.
    pub async fn query_payment_summary_view(
        &self,
        filter: Option<&str>,
        include: Option<&str>,
        order: Option<&str>,
        page_size: Option<u32>,
        page_number: Option<u32>,
    ) -> Result<
        LockstepResponse<SummaryFetchResult<PaymentSummaryModel, PaymentSummaryTotalsModel>>,
        ApiError,
    > {
        let query = QueryOptions::searchlight(filter, include, order, page_size, page_number);
        self.api
            .request(HttpMethod::Get, &format!("{BASE}/views/summary"), query, NO_BODY)
            .await
    }

    /// Aggregated payment figures for the account.
    pub async fn retrieve_payment_detail_header(
        &self,
    ) -> Result<LockstepResponse<PaymentDetailHeaderModel>, ApiError> {
        self.api
            .request(HttpMethod::Get, &format!("{BASE}/views/detail-header"), QueryOptions::new(), NO_BODY)
            .await
    }

    pub async fn query_payment_detail_view(
        &self,
        filter: Option<&str>,
        include: Option<&str>,
        order: Option<&str>,
        page_size: Option<u32>,
        page_number: Option<u32>,
    ) -> Result<LockstepResponse<FetchResult<PaymentDetailModel>>, ApiError> {
        let query = QueryOptions::searchlight(filter, include, order, page_size, page_number);
        self.api
            .request(HttpMethod::Get, &format!("{BASE}/views/detail"), query, NO_BODY)
            .await
    }
}
