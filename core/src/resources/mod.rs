//! Resource façades.
//!
//! # Design
//! Each façade borrows the shared `LockstepApi` and maps one method to one
//! HTTP call. The five operations most resources share are generated by
//! `resource!` from a one-line table entry per operation; anything specific
//! to a resource is written out by hand in that resource's module.

/// Declare a façade type and generate its standard operations.
///
/// Supported operations, each given the method name to generate:
/// - `retrieve`: `GET {base}/{id}?include=`
/// - `update`: `PATCH {base}/{id}` with a partial JSON body
/// - `delete`: `DELETE {base}/{id}`
/// - `create`: `POST {base}` with an array body
/// - `query`: `GET {base}/query` with the Searchlight parameters
macro_rules! resource {
    (
        $(#[$meta:meta])*
        $client:ident => $base:expr, $model:ty {
            $($op:ident: $method:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $client<'a> {
            api: &'a $crate::LockstepApi,
        }

        impl<'a> $client<'a> {
            pub(crate) fn new(api: &'a $crate::LockstepApi) -> Self {
                Self { api }
            }

            $( resource!(@$op $method, $base, $model); )*
        }
    };

    (@retrieve $method:ident, $base:expr, $model:ty) => {
        /// Retrieve one record by its Lockstep id (not its ERP key), with the
        /// nested collections named in `include`.
        pub async fn $method(
            &self,
            id: ::uuid::Uuid,
            include: Option<&str>,
        ) -> Result<$crate::LockstepResponse<$model>, $crate::ApiError> {
            let path = format!("{}/{}", $base, id);
            let query = $crate::http::QueryOptions::new().opt("include", include);
            self.api
                .request($crate::http::HttpMethod::Get, &path, query, $crate::client::NO_BODY)
                .await
        }
    };

    (@update $method:ident, $base:expr, $model:ty) => {
        /// Apply a partial update. Fields absent from `body` are left unchanged.
        pub async fn $method<B>(
            &self,
            id: ::uuid::Uuid,
            body: &B,
        ) -> Result<$crate::LockstepResponse<$model>, $crate::ApiError>
        where
            B: ::serde::Serialize + ?Sized,
        {
            let path = format!("{}/{}", $base, id);
            self.api
                .request($crate::http::HttpMethod::Patch, &path, $crate::http::QueryOptions::new(), Some(body))
                .await
        }
    };

    (@delete $method:ident, $base:expr, $model:ty) => {
        pub async fn $method(
            &self,
            id: ::uuid::Uuid,
        ) -> Result<$crate::LockstepResponse<$crate::models::ActionResultModel>, $crate::ApiError> {
            let path = format!("{}/{}", $base, id);
            self.api
                .request($crate::http::HttpMethod::Delete, &path, $crate::http::QueryOptions::new(), $crate::client::NO_BODY)
                .await
        }
    };

    (@create $method:ident, $base:expr, $model:ty) => {
        /// Create one or more records and return them as created.
        pub async fn $method(
            &self,
            body: &[$model],
        ) -> Result<$crate::LockstepResponse<Vec<$model>>, $crate::ApiError> {
            self.api
                .request($crate::http::HttpMethod::Post, $base, $crate::http::QueryOptions::new(), Some(body))
                .await
        }
    };

    (@query $method:ident, $base:expr, $model:ty) => {
        /// Run a Searchlight query. Parameters left as `None` are not sent and
        /// the server defaults apply.
        pub async fn $method(
            &self,
            filter: Option<&str>,
            include: Option<&str>,
            order: Option<&str>,
            page_size: Option<u32>,
            page_number: Option<u32>,
        ) -> Result<$crate::LockstepResponse<$crate::models::FetchResult<$model>>, $crate::ApiError> {
            let query = $crate::http::QueryOptions::searchlight(filter, include, order, page_size, page_number);
            self.api
                .request($crate::http::HttpMethod::Get, &format!("{}/query", $base), query, $crate::client::NO_BODY)
                .await
        }
    };
}

mod attachments;
mod companies;
mod invoices;
mod payments;
mod status;
mod transactions;

pub use attachments::AttachmentsClient;
pub use companies::{CompaniesClient, ContactsClient};
pub use invoices::InvoicesClient;
pub use payments::PaymentsClient;
pub use status::StatusClient;
pub use transactions::TransactionsClient;
