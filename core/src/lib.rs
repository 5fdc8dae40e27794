//! Async client for the Lockstep Platform REST API.
//!
//! # Overview
//! `LockstepApi` holds the target environment and credentials and performs
//! every HTTP exchange. Resource façades (`api.invoices()`, `api.payments()`,
//! ...) map one method to one call: a verb, a path, query parameters and an
//! optional body.
//!
//! ```no_run
//! # async fn run() -> Result<(), lockstep_sdk::ApiError> {
//! use lockstep_sdk::LockstepApi;
//!
//! let api = LockstepApi::with_environment("sbx")
//!     .with_api_key("my-key")
//!     .with_application_name("ledger-sync");
//!
//! let page = api.invoices().query_invoices(Some("isOpen eq true"), None, None, Some(50), None).await?;
//! if page.is_success() {
//!     for invoice in page.value.unwrap_or_default().records {
//!         println!("{:?}", invoice.erp_key);
//!     }
//! } else {
//!     eprintln!("HTTP {}: {:?}", page.status, page.error);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Non-2xx statuses are returned in the `LockstepResponse` envelope, not
//!   raised. `ApiError` is reserved for failures that prevent a response.
//! - There is no retry, caching or timeout policy in this crate. Configure
//!   timeouts on a `reqwest::Client` and pass it to `with_http_client`.
//! - Query parameters passed as `None` are omitted from the request.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod models;
pub mod resources;
pub mod response;

pub use client::LockstepApi;
pub use config::{Credential, Environment};
pub use error::ApiError;
pub use headers::{ApiHeaders, HeaderHook};
pub use http::{HttpMethod, HttpRequest, HttpResponse, QueryOptions, RequestBody};
pub use response::LockstepResponse;
