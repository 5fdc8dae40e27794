//! The shared client: configuration, header composition and dispatch.
//!
//! # Design
//! `LockstepApi` is a plain owned value. The `with_*` methods consume and
//! return it for fluent setup; the `set_*` methods take `&mut self` for
//! callers holding a long-lived handle. Dispatch takes `&self`, so a handle
//! cannot be reconfigured while one of its calls is in flight. Clones are
//! independent snapshots sharing only the connection pool.
//!
//! Every entry point runs in two steps: `prepare` resolves the URL, composes
//! headers and awaits the hook, then `send` performs the one network exchange.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Credential, Environment};
use crate::error::ApiError;
use crate::headers::{self, ApiHeaders, HeaderHook};
use crate::http::{resolve_url, HttpMethod, HttpRequest, HttpResponse, QueryOptions, RequestBody};
use crate::resources::{
    AttachmentsClient, CompaniesClient, ContactsClient, InvoicesClient, PaymentsClient, StatusClient,
    TransactionsClient,
};
use crate::response::LockstepResponse;

/// Value sent in the `SdkName` header.
pub const SDK_NAME: &str = "Rust";
/// Value sent in the `SdkVersion` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Use as the `body` argument of `request` / `request_blob` when there is none.
pub const NO_BODY: Option<&()> = None;

/// Client for the Lockstep Platform API.
#[derive(Clone)]
pub struct LockstepApi {
    server_url: String,
    credential: Credential,
    app_name: Option<String>,
    machine_name: String,
    header_hook: Option<Arc<dyn HeaderHook>>,
    http: reqwest::Client,
}

impl LockstepApi {
    fn new(server_url: String) -> Self {
        Self {
            server_url,
            credential: Credential::None,
            app_name: None,
            machine_name: local_machine_name(),
            header_hook: None,
            http: reqwest::Client::new(),
        }
    }

    /// Target a named environment: `sbx` (sandbox) or `prd` (production).
    /// Unrecognized names target production.
    pub fn with_environment(env: &str) -> Self {
        Self::new(Environment::from_name(env).base_url().to_string())
    }

    /// Target an arbitrary server, such as a proxy or API gateway.
    ///
    /// This bypasses the environment table entirely and only checks that
    /// `unsafe_url` parses; prefer `with_environment` wherever possible.
    pub fn with_custom_environment(unsafe_url: &str) -> Result<Self, ApiError> {
        url::Url::parse(unsafe_url)?;
        Ok(Self::new(unsafe_url.to_string()))
    }

    /// Authenticate with a JWT bearer token, clearing any API key.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.set_bearer_token(token);
        self
    }

    /// Authenticate with an API key, clearing any bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.set_api_key(api_key);
        self
    }

    /// Identify the calling application on every request.
    pub fn with_application_name(mut self, app_name: impl Into<String>) -> Self {
        self.set_application_name(app_name);
        self
    }

    /// Install a hook that receives the composed headers before every request.
    /// Its output is sent verbatim; see `HeaderHook`.
    pub fn with_header_hook(mut self, hook: impl HeaderHook + 'static) -> Self {
        self.set_header_hook(hook);
        self
    }

    /// Override the host name sent in `MachineName`.
    pub fn with_machine_name(mut self, machine_name: impl Into<String>) -> Self {
        self.machine_name = machine_name.into();
        self
    }

    /// Use a caller-configured HTTP client. Timeouts, proxies and TLS roots
    /// are configured there.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn set_bearer_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.credential = Credential::BearerToken(token.into());
        self
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.credential = Credential::ApiKey(api_key.into());
        self
    }

    pub fn clear_credentials(&mut self) -> &mut Self {
        self.credential = Credential::None;
        self
    }

    pub fn set_application_name(&mut self, app_name: impl Into<String>) -> &mut Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn set_header_hook(&mut self, hook: impl HeaderHook + 'static) -> &mut Self {
        self.header_hook = Some(Arc::new(hook));
        self
    }

    pub fn clear_header_hook(&mut self) -> &mut Self {
        self.header_hook = None;
        self
    }

    /// The base URL every path is joined onto, exactly as configured.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn application_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    /// Headers derived from the current configuration, before any hook runs.
    pub fn compose_headers(&self) -> ApiHeaders {
        let mut out = ApiHeaders::new();
        out.insert(headers::SDK_NAME, SDK_NAME);
        out.insert(headers::SDK_VERSION, SDK_VERSION);
        out.insert(headers::MACHINE_NAME, self.machine_name.as_str());
        if let Some(app_name) = &self.app_name {
            out.insert(headers::APPLICATION_NAME, app_name.as_str());
        }
        match &self.credential {
            Credential::BearerToken(token) => {
                out.insert(headers::AUTHORIZATION, format!("Bearer {token}"));
            }
            Credential::ApiKey(key) => {
                out.insert(headers::API_KEY, key.as_str());
            }
            Credential::None => {}
        }
        out
    }

    /// The headers that will actually be sent: the composed set, or the
    /// hook's replacement for it.
    pub async fn headers(&self) -> ApiHeaders {
        let composed = self.compose_headers();
        match &self.header_hook {
            Some(hook) => hook.apply(composed).await,
            None => composed,
        }
    }

    /// Describe a request without sending it.
    pub async fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        query: &QueryOptions,
        body: RequestBody,
    ) -> Result<HttpRequest, ApiError> {
        let url = resolve_url(&self.server_url, path, query)?;
        let headers = self.headers().await;
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Perform the network exchange for a prepared request.
    ///
    /// Any status code is a successful exchange; only transport failures and
    /// unusable headers are errors.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let header_map = request.headers.to_header_map()?;
        let builder = self
            .http
            .request(request.method.into(), request.url.clone())
            .headers(header_map);
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.header(CONTENT_TYPE, "application/json").body(bytes),
            RequestBody::File { file_name, bytes } => {
                let part = Part::bytes(bytes).file_name(file_name);
                builder.multipart(Form::new().part("file", part))
            }
        };

        debug!(method = %request.method, url = %request.url, "sending lockstep request");
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(HttpResponse { status, body })
        };
        let response = exchange.await.inspect_err(|err| {
            warn!(method = %request.method, url = %request.url, error = %err, "lockstep request failed");
        })?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            bytes = response.body.len(),
            "lockstep response"
        );
        Ok(response)
    }

    /// Send a JSON request and decode the JSON response.
    pub async fn request<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: QueryOptions,
        body: Option<&B>,
    ) -> Result<LockstepResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.prepare(method, path, &query, json_body(body)?).await?;
        let response = self.send(request).await?;
        LockstepResponse::from_json(response.status, &response.body)
    }

    /// Upload a file as multipart form field `file` and decode the JSON response.
    ///
    /// The file is read fully into memory before the request is sent.
    pub async fn file_upload<T>(
        &self,
        method: HttpMethod,
        path: &str,
        query: QueryOptions,
        file_path: impl AsRef<Path>,
    ) -> Result<LockstepResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let file_path = file_path.as_ref();
        let bytes = tokio::fs::read(file_path).await.map_err(|source| ApiError::FileRead {
            path: file_path.to_path_buf(),
            source,
        })?;
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let request = self
            .prepare(method, path, &query, RequestBody::File { file_name, bytes })
            .await?;
        let response = self.send(request).await?;
        LockstepResponse::from_json(response.status, &response.body)
    }

    /// Send a request and return the response body as raw bytes, whatever the
    /// status.
    pub async fn request_blob<B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: QueryOptions,
        body: Option<&B>,
    ) -> Result<LockstepResponse<Bytes>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.prepare(method, path, &query, json_body(body)?).await?;
        let response = self.send(request).await?;
        Ok(LockstepResponse::from_blob(response.status, response.body))
    }

    pub fn attachments(&self) -> AttachmentsClient<'_> {
        AttachmentsClient::new(self)
    }

    pub fn companies(&self) -> CompaniesClient<'_> {
        CompaniesClient::new(self)
    }

    pub fn contacts(&self) -> ContactsClient<'_> {
        ContactsClient::new(self)
    }

    pub fn invoices(&self) -> InvoicesClient<'_> {
        InvoicesClient::new(self)
    }

    pub fn payments(&self) -> PaymentsClient<'_> {
        PaymentsClient::new(self)
    }

    pub fn status(&self) -> StatusClient<'_> {
        StatusClient::new(self)
    }

    pub fn transactions(&self) -> TransactionsClient<'_> {
        TransactionsClient::new(self)
    }
}

impl fmt::Debug for LockstepApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockstepApi")
            .field("server_url", &self.server_url)
            .field("credential", &self.credential)
            .field("app_name", &self.app_name)
            .field("machine_name", &self.machine_name)
            .field("header_hook", &self.header_hook.is_some())
            .finish()
    }
}

fn json_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<RequestBody, ApiError> {
    match body {
        Some(body) => serde_json::to_vec(body)
            .map(RequestBody::Json)
            .map_err(ApiError::Serialization),
        None => Ok(RequestBody::Empty),
    }
}

fn local_machine_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PRODUCTION_URL, SANDBOX_URL};
    use crate::headers::{
        API_KEY, APPLICATION_NAME, AUTHORIZATION, MACHINE_NAME, SDK_NAME as SDK_NAME_HEADER,
        SDK_VERSION as SDK_VERSION_HEADER,
    };

    fn api() -> LockstepApi {
        LockstepApi::with_environment("sbx").with_machine_name("build-01")
    }

    #[test]
    fn environments_map_to_fixed_urls() {
        assert_eq!(LockstepApi::with_environment("sbx").server_url(), SANDBOX_URL);
        assert_eq!(LockstepApi::with_environment("prd").server_url(), PRODUCTION_URL);
        assert_eq!(LockstepApi::with_environment("staging").server_url(), PRODUCTION_URL);
    }

    #[test]
    fn custom_url_is_kept_exactly() {
        let url = "http://127.0.0.1:9999/gateway/v2";
        let api = LockstepApi::with_custom_environment(url).unwrap();
        assert_eq!(api.server_url(), url);
    }

    #[test]
    fn custom_url_must_parse() {
        assert!(matches!(
            LockstepApi::with_custom_environment("::nope"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn bearer_token_and_api_key_are_exclusive() {
        let mut api = api().with_api_key("k").with_bearer_token("t");
        assert_eq!(api.credential().bearer_token(), Some("t"));
        assert!(api.credential().api_key().is_none());

        api.set_api_key("k2");
        assert_eq!(api.credential().api_key(), Some("k2"));
        assert!(api.credential().bearer_token().is_none());

        api.set_bearer_token("t2").set_api_key("k3").set_bearer_token("t3");
        assert_eq!(*api.credential(), Credential::BearerToken("t3".to_string()));

        api.clear_credentials();
        assert_eq!(*api.credential(), Credential::None);
    }

    #[test]
    fn headers_without_credentials() {
        let headers = api().compose_headers();
        assert_eq!(headers.get(SDK_NAME_HEADER), Some(SDK_NAME));
        assert_eq!(headers.get(SDK_VERSION_HEADER), Some(SDK_VERSION));
        assert_eq!(headers.get(MACHINE_NAME), Some("build-01"));
        assert!(!headers.contains(AUTHORIZATION));
        assert!(!headers.contains(API_KEY));
        assert!(!headers.contains(APPLICATION_NAME));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn headers_with_api_key() {
        let headers = api().with_bearer_token("t").with_api_key("k").compose_headers();
        assert_eq!(headers.get(API_KEY), Some("k"));
        assert!(!headers.contains(AUTHORIZATION));
    }

    #[test]
    fn headers_with_bearer_token_and_app_name() {
        let headers = api()
            .with_api_key("k")
            .with_bearer_token("t")
            .with_application_name("ledger-sync")
            .compose_headers();
        assert_eq!(headers.get(AUTHORIZATION), Some("Bearer t"));
        assert_eq!(headers.get(APPLICATION_NAME), Some("ledger-sync"));
        assert!(!headers.contains(API_KEY));
    }

    #[tokio::test]
    async fn hook_output_replaces_composed_headers() {
        let api = api()
            .with_api_key("k")
            .with_header_hook(|_: ApiHeaders| async { [("X-Only", "1")].into_iter().collect::<ApiHeaders>() });
        let request = api
            .prepare(HttpMethod::Get, "/api/v1/Status", &QueryOptions::new(), RequestBody::Empty)
            .await
            .unwrap();
        let expected: ApiHeaders = [("X-Only", "1")].into_iter().collect();
        assert_eq!(request.headers, expected);
    }

    #[tokio::test]
    async fn hook_sees_current_configuration() {
        let mut api = api().with_header_hook(|mut headers: ApiHeaders| async move {
            headers.insert("X-Hooked", "yes");
            headers
        });
        api.set_api_key("later");
        let headers = api.headers().await;
        assert_eq!(headers.get(API_KEY), Some("later"));
        assert_eq!(headers.get("X-Hooked"), Some("yes"));

        api.clear_header_hook();
        assert!(!api.headers().await.contains("X-Hooked"));
    }

    #[tokio::test]
    async fn prepare_resolves_against_base() {
        let api = LockstepApi::with_environment("prd");
        let query = QueryOptions::new().opt("include", Some("Lines"));
        let request = api
            .prepare(HttpMethod::Get, "/api/v1/Invoices/123", &query, RequestBody::Empty)
            .await
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.lockstep.io/api/v1/Invoices/123?include=Lines"
        );
        assert_eq!(request.method, HttpMethod::Get);
    }

    #[test]
    fn json_body_serializes_payload() {
        let body = json_body(Some(&serde_json::json!({"memoText": "x"}))).unwrap();
        assert_eq!(body, RequestBody::Json(br#"{"memoText":"x"}"#.to_vec()));
        assert_eq!(json_body(NO_BODY).unwrap(), RequestBody::Empty);
    }

    #[test]
    fn debug_hides_credentials() {
        let shown = format!("{:?}", api().with_api_key("top-secret"));
        assert!(!shown.contains("top-secret"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn transport_failure_is_logged_with_target() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = LockstepApi::with_custom_environment(&format!("http://{addr}/")).unwrap();
        let request = api
            .prepare(HttpMethod::Get, "/api/v1/Status", &QueryOptions::new(), RequestBody::Empty)
            .await
            .unwrap();
        assert!(matches!(api.send(request).await, Err(ApiError::Transport(_))));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("sending lockstep request"));
        assert!(output.contains("lockstep request failed"));
        assert!(output.contains(&format!("http://{addr}/api/v1/Status")));
    }

    #[tokio::test]
    async fn upload_of_missing_file_fails_before_sending() {
        let err = api()
            .file_upload::<serde_json::Value>(
                HttpMethod::Post,
                "/api/v1/Attachments",
                QueryOptions::new(),
                "/definitely/not/here.pdf",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::FileRead { .. }));
    }
}
