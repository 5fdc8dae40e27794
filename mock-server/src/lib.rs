//! In-memory stand-in for a slice of the Lockstep Platform API.
//!
//! Serves Status, Invoices and Attachments with the same paths, casing and
//! problem-details error bodies as the real service, plus an echo endpoint
//! that reports what the server received. Any other path answers 404 with
//! the request's method, path and query in the problem's `content`.

mod error;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use error::MockError;

const DEFAULT_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone)]
struct StoredFile {
    record: Value,
    bytes: Bytes,
}

#[derive(Default)]
pub struct Db {
    invoices: RwLock<HashMap<Uuid, Value>>,
    attachments: RwLock<HashMap<Uuid, StoredFile>>,
}

pub type SharedDb = Arc<Db>;

/// Page of results in the platform's `FetchResult` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub records: Vec<Value>,
    pub total_count: usize,
    pub page_size: usize,
    pub page_number: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchlightQuery {
    pub filter: Option<String>,
    pub include: Option<String>,
    pub order: Option<String>,
    pub page_size: Option<usize>,
    pub page_number: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    pub table_name: String,
    pub object_id: Uuid,
    pub attachment_type: Option<String>,
}

pub fn app() -> Router {
    let db: SharedDb = Arc::new(Db::default());

    let protected = Router::new()
        .route("/api/v1/Invoices", post(create_invoices))
        .route("/api/v1/Invoices/query", get(query_invoices))
        .route(
            "/api/v1/Invoices/{id}",
            get(retrieve_invoice).patch(update_invoice).delete(delete_invoice),
        )
        .route("/api/v1/Invoices/{id}/pdf", get(retrieve_invoice_pdf))
        .route("/api/v1/Attachments", post(upload_attachment))
        .route("/api/v1/Attachments/{id}/download", get(download_attachment))
        .route_layer(middleware::from_fn(require_credentials));

    Router::new()
        .route("/api/v1/Status", get(status))
        .route("/api/v1/debug/echo", any(echo))
        .merge(protected)
        .fallback(no_route)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn is_authenticated(headers: &HeaderMap) -> bool {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    bearer || headers.contains_key("apikey")
}

async fn require_credentials(request: Request, next: Next) -> Response {
    if is_authenticated(request.headers()) {
        next.run(request).await
    } else {
        MockError::Unauthorized.into_response()
    }
}

fn header_object(headers: &HeaderMap) -> Map<String, Value> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), Value::String(value.to_string())))
        })
        .collect()
}

async fn status(headers: HeaderMap) -> Json<Value> {
    let logged_in = is_authenticated(&headers);
    let user_name = logged_in.then_some("mock-user");
    let error_message = (!logged_in).then_some("No credentials supplied");
    let roles: Vec<&str> = if logged_in { vec!["Admin"] } else { Vec::new() };
    Json(json!({
        "userName": user_name,
        "loggedIn": logged_in,
        "environment": "mock",
        "errorMessage": error_message,
        "roles": roles,
    }))
}

/// Report the method, raw query string and headers of the request.
async fn echo(request: Request) -> Json<Value> {
    Json(json!({
        "method": request.method().as_str(),
        "path": request.uri().path(),
        "query": request.uri().query(),
        "headers": header_object(request.headers()),
    }))
}

async fn no_route(request: Request) -> MockError {
    MockError::NoRoute {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
    }
}

async fn create_invoices(
    State(db): State<SharedDb>,
    Json(input): Json<Vec<Value>>,
) -> Result<Json<Vec<Value>>, MockError> {
    let mut created = Vec::with_capacity(input.len());
    let mut invoices = db.invoices.write().await;
    for record in input {
        let Value::Object(mut fields) = record else {
            return Err(MockError::BadRequest("each invoice must be a JSON object".to_string()));
        };
        let id = Uuid::new_v4();
        fields.insert("invoiceId".to_string(), json!(id));
        let record = Value::Object(fields);
        invoices.insert(id, record.clone());
        created.push(record);
    }
    Ok(Json(created))
}

async fn query_invoices(
    State(db): State<SharedDb>,
    Query(query): Query<SearchlightQuery>,
) -> Json<FetchResult> {
    let invoices = db.invoices.read().await;
    let mut records: Vec<Value> = invoices.values().cloned().collect();
    records.sort_by_key(|r| r["erpKey"].as_str().unwrap_or_default().to_string());

    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let page_number = query.page_number.unwrap_or(0);
    let total_count = records.len();
    let records = records
        .into_iter()
        .skip(page_size.saturating_mul(page_number))
        .take(page_size)
        .collect();

    Json(FetchResult {
        records,
        total_count,
        page_size,
        page_number,
    })
}

async fn retrieve_invoice(
    State(db): State<SharedDb>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, MockError> {
    let invoices = db.invoices.read().await;
    invoices.get(&id).cloned().map(Json).ok_or(MockError::NotFound("invoice"))
}

async fn update_invoice(
    State(db): State<SharedDb>,
    Path(id): Path<Uuid>,
    Json(changes): Json<Map<String, Value>>,
) -> Result<Json<Value>, MockError> {
    let mut invoices = db.invoices.write().await;
    let invoice = invoices.get_mut(&id).ok_or(MockError::NotFound("invoice"))?;
    if let Some(fields) = invoice.as_object_mut() {
        for (key, value) in changes {
            if key != "invoiceId" {
                fields.insert(key, value);
            }
        }
    }
    Ok(Json(invoice.clone()))
}

async fn delete_invoice(
    State(db): State<SharedDb>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, MockError> {
    let mut invoices = db.invoices.write().await;
    invoices
        .remove(&id)
        .map(|_| Json(json!({ "messages": [format!("Invoice {id} deleted")] })))
        .ok_or(MockError::NotFound("invoice"))
}

async fn retrieve_invoice_pdf(
    State(db): State<SharedDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, MockError> {
    let invoices = db.invoices.read().await;
    if !invoices.contains_key(&id) {
        return Err(MockError::NotFound("invoice"));
    }
    let pdf = format!("%PDF-1.4\n% invoice {id}\n%%EOF\n");
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response())
}

async fn upload_attachment(
    State(db): State<SharedDb>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Value>>, MockError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("file").to_string();
            let bytes = field.bytes().await?;
            upload = Some((file_name, bytes));
        }
    }
    let (file_name, bytes) =
        upload.ok_or_else(|| MockError::BadRequest("multipart field `file` is required".to_string()))?;

    let id = Uuid::new_v4();
    let file_ext = file_name.rsplit_once('.').map(|(_, ext)| ext.to_string());
    let record = json!({
        "attachmentId": id,
        "tableKey": query.table_name,
        "objectKey": query.object_id,
        "fileName": file_name,
        "fileExt": file_ext,
        "attachmentType": query.attachment_type,
        "isArchived": false,
        "viewInternal": true,
        "viewExternal": false,
    });
    db.attachments.write().await.insert(
        id,
        StoredFile {
            record: record.clone(),
            bytes,
        },
    );
    Ok(Json(vec![record]))
}

async fn download_attachment(
    State(db): State<SharedDb>,
    Path(id): Path<Uuid>,
) -> Result<Response, MockError> {
    let attachments = db.attachments.read().await;
    let stored = attachments.get(&id).ok_or(MockError::NotFound("attachment"))?;
    let file_name = stored.record["fileName"].as_str().unwrap_or("file");
    let disposition = format!("attachment; filename=\"{file_name}\"");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        stored.bytes.clone(),
    )
        .into_response())
}
