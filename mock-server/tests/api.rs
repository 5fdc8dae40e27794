use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, FetchResult};
use serde_json::Value;
use tower::ServiceExt;

const API_KEY: &str = "test-key";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("ApiKey", API_KEY)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("ApiKey", API_KEY)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn multipart_request(uri: &str, file_name: &str, contents: &str) -> Request<String> {
    let boundary = "lockstep-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("ApiKey", API_KEY)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(body)
        .unwrap()
}

// --- status ---

#[tokio::test]
async fn status_without_credentials_reports_logged_out() {
    let resp = app()
        .oneshot(Request::builder().uri("/api/v1/Status").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let status: Value = body_json(resp).await;
    assert_eq!(status["loggedIn"], false);
    assert!(status["userName"].is_null());
}

#[tokio::test]
async fn status_with_bearer_token_reports_logged_in() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/Status")
                .header(http::header::AUTHORIZATION, "Bearer abc")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let status: Value = body_json(resp).await;
    assert_eq!(status["loggedIn"], true);
    assert_eq!(status["userName"], "mock-user");
}

// --- auth ---

#[tokio::test]
async fn protected_route_without_credentials_returns_problem_json() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/Invoices/query")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let problem: Value = body_json(resp).await;
    assert_eq!(problem["status"], 401);
    assert_eq!(problem["title"], "Unauthorized");
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_query_and_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/debug/echo?filter=a&pageSize=5")
                .header("SdkName", "Rust")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echo: Value = body_json(resp).await;
    assert_eq!(echo["method"], "PATCH");
    assert_eq!(echo["query"], "filter=a&pageSize=5");
    assert_eq!(echo["headers"]["sdkname"], "Rust");
}

#[tokio::test]
async fn unknown_path_echoes_request_in_problem_content() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/Payments/views/detail?pageSize=5")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let problem: Value = body_json(resp).await;
    assert_eq!(problem["detail"], "no route for PATCH /api/v1/Payments/views/detail");
    assert_eq!(problem["content"]["method"], "PATCH");
    assert_eq!(problem["content"]["path"], "/api/v1/Payments/views/detail");
    assert_eq!(problem["content"]["query"], "pageSize=5");
}

// --- invoices ---

#[tokio::test]
async fn retrieve_missing_invoice_returns_404() {
    let resp = app()
        .oneshot(get("/api/v1/Invoices/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let problem: Value = body_json(resp).await;
    assert_eq!(problem["detail"], "invoice not found");
}

#[tokio::test]
async fn create_rejects_non_object_records() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/Invoices", "[1, 2]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pdf_for_missing_invoice_returns_404() {
    let resp = app()
        .oneshot(get("/api/v1/Invoices/00000000-0000-0000-0000-000000000000/pdf"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn query_past_the_last_page_is_empty() {
    let resp = app()
        .oneshot(get(&format!("/api/v1/Invoices/query?pageSize=200&pageNumber={}", usize::MAX)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: FetchResult = body_json(resp).await;
    assert!(page.records.is_empty());
    assert_eq!(page.page_number, usize::MAX);
}

#[tokio::test]
async fn invoice_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/Invoices",
            r#"[{"erpKey":"INV-2","totalAmount":20.0},{"erpKey":"INV-1","totalAmount":10.0}]"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Vec<Value> = body_json(resp).await;
    assert_eq!(created.len(), 2);
    let id = created[0]["invoiceId"].as_str().unwrap().to_string();

    // query pages are ordered by erpKey
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/v1/Invoices/query?pageSize=1&pageNumber=1"))
        .await
        .unwrap();
    let page: FetchResult = body_json(resp).await;
    assert_eq!(page.total_count, 2);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0]["erpKey"], "INV-2");

    // patch merges fields
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PATCH",
            &format!("/api/v1/Invoices/{id}"),
            r#"{"isVoided":true}"#,
        ))
        .await
        .unwrap();
    let updated: Value = body_json(resp).await;
    assert_eq!(updated["isVoided"], true);
    assert_eq!(updated["erpKey"], "INV-2");

    // pdf
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/v1/Invoices/{id}/pdf")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/pdf");
    assert!(body_bytes(resp).await.starts_with(b"%PDF"));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("DELETE", &format!("/api/v1/Invoices/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let action: Value = body_json(resp).await;
    assert_eq!(action["messages"].as_array().unwrap().len(), 1);

    // gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/v1/Invoices/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- attachments ---

#[tokio::test]
async fn upload_then_download_attachment() {
    use tower::Service;

    let mut app = app().into_service();
    let object_id = "6b1e0f36-1d1a-4b9e-9d55-0d8b2a1f3c44";

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(multipart_request(
            &format!("/api/v1/Attachments?tableName=Invoices&objectId={object_id}&attachmentType=receipt"),
            "receipt.txt",
            "paid in full",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let records: Vec<Value> = body_json(resp).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fileName"], "receipt.txt");
    assert_eq!(records[0]["fileExt"], "txt");
    assert_eq!(records[0]["tableKey"], "Invoices");
    assert_eq!(records[0]["objectKey"], object_id);
    let id = records[0]["attachmentId"].as_str().unwrap().to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/v1/Attachments/{id}/download")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"paid in full");
}

#[tokio::test]
async fn upload_without_file_field_returns_400() {
    let boundary = "b";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{boundary}--\r\n"
    );
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/Attachments?tableName=Invoices&objectId=6b1e0f36-1d1a-4b9e-9d55-0d8b2a1f3c44")
                .header("ApiKey", API_KEY)
                .header(
                    http::header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
