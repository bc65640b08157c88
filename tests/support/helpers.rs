// tests/support/helpers.rs
use super::mocks::ManualClock;
use axum::body::{self, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum::response::Response;
use oauth_grant_server::application::{
    commands::grants::GrantSettings,
    ports::{credential::CredentialCodec, replay::ConsumedCredentialStore},
    services::ApplicationServices,
};
use oauth_grant_server::infrastructure::security::{
    consumed_store::InMemoryConsumedCredentialStore, jwt_codec::JwtCredentialCodec,
};
use oauth_grant_server::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt as _;

pub const TEST_CLIENT_ID: &str = "test-client";
pub const TEST_REDIRECT_URI: &str = "https://client.example/callback";
pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";

pub struct TestOptions {
    pub auth_code_expiry: u64,
    pub access_token_expiry: u64,
    pub refresh_token_expiry: u64,
    pub single_use: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            auth_code_expiry: 5,
            access_token_expiry: 60,
            refresh_token_expiry: 600,
            single_use: true,
        }
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub clock: Arc<ManualClock>,
    codec: Arc<dyn CredentialCodec>,
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.expect("router call")
    }

    pub fn codec(&self) -> Arc<dyn CredentialCodec> {
        Arc::clone(&self.codec)
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(TestOptions::default())
}

pub fn build_test_app_with(options: TestOptions) -> TestApp {
    let clock = Arc::new(ManualClock::new());
    let codec: Arc<dyn CredentialCodec> =
        Arc::new(JwtCredentialCodec::new(TEST_SECRET, clock.clone()));
    let replay_guard = options.single_use.then(|| {
        Arc::new(InMemoryConsumedCredentialStore::new(clock.clone()))
            as Arc<dyn ConsumedCredentialStore>
    });

    let settings = GrantSettings {
        client_id: TEST_CLIENT_ID.into(),
        redirect_uri: TEST_REDIRECT_URI.into(),
        auth_code_ttl: Duration::from_secs(options.auth_code_expiry),
        access_token_ttl: Duration::from_secs(options.access_token_expiry),
        refresh_token_ttl: Duration::from_secs(options.refresh_token_expiry),
    };

    let services = ApplicationServices::new(settings, Arc::clone(&codec), replay_guard);
    let router = build_router(HttpState {
        services: Arc::new(services),
    });

    TestApp {
        router,
        clock,
        codec,
    }
}

/* -------------------------------- リクエスト構築 -------------------------------- */

pub fn authorize_request(params: &[(&str, &str)]) -> Request<Body> {
    let query = serde_urlencoded::to_string(params).expect("encode query");
    Request::builder()
        .method(Method::GET)
        .uri(format!("/authorize?{query}"))
        .body(Body::empty())
        .expect("build authorize request")
}

/// 正しい client_id / redirect_uri を含む認可リクエストパラメータ
pub fn valid_authorize_params() -> Vec<(&'static str, &'static str)> {
    vec![
        ("response_type", "code"),
        ("client_id", TEST_CLIENT_ID),
        ("redirect_uri", TEST_REDIRECT_URI),
    ]
}

pub fn token_request(params: &[(&str, &str)]) -> Request<Body> {
    let body = serde_urlencoded::to_string(params).expect("encode form");
    Request::builder()
        .method(Method::POST)
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("build token request")
}

pub fn code_exchange_params(code: &str) -> Vec<(&'static str, String)> {
    vec![
        ("grant_type", "authorization_code".to_string()),
        ("client_id", TEST_CLIENT_ID.to_string()),
        ("redirect_uri", TEST_REDIRECT_URI.to_string()),
        ("code", code.to_string()),
    ]
}

pub fn refresh_params(refresh_token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("grant_type", "refresh_token".to_string()),
        ("client_id", TEST_CLIENT_ID.to_string()),
        ("redirect_uri", TEST_REDIRECT_URI.to_string()),
        ("refresh_token", refresh_token.to_string()),
    ]
}

pub fn owned_token_request(params: &[(&'static str, String)]) -> Request<Body> {
    let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
    token_request(&borrowed)
}

/* -------------------------------- レスポンス検査 -------------------------------- */

pub async fn read_json(resp: Response) -> (StatusCode, HeaderMap, Value) {
    let (parts, body_stream) = resp.into_parts();
    let bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let json: Value = serde_json::from_slice(&bytes).expect("json body");
    (parts.status, parts.headers, json)
}

/// OAuth2 エラーボディ `{error, error_description}` を検証する
pub async fn assert_oauth_error(
    resp: Response,
    expected_status: StatusCode,
    expected_error: &str,
    expected_description: &str,
) {
    let (status, headers, json) = read_json(resp).await;
    assert_eq!(status, expected_status);
    let ct = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    assert_eq!(json["error"], expected_error, "body: {json}");
    assert_eq!(json["error_description"], expected_description, "body: {json}");
}

/// Location ヘッダーのクエリを (key -> value) に展開する
pub fn location_query(resp: &Response) -> HashMap<String, String> {
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    let url = url::Url::parse(location).expect("absolute location");
    url.query_pairs().into_owned().collect()
}

/* -------------------------------- フロー操作 -------------------------------- */

pub async fn obtain_code(app: &TestApp) -> String {
    let resp = app.send(authorize_request(&valid_authorize_params())).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    location_query(&resp)
        .remove("code")
        .expect("code in redirect")
}

pub async fn exchange_code(app: &TestApp, code: &str) -> Response {
    app.send(owned_token_request(&code_exchange_params(code)))
        .await
}

pub async fn refresh(app: &TestApp, refresh_token: &str) -> Response {
    app.send(owned_token_request(&refresh_params(refresh_token)))
        .await
}

/// 認可コードを取得してトークンペアと交換する
pub async fn obtain_tokens(app: &TestApp) -> Value {
    let code = obtain_code(app).await;
    let (status, _headers, json) = read_json(exchange_code(app, &code).await).await;
    assert_eq!(status, StatusCode::OK, "body: {json}");
    json
}
