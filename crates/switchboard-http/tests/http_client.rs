//! HttpApiClient against a live mock server

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use switchboard_config::ApiConfig;
use switchboard_core::{ApiClient, ApiRequest, HttpMethod, RequestConfig, TransportError};
use switchboard_http::{HttpApiClient, RequestInterceptor, ResponseInterceptor};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..ApiConfig::default()
    }
}

/// Adds a bearer token to every request
struct BearerAuth(&'static str);

impl RequestInterceptor for BearerAuth {
    fn intercept(&self, request: ApiRequest) -> Result<ApiRequest, TransportError> {
        Ok(request.header("Authorization", format!("Bearer {}", self.0)))
    }
}

/// Refuses every request
struct Offline;

impl RequestInterceptor for Offline {
    fn intercept(&self, _request: ApiRequest) -> Result<ApiRequest, TransportError> {
        Err(TransportError::Request("offline mode".to_string()))
    }
}

/// Records what response interceptors observe
#[derive(Clone, Default)]
struct Recorder {
    responses: Arc<Mutex<Vec<(HttpMethod, String, u16)>>>,
    errors: Arc<Mutex<Vec<(HttpMethod, Option<u16>)>>>,
}

impl ResponseInterceptor for Recorder {
    fn on_response(&self, method: HttpMethod, url: &str, status: u16) {
        self.responses
            .lock()
            .unwrap()
            .push((method, url.to_string(), status));
    }

    fn on_error(&self, method: HttpMethod, _url: &str, error: &TransportError) {
        self.errors.lock().unwrap().push((method, error.status()));
    }
}

#[tokio::test]
async fn test_get_joins_base_url_and_sends_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/42"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "name": "X"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let data = client
        .get("/products/42", &RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(data, json!({"id": 42, "name": "X"}));
}

#[tokio::test]
async fn test_query_string_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "tools"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let data = client
        .get("/products?category=tools&page=2", &RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(data, json!([]));
}

#[tokio::test]
async fn test_post_and_put_send_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .and(body_json(json!({"sku": "A1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7, "sku": "A1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/products/7"))
        .and(body_json(json!({"sku": "A2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "sku": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let created = client
        .post("/products", json!({"sku": "A1"}), &RequestConfig::default())
        .await
        .unwrap();
    let updated = client
        .put("/products/7", json!({"sku": "A2"}), &RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(created["id"], 7);
    assert_eq!(updated["sku"], "A2");
}

#[tokio::test]
async fn test_per_request_header_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/export"))
        .and(header("content-type", "text/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("id,name\n1,X\n"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let config = RequestConfig::default().header("Content-Type", "text/csv");
    let data = client.get("/export", &config).await.unwrap();

    assert_eq!(data, Value::String("id,name\n1,X\n".to_string()));
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let data = client
        .delete("/products/9", &RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(data, Value::Null);
}

#[tokio::test]
async fn test_error_status_carries_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Duplicate SKU"})),
        )
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let err = client
        .post("/products", json!({"sku": "A1"}), &RequestConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.detail_message(), Some("Duplicate SKU"));
}

#[tokio::test]
async fn test_error_status_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let err = client
        .get("/products/1", &RequestConfig::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TransportError::Status {
            status: 500,
            body: None
        }
    );
    assert_eq!(err.detail_message(), None);
}

#[tokio::test]
async fn test_response_interceptors_observe_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/secret"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let recorder = Recorder::default();
    let client = HttpApiClient::builder(&api_config(&server))
        .response_interceptor(recorder.clone())
        .build()
        .unwrap();

    client
        .get("/products/1", &RequestConfig::default())
        .await
        .unwrap();
    let err = client
        .get("/secret", &RequestConfig::default())
        .await
        .unwrap_err();

    // Observation never suppresses the error
    assert!(err.is_unauthorized());
    assert_eq!(
        *recorder.responses.lock().unwrap(),
        vec![(HttpMethod::Get, "/products/1".to_string(), 200)]
    );
    assert_eq!(
        *recorder.errors.lock().unwrap(),
        vec![(HttpMethod::Get, Some(401))]
    );
}

#[tokio::test]
async fn test_request_interceptor_adds_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header_exists("Authorization"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "me"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpApiClient::builder(&api_config(&server))
        .request_interceptor(BearerAuth("t0ken"))
        .build()
        .unwrap();

    let data = client.get("/me", &RequestConfig::default()).await.unwrap();
    assert_eq!(data["user"], "me");
}

#[tokio::test]
async fn test_request_interceptor_can_abort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let recorder = Recorder::default();
    let client = HttpApiClient::builder(&api_config(&server))
        .request_interceptor(Offline)
        .response_interceptor(recorder.clone())
        .build()
        .unwrap();

    let err = client
        .get("/products", &RequestConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err, TransportError::Request("offline mode".to_string()));
    assert_eq!(recorder.errors.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        ..ApiConfig::default()
    };
    let client = HttpApiClient::new(&config).unwrap();
    let data = client
        .get(&format!("{}/elsewhere", server.uri()), &RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(data, json!("ok"));
}

#[tokio::test]
async fn test_per_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = HttpApiClient::new(&api_config(&server)).unwrap();
    let config = RequestConfig::default().timeout(Duration::from_millis(50));
    let err = client.get("/slow", &config).await.unwrap_err();

    assert_eq!(err, TransportError::Timeout);
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        ..ApiConfig::default()
    };
    let client = HttpApiClient::new(&config).unwrap();

    let err = client
        .get("/products", &RequestConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Request(_)));
}
