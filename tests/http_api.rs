use chrono::{Duration as Days, Utc};
use reqwest::{Client, StatusCode};
use salonbase::api::app;
use salonbase::auth::jwt::JwtService;
use salonbase::config::Config;
use salonbase::core::services::SalonService;
use salonbase::infrastructure::{seed::seed_demo_data, storage::in_memory::InMemoryStorage};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

struct TestServer {
    base: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with(Config::default()).await
    }

    async fn start_with(config: Config) -> Self {
        let storage = InMemoryStorage::new();
        seed_demo_data(&storage, 4).await.expect("seed demo data");
        let jwt = JwtService::new("e2e-secret".to_string(), Duration::from_secs(600));
        let service = Arc::new(SalonService::new(storage, jwt, 4));
        let router = app(service, &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .expect("serve app")
        });

        TestServer {
            base: format!("http://{}", addr),
            client: Client::new(),
        }
    }

    async fn send(&self, method: reqwest::Method, path: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.client.request(method, format!("{}{}", self.base, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.expect("request sent");
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(reqwest::Method::GET, path, token, None).await
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(reqwest::Method::POST, path, token, Some(body)).await
    }

    async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post("/api/auth/login", None, json!({ "email": email, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["token"].as_str().expect("token").to_string()
    }
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, body) = server.get("/api/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Route not found" }));

    let (status, body) = server.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/appointments"].is_object());
}

#[tokio::test]
async fn register_me_and_role_gate() {
    let server = TestServer::start().await;

    let (status, body) = server
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Ada Lovelace", "email": "ada@example.com", "phone": "+447700900123", "password": "engine1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "user");
    assert!(body["data"]["user"].get("passwordHash").is_none());
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, body) = server.post("/api/auth/register", None, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error");
    assert!(body["error"].as_array().is_some_and(|e| !e.is_empty()));

    let (status, body) = server.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token");

    let (status, body) = server.get("/api/auth/me", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token failed");

    let (status, body) = server.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");

    let (status, body) = server.get("/api/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User role user is not authorized to access this route");

    let (status, body) = server.get("/api/services/not-a-uuid", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID format");

    let admin = server.login("admin@salonbase.com", "admin123").await;
    let (status, body) = server.get("/api/users?limit=2&page=2", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"], json!({ "page": 2, "limit": 2, "total": 4, "pages": 2 }));
}

#[tokio::test]
async fn booking_flow_rejects_overlaps() {
    let server = TestServer::start().await;
    let token = server.login("john@example.com", "user123").await;

    let (status, body) = server.get("/api/services?search=haircut", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let haircut = &body["data"]["services"][0];
    assert_eq!(haircut["durationFormatted"], "1h");
    let service_id = haircut["id"].as_str().expect("service id").to_string();

    let date = (Utc::now().date_naive() + Days::days(2)).to_string();
    let book = |time: &str| {
        json!({ "service": "Haircut & Styling", "serviceId": service_id, "date": date, "time": time })
    };

    let (status, body) = server.post("/api/appointments", Some(&token), book("10:00")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["appointment"]["endTime"], "11:00");
    assert_eq!(body["data"]["appointment"]["status"], "pending");
    assert_eq!(body["data"]["appointment"]["serviceDetails"]["duration"], 60);

    let (status, body) = server.post("/api/appointments", Some(&token), book("10:30")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Time slot is not available");

    let (status, _) = server.post("/api/appointments", Some(&token), book("11:00")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/api/appointments",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let admin = server.login("admin@salonbase.com", "admin123").await;
    let (status, body) = server.get("/api/appointments/stats", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalAppointments"], 2);
    assert_eq!(body["data"]["pendingAppointments"], 2);
}

#[tokio::test]
async fn requests_beyond_the_window_budget_get_429() {
    let server = TestServer::start_with(Config {
        rate_limit_max_requests: 3,
        ..Config::default()
    })
    .await;

    for _ in 0..3 {
        let (status, _) = server.get("/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = server.get("/api/health", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body,
        json!({ "success": false, "message": "Too many requests from this IP, please try again later." })
    );

    let response = server
        .client
        .get(format!("{}/api/health", server.base))
        .header("x-forwarded-for", "198.51.100.20")
        .send()
        .await
        .expect("request sent");
    assert_eq!(response.status(), StatusCode::OK);
}
