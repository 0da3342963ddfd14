use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use axum_extra::extract::cookie::Key;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{Value, json};
use swot_api::{ApiConfig, auth::jwt, router, state::ApiState};
use swot_db::{MemoryStore, models::User};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_jwt_secret_minimum_32_characters_long";
pub const TEST_COOKIE_SECRET: &str =
    "test_cookie_secret_minimum_64_characters_long_for_secure_encryption";

pub fn test_config() -> ApiConfig {
    ApiConfig::from_vars([
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        ("COOKIE_SECRET".to_string(), TEST_COOKIE_SECRET.to_string()),
    ])
    .expect("Failed to build test config")
}

/// Application wired to a fresh in-memory store
pub struct TestApp {
    pub state: ApiState,
    pub store: Arc<MemoryStore>,
    pub client: TestClient,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state =
            ApiState::new(&test_config(), store.clone()).expect("Failed to create test state");
        let client = TestClient::new(router::router().with_state(state.clone()));

        Self {
            state,
            store,
            client,
        }
    }

    /// Register a user through the service and return it with a valid token
    pub async fn sign_up(&self, email: &str) -> (User, String) {
        let user = self
            .state
            .hierarchy
            .create_user(email)
            .await
            .expect("Failed to create user");
        let token = jwt::generate_jwt_token(user.id, user.email.clone(), TEST_JWT_SECRET)
            .expect("Failed to generate token");
        (user, token)
    }

    pub async fn reload_user(&self, user: &User) -> User {
        self.state
            .hierarchy
            .find_user(user.id)
            .await
            .expect("Failed to load user")
            .expect("User should exist")
    }

    pub fn cookie_key(&self) -> &Key {
        &self.state.cookie_key
    }
}

/// Encrypt `token` the way the server's private cookie jar expects it
pub fn auth_cookie_header(token: &str, cookie_key: &Key) -> String {
    use cookie::{CookieJar as RawCookieJar, Key as RawKey};

    let raw_key = RawKey::try_from(cookie_key.master()).expect("Invalid key");
    let mut raw_jar = RawCookieJar::new();
    raw_jar
        .private_mut(&raw_key)
        .add(cookie::Cookie::new("auth_token", token.to_string()));

    let encrypted = raw_jar.get("auth_token").expect("Cookie should exist");
    format!("{}={}", encrypted.name(), encrypted.value())
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.request(request).await
    }

    /// Send an authenticated request, with a JSON body when `body` is given
    pub async fn send_with_auth(
        &self,
        method: &str,
        uri: &str,
        body: Option<&Value>,
        token: &str,
        cookie_key: &Key,
    ) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("cookie", auth_cookie_header(token, cookie_key));

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build authenticated request");

        self.request(request).await
    }

    pub async fn get_with_auth(&self, uri: &str, token: &str, cookie_key: &Key) -> TestResponse {
        self.send_with_auth("GET", uri, None, token, cookie_key).await
    }

    pub async fn post_json_with_auth(
        &self,
        uri: &str,
        body: &Value,
        token: &str,
        cookie_key: &Key,
    ) -> TestResponse {
        self.send_with_auth("POST", uri, Some(body), token, cookie_key)
            .await
    }

    pub async fn put_json_with_auth(
        &self,
        uri: &str,
        body: &Value,
        token: &str,
        cookie_key: &Key,
    ) -> TestResponse {
        self.send_with_auth("PUT", uri, Some(body), token, cookie_key)
            .await
    }

    pub async fn patch_json_with_auth(
        &self,
        uri: &str,
        body: &Value,
        token: &str,
        cookie_key: &Key,
    ) -> TestResponse {
        self.send_with_auth("PATCH", uri, Some(body), token, cookie_key)
            .await
    }

    pub async fn delete_with_auth(&self, uri: &str, token: &str, cookie_key: &Key) -> TestResponse {
        self.send_with_auth("DELETE", uri, None, token, cookie_key)
            .await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    pub fn error_message(&self) -> String {
        let body: Value = self.json();
        body["error"]
            .as_str()
            .expect("Error response should carry a message")
            .to_string()
    }

    /// Check whether a Set-Cookie header exists for `name`
    pub fn has_cookie(&self, name: &str) -> bool {
        self.headers
            .get_all("set-cookie")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|cookie| cookie.starts_with(&format!("{name}=")))
    }
}

/// Tagged fill-in question object
pub fn fill_in(question: &str, answer: &str) -> Value {
    json!({
        "type": "FillInQuestion",
        "questionHtml": question,
        "answer": answer,
        "ignoreCase": true,
        "alternativeAnswers": []
    })
}

/// Tagged multiple choice question object
pub fn multiple_choice(question: &str, choices: &[&str], correct: usize) -> Value {
    json!({
        "type": "MultipleChoiceQuestion",
        "questionHtml": question,
        "choices": choices,
        "correctAnswerIndex": correct
    })
}
