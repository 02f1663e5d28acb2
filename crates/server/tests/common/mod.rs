use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bloglist_server::{app, AppState, ServerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
}

pub async fn spawn_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let mut config = ServerConfig::with_base_dir(dir.path());
    config.bcrypt_cost = 4;
    let state = AppState::new(config).await.unwrap();

    TestApp {
        router: app(state.clone()),
        state,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None, None).await
    }

    /// Register a user and return a session token for them
    pub async fn user_token(&self, username: &str, name: &str, password: &str) -> String {
        let created = self
            .request(
                "POST",
                "/api/users",
                None,
                Some(json!({ "username": username, "name": name, "password": password })),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);

        let login = self
            .request(
                "POST",
                "/api/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);
        login.body["token"].as_str().unwrap().to_string()
    }
}

#[allow(dead_code)]
pub fn initial_blogs() -> Vec<Value> {
    vec![
        json!({ "title": "Blog test", "url": "www.fullstackopen.com", "likes": 91 }),
        json!({ "title": "Blog test 2", "url": "www.fullstackopen.com", "likes": 12 }),
    ]
}
