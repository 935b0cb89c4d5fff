//! Route-level test harness for the site CMS admin.
//!
//! Drives the real router with `tower::ServiceExt::oneshot` against a
//! [`FakeCmsApi`] that records every request and replays scripted replies,
//! so no server or backend has to run.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cms-admin-integration-tests
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode, header};
use reqwest::Method;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use cms_admin::api::{ApiError, ApiRequest, CmsApi};
use cms_admin_core::{ContentRecord, SectionSchema};
use cms_admin::app::build_app;
use cms_admin::config::AdminConfig;
use cms_admin::middleware::SESSION_COOKIE_NAME;
use cms_admin::state::AppState;

/// Multipart boundary used by [`MultipartForm`].
pub const BOUNDARY: &str = "cms-admin-test-boundary";

/// Scripted reply of the fake backend.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with this JSON body.
    Json(Value),
    /// Non-2xx status with a message, mapped the way the HTTP client maps it.
    Status(u16, String),
}

impl Reply {
    fn into_result(self, path: &str) -> Result<Value, ApiError> {
        match self {
            Self::Json(body) => Ok(body),
            Self::Status(401 | 403, _) => Err(ApiError::Unauthorized),
            Self::Status(404, _) => Err(ApiError::NotFound(path.to_string())),
            Self::Status(status, message) => Err(ApiError::Api { status, message }),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    requests: Vec<ApiRequest>,
    replies: HashMap<(Method, String), VecDeque<Reply>>,
}

/// In-memory `CmsApi` that records requests and replays scripted replies.
///
/// Unscripted requests get a 404.
#[derive(Debug, Clone, Default)]
pub struct FakeCmsApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCmsApi {
    /// Create a fake with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a reply for `method path`. Replies are consumed in order; the
    /// last one is repeated.
    pub fn reply(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.lock()
            .replies
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Requests received for `method path`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method && r.path == path)
            .collect()
    }
}

#[async_trait]
impl CmsApi for FakeCmsApi {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let mut state = self.lock();
        let key = (request.method.clone(), request.path.clone());
        let path = request.path.clone();
        state.requests.push(request);

        let reply = match state.replies.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        drop(state);

        reply
            .unwrap_or_else(|| Reply::Status(404, "not scripted".to_string()))
            .into_result(&path)
    }
}

/// Response captured for assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub request_id: Option<String>,
    /// `name=value` of the session cookie, when one was set.
    pub session_cookie: Option<String>,
    pub body: String,
}

/// The router under test plus its fake backend.
pub struct TestApp {
    pub router: Router,
    pub api: FakeCmsApi,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the app with default local configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Build the app, adjusting the configuration first.
    ///
    /// # Panics
    ///
    /// Panics if the built-in test URL does not parse.
    #[must_use]
    pub fn with_config(adjust: impl FnOnce(&mut AdminConfig)) -> Self {
        let api_url = Url::parse("http://cms.test/api").expect("valid test URL");
        let mut config = AdminConfig::local(api_url);
        adjust(&mut config);

        let api = FakeCmsApi::new();
        let state = AppState::with_api(config, Arc::new(api.clone()));
        Self {
            router: build_app(state),
            api,
            cookie: None,
        }
    }

    /// Send a request, carrying the session cookie from earlier responses.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body is not UTF-8.
    pub async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request.headers_mut().insert(
                header::COOKIE,
                HeaderValue::from_str(cookie).expect("valid cookie header"),
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let session_cookie = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(ToString::to_string);
        if let Some(cookie) = &session_cookie {
            self.cookie = Some(cookie.clone());
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            location,
            request_id,
            session_cookie,
            body: String::from_utf8(bytes.to_vec()).expect("UTF-8 body"),
        }
    }

    /// `GET path`.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path).body(Body::empty()).expect("valid request"))
            .await
    }

    /// `POST path` with a urlencoded form.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("valid request"),
        )
        .await
    }

    /// `POST path` with a multipart form of text fields.
    pub async fn post_multipart(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let form = fields
            .iter()
            .fold(MultipartForm::new(), |form, (name, value)| form.text(name, value));
        self.post_multipart_form(path, form).await
    }

    /// `POST path` with a prepared multipart form.
    pub async fn post_multipart_form(&mut self, path: &str, form: MultipartForm) -> TestResponse {
        self.send(
            Request::post(path)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(form.into_body()))
                .expect("valid request"),
        )
        .await
    }

    /// Sign in through `POST /login/demo`.
    pub async fn sign_in_demo(&mut self) -> TestResponse {
        self.post_form("/login/demo", &[]).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Multipart body builder delimited by [`BOUNDARY`].
#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text part.
    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file part.
    #[must_use]
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add the inputs `sections/edit.html` renders for `record`.
    #[must_use]
    pub fn record(self, schema: &SectionSchema, record: &ContentRecord) -> Self {
        let mut form = self;
        for field in &schema.fields {
            form = form.text(&format!("f.{}", field.key), record.get(&field.key));
        }
        if !record.extra.is_empty() {
            form = form.text("__extra", &Value::Object(record.extra.clone()).to_string());
        }
        for list in &schema.lists {
            for (index, item) in record.items(&list.key).iter().enumerate() {
                let prefix = format!("l.{}.{index}", list.key);
                form = form.text(&format!("{prefix}.__id"), &item.id.to_string());
                for field in &list.fields {
                    form = form.text(&format!("{prefix}.{}", field.key), item.get(&field.key));
                }
            }
        }
        form
    }

    /// Finish the body.
    #[must_use]
    pub fn into_body(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
