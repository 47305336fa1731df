//! In-process fake of the REST auth service.
//!
//! Serves `/api/auth/{login,register,status}` on an ephemeral port with the
//! auth service's body shapes. [`FakeAuthService::start`] additionally serves
//! a `/api/auth/me` lookup, which the auth service itself does not have;
//! [`FakeAuthService::start_without_lookup`] leaves it out. Switches simulate
//! the gateway fallback (503) and a slow backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Message the gateway fallback answers with.
pub const FALLBACK_MESSAGE: &str = "Auth Service is currently unavailable. Please try again later.";

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    password: String,
    email: String,
    full_name: Option<String>,
    roles: Vec<&'static str>,
}

#[derive(Default)]
struct FakeState {
    accounts: Mutex<HashMap<String, Account>>,
    tokens: Mutex<HashMap<String, String>>,
    next_id: AtomicU64,
    down: AtomicBool,
    delay_ms: AtomicU64,
    me_calls: AtomicUsize,
    last_authorization: Mutex<Option<String>>,
}

type Shared = Arc<FakeState>;

impl FakeState {
    async fn gate(&self) -> Option<Response> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.down.load(Ordering::SeqCst).then(|| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "message": FALLBACK_MESSAGE })),
            )
                .into_response()
        })
    }
}

fn user_body(username: &str, account: &Account) -> Value {
    json!({
        "id": account.id,
        "username": username,
        "email": account.email,
        "fullName": account.full_name,
        "roles": account.roles,
    })
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    if let Some(fallback) = state.gate().await {
        return fallback;
    }

    let account = state.accounts.lock().get(&body.username).cloned();
    match account {
        Some(account) if account.password == body.password => {
            // administrators get the service's `-admin` token suffix
            let suffix = if account.roles.contains(&"ROLE_ADMIN") { "-admin" } else { "" };
            let token = format!("fake-token-{}{}", state.tokens.lock().len(), suffix);
            state
                .tokens
                .lock()
                .insert(token.clone(), body.username.clone());

            let mut response = user_body(&body.username, &account);
            response["token"] = json!(token);
            response["type"] = json!("Bearer");
            Json(response).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Bad credentials" })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    username: String,
    email: String,
    password: String,
    full_name: Option<String>,
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Response {
    if let Some(fallback) = state.gate().await {
        return fallback;
    }

    let mut accounts = state.accounts.lock();
    if accounts.contains_key(&body.username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Username is already taken!" })),
        )
            .into_response();
    }

    accounts.insert(
        body.username,
        Account {
            id: i64::try_from(state.next_id.fetch_add(1, Ordering::SeqCst)).unwrap_or(i64::MAX),
            password: body.password,
            email: body.email,
            full_name: body.full_name,
            roles: vec!["ROLE_USER"],
        },
    );
    Json(json!({ "message": "User registered successfully!" })).into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Some(fallback) = state.gate().await {
        return fallback;
    }
    state.me_calls.fetch_add(1, Ordering::SeqCst);

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_authorization.lock() = authorization.clone();

    let username = authorization
        .as_deref()
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| state.tokens.lock().get(token).cloned());
    let account = username
        .as_ref()
        .and_then(|u| state.accounts.lock().get(u).cloned());

    match (username, account) {
        (Some(username), Some(account)) => Json(user_body(&username, &account)).into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn status(State(state): State<Shared>) -> Response {
    if let Some(fallback) = state.gate().await {
        return fallback;
    }
    Json(json!({
        "status": "Auth service is running",
        "allowedOrigins": ["http://localhost:5173"],
    }))
    .into_response()
}

/// A running fake auth service. Shuts down on drop.
pub struct FakeAuthService {
    addr: SocketAddr,
    state: Shared,
    _shutdown_tx: oneshot::Sender<()>,
}

impl FakeAuthService {
    /// Starts the service with `admin/admin123` (admin) and `jdoe/secret1`.
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(true).await
    }

    /// Starts the service without the `/api/auth/me` lookup.
    pub async fn start_without_lookup() -> anyhow::Result<Self> {
        Self::start_with(false).await
    }

    async fn start_with(lookup: bool) -> anyhow::Result<Self> {
        let state = Shared::default();
        state.next_id.store(3, Ordering::SeqCst);
        {
            let mut accounts = state.accounts.lock();
            accounts.insert(
                "admin".to_string(),
                Account {
                    id: 1,
                    password: "admin123".to_string(),
                    email: "admin@example.com".to_string(),
                    full_name: Some("Administrator".to_string()),
                    roles: vec!["ROLE_ADMIN", "ROLE_USER"],
                },
            );
            accounts.insert(
                "jdoe".to_string(),
                Account {
                    id: 2,
                    password: "secret1".to_string(),
                    email: "jdoe@example.com".to_string(),
                    full_name: None,
                    roles: vec!["ROLE_USER"],
                },
            );
        }

        let mut app: Router<Shared> = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/status", get(status));
        if lookup {
            app = app.route("/api/auth/me", get(me));
        }
        let app = app.with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("Fake auth service error: {}", e);
            }
        });

        Ok(Self {
            addr,
            state,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Base URL to configure the client with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Answers everything with the gateway fallback while set.
    pub fn set_down(&self, down: bool) {
        self.state.down.store(down, Ordering::SeqCst);
    }

    /// Delays every answer.
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.state.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Invalidates every issued token.
    pub fn revoke_all(&self) {
        self.state.tokens.lock().clear();
    }

    /// Number of `/auth/me` requests served.
    #[must_use]
    pub fn me_calls(&self) -> usize {
        self.state.me_calls.load(Ordering::SeqCst)
    }

    /// `Authorization` header of the last `/auth/me` request.
    #[must_use]
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().clone()
    }
}
