//! End-to-end tests for the Stampdesk console.
//!
//! Tests run against [`MockServer`], an axum app bound to an ephemeral
//! local port that speaks the same `{ status, data, httpStatus }` envelope
//! as the real API. It records every request so tests can assert on headers,
//! query strings and multipart parts.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stampdesk-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use stampdesk_console::{ApiClient, Session};
use stampdesk_core::FormDraft;
use stampdesk_core::forms::LoginDraft;
use tokio::net::TcpListener;

/// Token handed out for [`PASSWORD`].
pub const TOKEN: &str = "tok-test-1";

/// The only password the mock accepts.
pub const PASSWORD: &str = "secret";

/// Request header carrying the client's correlation id.
const REQUEST_ID: &str = "x-request-id";

/// One request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

/// One multipart part: field name and either its text or `file:<name>`.
pub type FormField = (String, String);

#[derive(Debug, Default)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    products: Mutex<Vec<Value>>,
    businesses: Mutex<Vec<Value>>,
    ledgers: Mutex<HashMap<Ledger, Vec<Value>>>,
    forms: Mutex<Vec<(String, Vec<FormField>)>>,
    next_id: AtomicU32,
    expired: AtomicBool,
}

/// Stamp lifecycle collections. They share one set of list, detail and
/// add handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Ledger {
    Templates,
    Generations,
    Activations,
    Retail,
    Destructions,
}

impl Ledger {
    const ALL: [Self; 5] = [
        Self::Templates,
        Self::Generations,
        Self::Activations,
        Self::Retail,
        Self::Destructions,
    ];

    const fn prefix(self) -> &'static str {
        match self {
            Self::Templates => "/stamp-template",
            Self::Generations => "/stamp/generation",
            Self::Activations => "/stamp/activation",
            Self::Retail => "/stamp/retail",
            Self::Destructions => "/destruction",
        }
    }

    const fn id_prefix(self) -> &'static str {
        match self {
            Self::Templates => "t",
            Self::Generations => "g",
            Self::Activations => "a",
            Self::Retail => "r",
            Self::Destructions => "d",
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::Templates => "Stamp template",
            Self::Generations => "Generation",
            Self::Activations => "Activation",
            Self::Retail => "Retail order",
            Self::Destructions => "Destruction",
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A running mock API.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockServer {
    /// Start with no products.
    pub async fn start() -> Self {
        Self::with_products(0).await
    }

    /// Start with `count` products named `Product 1..=count`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_products(count: u32) -> Self {
        let state = Arc::new(MockState::default());
        {
            let mut products = lock(&state.products);
            for n in 1..=count {
                products.push(json!({
                    "id": format!("p{n}"),
                    "name": format!("Product {n}"),
                    "gtin": format!("893{n:010}"),
                    "price": 10.5,
                }));
            }
        }
        lock(&state.businesses).push(current_business());
        state.next_id.store(count + 1, Ordering::SeqCst);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        let app = router(Arc::clone(&state));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Base URL to configure the client with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// A client with an empty in-memory session.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url(), Session::in_memory()).expect("Failed to build client")
    }

    /// A client that has already signed in.
    ///
    /// # Panics
    ///
    /// Panics if the mock rejects the login.
    pub async fn signed_in_client(&self) -> ApiClient {
        let client = self.client();
        let request = LoginDraft::new("jane@example.com", PASSWORD)
            .submit()
            .expect("Login draft is valid");
        client.login(request).await.expect("Mock login failed");
        client
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Number of requests to `path` (relative to the API root).
    #[must_use]
    pub fn hits(&self, path: &str) -> usize {
        let full = format!("/api{path}");
        lock(&self.state.requests)
            .iter()
            .filter(|r| r.path == full)
            .count()
    }

    /// Reject every token from now on, as if it had expired.
    pub fn expire_session(&self) {
        self.state.expired.store(true, Ordering::SeqCst);
    }

    /// Parts of the most recent multipart form posted to `path`.
    #[must_use]
    pub fn last_form(&self, path: &str) -> Option<Vec<FormField>> {
        let full = format!("/api{path}");
        lock(&self.state.forms)
            .iter()
            .rev()
            .find(|(p, _)| *p == full)
            .map(|(_, fields)| fields.clone())
    }
}

fn current_business() -> Value {
    json!({
        "id": "b1",
        "name": "Acme",
        "shortName": "ACM",
        "fullName": "Acme Trading Co",
        "code": "AC-01",
        "phone": "0900000000",
        "email": "ops@acme.vn",
        "taxCode": "0101234567",
        "addressFull": "1 Main St",
        "provinceCode": "01",
        "districtCode": "001",
        "wardCode": "00001",
        "website": "https://acme.vn",
        "logo": "https://cdn.acme.vn/logo.png",
        "slideImages": ["https://cdn.acme.vn/s1.png"],
    })
}

fn router(state: Arc<MockState>) -> Router {
    let mut api = Router::new()
        .route("/auth/login-with-password", post(login))
        .route("/me", get(me))
        .route("/user/create-profile", post(create_profile))
        .route("/user/update-profile", post(update_profile))
        .route("/business", get(list_businesses))
        .route("/business/current", get(get_current_business))
        .route("/business/detail/{id}", get(business_detail))
        .route("/business/create", post(create_business))
        .route("/business/update", post(update_business))
        .route("/product/list", get(list_products))
        .route("/product/detail/{id}", get(product_detail))
        .route("/product/add", post(create_product))
        .route("/product/edit/{id}", post(edit_product));
    for ledger in Ledger::ALL {
        api = api.nest(ledger.prefix(), ledger_routes(ledger));
    }

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    // The header borrow must end before `next.run` so the future stays `Send`.
    let recorded = {
        let value_of = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(ToString::to_string),
            authorization: value_of(header::AUTHORIZATION.as_str()),
            request_id: value_of(REQUEST_ID),
        }
    };
    lock(&state.requests).push(recorded);
    next.run(request).await
}

// =============================================================================
// Responses
// =============================================================================

fn envelope(data: Value) -> Response {
    Json(json!({"status": "ok", "data": data, "httpStatus": 200})).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = json!({"status": "error", "message": message, "httpStatus": status.as_u16()});
    (status, Json(body)).into_response()
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {TOKEN}");
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if state.expired.load(Ordering::SeqCst) || presented != Some(expected.as_str()) {
        return Err(failure(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }
    Ok(())
}

/// `(page, perpage)` from the query string, both at least 1.
fn paging(params: &HashMap<String, String>) -> (u32, u32) {
    let read = |key: &str, default: u32| {
        params
            .get(key)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(default)
            .max(1)
    };
    (read("page", 1), read("perpage", 10))
}

fn slice(items: &[Value], page: u32, per_page: u32) -> Vec<Value> {
    let start = (page - 1) as usize * per_page as usize;
    items
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect()
}

fn next_id(state: &MockState, prefix: &str) -> String {
    format!("{prefix}{}", state.next_id.fetch_add(1, Ordering::SeqCst))
}

fn with_id(body: Value, id: &str) -> Value {
    let mut object = match body {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    object.insert("id".to_string(), json!(id));
    Value::Object(object)
}

/// Read a multipart body, recording it under `path`.
async fn read_form(
    state: &MockState,
    path: &str,
    mut multipart: Multipart,
) -> Result<Vec<FormField>, Response> {
    let mut fields = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err(failure(StatusCode::BAD_REQUEST, "Malformed form")),
        };
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|_| failure(StatusCode::BAD_REQUEST, "Malformed form"))?;
        let value = file_name.map_or_else(
            || String::from_utf8_lossy(&bytes).into_owned(),
            |f| format!("file:{f}"),
        );
        fields.push((name, value));
    }
    lock(&state.forms).push((format!("/api{path}"), fields.clone()));
    Ok(fields)
}

fn form_text<'a>(fields: &'a [FormField], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

// =============================================================================
// Handlers
// =============================================================================

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if body.get("password").and_then(Value::as_str) == Some(PASSWORD) {
        state.expired.store(false, Ordering::SeqCst);
        envelope(json!({"accessToken": TOKEN}))
    } else {
        failure(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

fn user(full_name: &str) -> Value {
    json!({"id": "u1", "full_name": full_name, "email": "jane@example.com", "phone": null})
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    envelope(user("Jane Doe"))
}

async fn create_profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    profile_form(&state, &headers, "/user/create-profile", multipart).await
}

async fn update_profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    profile_form(&state, &headers, "/user/update-profile", multipart).await
}

async fn profile_form(
    state: &MockState,
    headers: &HeaderMap,
    path: &str,
    multipart: Multipart,
) -> Response {
    if let Err(response) = authorize(state, headers) {
        return response;
    }
    match read_form(state, path, multipart).await {
        Ok(fields) => envelope(user(form_text(&fields, "full_name").unwrap_or("Jane Doe"))),
        Err(response) => response,
    }
}

async fn list_businesses(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let (page, per_page) = paging(&params);
    let businesses = lock(&state.businesses);
    envelope(json!({
        "items": slice(&businesses, page, per_page),
        "total": businesses.len(),
        "page": page,
        "pageSize": per_page,
    }))
}

async fn get_current_business(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let business = lock(&state.businesses).first().cloned();
    business.map_or_else(|| failure(StatusCode::NOT_FOUND, "No business"), envelope)
}

async fn business_detail(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let found = lock(&state.businesses)
        .iter()
        .find(|b| b.get("id").and_then(Value::as_str) == Some(id.as_str()))
        .cloned();
    found.map_or_else(|| failure(StatusCode::NOT_FOUND, "Business not found"), envelope)
}

async fn create_business(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let fields = match read_form(&state, "/business/create", multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let id = next_id(&state, "b");
    let business = json!({
        "id": id,
        "name": form_text(&fields, "name").unwrap_or_default(),
        "taxCode": form_text(&fields, "taxCode").unwrap_or_default(),
        "phone": form_text(&fields, "phone").unwrap_or_default(),
    });
    lock(&state.businesses).push(business.clone());
    envelope(business)
}

async fn update_business(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let fields = match read_form(&state, "/business/update", multipart).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let mut businesses = lock(&state.businesses);
    let Some(Value::Object(current)) = businesses.first_mut() else {
        return failure(StatusCode::NOT_FOUND, "No business");
    };
    for (name, value) in &fields {
        if !value.starts_with("file:") {
            current.insert(name.clone(), json!(value));
        }
    }
    envelope(Value::Object(current.clone()))
}

async fn list_products(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let (page, per_page) = paging(&params);
    let products = lock(&state.products);
    // Nested pagination block, as some list endpoints return.
    envelope(json!({
        "items": slice(&products, page, per_page),
        "pagination": {"total": products.len(), "page": page, "perpage": per_page},
    }))
}

async fn product_detail(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let found = lock(&state.products)
        .iter()
        .find(|p| p.get("id").and_then(Value::as_str) == Some(id.as_str()))
        .cloned();
    found.map_or_else(|| failure(StatusCode::NOT_FOUND, "Product not found"), envelope)
}

async fn create_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let product = with_id(body, &next_id(&state, "p"));
    lock(&state.products).push(product.clone());
    envelope(product)
}

async fn edit_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let mut products = lock(&state.products);
    let Some(slot) = products
        .iter_mut()
        .find(|p| p.get("id").and_then(Value::as_str) == Some(id.as_str()))
    else {
        return failure(StatusCode::NOT_FOUND, "Product not found");
    };
    *slot = with_id(body, &id);
    envelope(slot.clone())
}

fn ledger_routes(ledger: Ledger) -> Router<Arc<MockState>> {
    Router::new()
        .route(
            "/list",
            get(
                move |State(state): State<Arc<MockState>>,
                      headers: HeaderMap,
                      Query(params): Query<HashMap<String, String>>| async move {
                    list_ledger(&state, &headers, &params, ledger)
                },
            ),
        )
        .route(
            "/detail/{id}",
            get(
                move |State(state): State<Arc<MockState>>,
                      headers: HeaderMap,
                      Path(id): Path<String>| async move {
                    ledger_detail(&state, &headers, &id, ledger)
                },
            ),
        )
        .route(
            "/add",
            post(
                move |State(state): State<Arc<MockState>>,
                      headers: HeaderMap,
                      Json(body): Json<Value>| async move {
                    add_to_ledger(&state, &headers, body, ledger)
                },
            ),
        )
}

fn list_ledger(
    state: &MockState,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    ledger: Ledger,
) -> Response {
    if let Err(response) = authorize(state, headers) {
        return response;
    }
    let (page, per_page) = paging(params);
    let ledgers = lock(&state.ledgers);
    let records = ledgers.get(&ledger).map_or(&[][..], Vec::as_slice);
    envelope(json!({
        "items": slice(records, page, per_page),
        "pagination": {"total": records.len(), "page": page, "perpage": per_page},
    }))
}

fn ledger_detail(state: &MockState, headers: &HeaderMap, id: &str, ledger: Ledger) -> Response {
    if let Err(response) = authorize(state, headers) {
        return response;
    }
    let found = lock(&state.ledgers).get(&ledger).and_then(|records| {
        records
            .iter()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .cloned()
    });
    found.map_or_else(
        || failure(StatusCode::NOT_FOUND, &format!("{} not found", ledger.noun())),
        envelope,
    )
}

fn add_to_ledger(state: &MockState, headers: &HeaderMap, body: Value, ledger: Ledger) -> Response {
    if let Err(response) = authorize(state, headers) {
        return response;
    }
    let record = with_id(body, &next_id(state, ledger.id_prefix()));
    lock(&state.ledgers)
        .entry(ledger)
        .or_default()
        .push(record.clone());
    envelope(record)
}
