//! HTTP client for the REST API.
//!
//! One generic request path serves every registered operation. Reads can go
//! through a `moka` cache keyed by `METHOD path?query`; writes never touch it.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use serde_json::Value;
use stampdesk_core::dto::{AuthResponse, LoginRequest};
use stampdesk_core::{ApiEnvelope, FormPart, FormPayload};
use tracing::{Span, debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use super::endpoint::{Endpoint, Operation, RequestBody, RequestParts};
use super::ops;
use crate::config::ConsoleConfig;
use crate::error::{ApiError, error_message};
use crate::session::Session;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const CACHE_CAPACITY: u64 = 1000;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct QueryKey {
    operation: &'static str,
    request: String,
}

/// Tunables for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub cache_ttl: Duration,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            timeout: None,
        }
    }
}

/// Typed client over the endpoint registry.
///
/// Cheap to clone; clones share the connection pool, cache and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    cache: Cache<QueryKey, Value>,
}

impl ApiClient {
    /// Create a client with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client fails to build.
    pub fn new(base_url: &str, session: Session) -> Result<Self, ApiError> {
        Self::with_options(base_url, session, &ClientOptions::default())
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &ConsoleConfig, session: Session) -> Result<Self, ApiError> {
        let options = ClientOptions {
            cache_ttl: config.cache_ttl,
            timeout: config.http_timeout,
        };
        Self::with_options(config.api_base_url.as_str(), session, &options)
    }

    /// Create a client with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client fails to build.
    pub fn with_options(
        base_url: &str,
        session: Session,
        options: &ClientOptions,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(options.cache_ttl)
            .support_invalidation_closures()
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http: builder.build()?,
                base_url,
                session,
                cache,
            }),
        })
    }

    /// The session this client reads its token from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    // =========================================================================
    // Typed operations
    // =========================================================================

    /// Run a read, serving it from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers non-2xx or
    /// the payload does not decode.
    pub async fn query<O: Operation>(&self, input: O::Input) -> Result<O::Output, ApiError> {
        let parts = O::request(input)?;
        let key = Self::query_key(&O::ENDPOINT, &parts);

        if let Some(cached) = self.inner.cache.get(&key).await {
            debug!(operation = O::ENDPOINT.name, key = %key.request, "Cache hit");
            return Ok(serde_json::from_value(cached)?);
        }

        self.fetch_and_cache::<O>(key, parts).await
    }

    /// Run a read against the server and replace its cache entry.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::query`].
    pub async fn refetch<O: Operation>(&self, input: O::Input) -> Result<O::Output, ApiError> {
        let parts = O::request(input)?;
        let key = Self::query_key(&O::ENDPOINT, &parts);
        self.fetch_and_cache::<O>(key, parts).await
    }

    /// Drop every cached result of one operation.
    pub async fn invalidate<O: Operation>(&self) {
        self.invalidate_operation(O::ENDPOINT.name).await;
    }

    /// Drop every cached result of the operation registered as `name`.
    pub async fn invalidate_operation(&self, name: &'static str) {
        if let Err(e) = self
            .inner
            .cache
            .invalidate_entries_if(move |key, _| key.operation == name)
        {
            warn!(operation = name, error = ?e, "Cache invalidation rejected");
        }
        self.inner.cache.run_pending_tasks().await;
    }

    /// Drop the whole cache.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    /// Run a write. Never reads or populates the cache.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::query`].
    pub async fn mutate<O: Operation>(&self, input: O::Input) -> Result<O::Output, ApiError> {
        let parts = O::request(input)?;
        let data = self.send(&O::ENDPOINT, parts).await?;
        Ok(serde_json::from_value(data)?)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Sign in and store the returned token in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the token cannot
    /// be stored.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        let auth = self.mutate::<ops::Login>(request).await?;
        self.inner.session.set_token(auth.access_token.clone())?;
        self.invalidate_all().await;
        debug!("Signed in");
        Ok(auth)
    }

    /// Forget the token and every cached result.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.inner.session.clear()?;
        self.invalidate_all().await;
        debug!("Signed out");
        Ok(())
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn query_key(endpoint: &Endpoint, parts: &RequestParts) -> QueryKey {
        QueryKey {
            operation: endpoint.name,
            request: parts.cache_key(endpoint.method),
        }
    }

    async fn fetch_and_cache<O: Operation>(
        &self,
        key: QueryKey,
        parts: RequestParts,
    ) -> Result<O::Output, ApiError> {
        let data = self.send(&O::ENDPOINT, parts).await?;
        let output = serde_json::from_value(data.clone())?;
        self.inner.cache.insert(key, data).await;
        Ok(output)
    }

    fn url_for(&self, parts: &RequestParts) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(&parts.segments);
        if !parts.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &parts.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send one request and return the unwrapped `data` payload.
    #[instrument(
        skip_all,
        fields(
            operation = endpoint.name,
            method = %endpoint.method,
            path = %parts.path(),
            request_id = tracing::field::Empty,
        )
    )]
    async fn send(&self, endpoint: &Endpoint, parts: RequestParts) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", tracing::field::display(request_id));

        let url = self.url_for(&parts)?;
        let mut request = self
            .inner
            .http
            .request(endpoint.method.into(), url)
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(token) = self.inner.session.token()? {
            request = request.bearer_auth(token.expose_secret());
        }

        request = match parts.body {
            RequestBody::None => request,
            RequestBody::Json(body) => request.json(&body),
            RequestBody::Multipart(form) => request.multipart(to_multipart(form)?),
        };

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "Session rejected, clearing token");
            if let Err(e) = self.inner.session.clear() {
                warn!(error = %e, "Failed to clear session after rejection");
            }
            self.invalidate_all().await;
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;

        if !status.is_success() {
            let body: Option<Value> = serde_json::from_str(&text).ok();
            let message = body
                .as_ref()
                .and_then(error_message)
                .or_else(|| (!text.is_empty()).then(|| text.chars().take(200).collect()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            debug!(status = status.as_u16(), %message, "API returned non-success status");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let envelope: ApiEnvelope<Value> = serde_json::from_str(&text)?;
        let data = envelope.unwrap()?;
        debug!(status = status.as_u16(), "Request succeeded");
        Ok(data)
    }
}

/// Turn the transport-neutral form into a reqwest multipart body.
fn to_multipart(payload: FormPayload) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, part) in payload.parts() {
        form = match part {
            FormPart::Text(value) => form.text(name.clone(), value.clone()),
            FormPart::File(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime_type)?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stampdesk_core::{FileUpload, PageRequest};
    use stampdesk_core::types::ProductId;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Session::in_memory()).unwrap()
    }

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(matches!(
            ApiClient::new("/api", Session::in_memory()),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = client("http://localhost:8080/api/");
        let parts = ops::ListProducts::request(PageRequest::new(2, 10)).unwrap();
        assert_eq!(
            client.url_for(&parts).unwrap().as_str(),
            "http://localhost:8080/api/product/list?page=2&perpage=10"
        );
    }

    #[test]
    fn test_url_escapes_id_segment() {
        let client = client("http://localhost:8080/api");
        let parts = ops::GetProduct::request(ProductId::new("a/b c")).unwrap();
        assert_eq!(
            client.url_for(&parts).unwrap().as_str(),
            "http://localhost:8080/api/product/detail/a%2Fb%20c"
        );
    }

    #[test]
    fn test_url_without_base_path() {
        let client = client("http://localhost:8080");
        let parts = ops::GetCurrentUser::request(()).unwrap();
        assert_eq!(
            client.url_for(&parts).unwrap().as_str(),
            "http://localhost:8080/me"
        );
    }

    #[test]
    fn test_multipart_conversion_accepts_files() {
        let mut payload = FormPayload::new();
        payload
            .text("name", "Acme")
            .file("logo", FileUpload::new("logo.png", vec![0x89, 0x50]));
        assert!(to_multipart(payload).is_ok());
    }

    #[test]
    fn test_debug_output() {
        let client = client("http://localhost:8080/api");
        let rendered = format!("{client:?}");
        assert!(rendered.contains("localhost:8080"));
        assert!(rendered.contains("authenticated"));
    }
}
