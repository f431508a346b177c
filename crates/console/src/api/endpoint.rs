//! Endpoint declarations and the request shape they produce.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use stampdesk_core::{FormPayload, PageRequest};

use crate::error::ApiError;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
        }
    }
}

/// How an operation's input travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// No input.
    None,
    /// JSON request body.
    Json,
    /// Multipart form body.
    Form,
    /// Id substituted into the path.
    Id,
    /// `page` and `perpage` query parameters.
    Page,
    /// Id in the path plus a JSON body.
    IdJson,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "-",
            Self::Json => "json",
            Self::Form => "multipart",
            Self::Id => "id",
            Self::Page => "page",
            Self::IdJson => "id + json",
        })
    }
}

/// Static description of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name, used for logging and cache invalidation.
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path template relative to the base URL. `{id}` marks the id segment.
    pub path: &'static str,
    pub input: InputKind,
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Json(Value),
    Multipart(FormPayload),
}

/// A fully resolved request, minus host and headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParts {
    /// Path segments, unescaped.
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl RequestParts {
    /// Resolve a path template. `{id}` segments are replaced by `id`.
    fn from_template(template: &str, id: Option<&str>) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match (s, id) {
                ("{id}", Some(id)) => id.to_string(),
                _ => s.to_string(),
            })
            .collect();
        Self {
            segments,
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Request for an operation without input.
    #[must_use]
    pub fn bare(template: &str) -> Self {
        Self::from_template(template, None)
    }

    /// Request with the id placed in the path.
    #[must_use]
    pub fn with_id(template: &str, id: &str) -> Self {
        Self::from_template(template, Some(id))
    }

    /// Request with `page`/`perpage` query parameters.
    #[must_use]
    pub fn paged(template: &str, page: PageRequest) -> Self {
        let mut parts = Self::bare(template);
        parts.query.extend(page.query_pairs());
        parts
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn form(mut self, form: FormPayload) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// `/a/b/c` rendering of the path.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// `METHOD path?query`, the cache key for a query.
    #[must_use]
    pub fn cache_key(&self, method: HttpMethod) -> String {
        let mut key = format!("{method} {}", self.path());
        if !self.query.is_empty() {
            let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            key.push('?');
            key.push_str(&query.join("&"));
        }
        key
    }
}

/// Id plus body, for updates addressed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithId<I, B> {
    pub id: I,
    pub body: B,
}

impl<I, B> WithId<I, B> {
    pub const fn new(id: I, body: B) -> Self {
        Self { id, body }
    }
}

/// One typed API operation.
///
/// Implementations are generated by the `operations!` registry; the client
/// never needs per-operation code.
pub trait Operation: Send + Sync + 'static {
    /// What the caller supplies.
    type Input: Send;
    /// The unwrapped `data` payload.
    type Output: serde::de::DeserializeOwned + Send;

    const ENDPOINT: Endpoint;

    /// Resolve the input into path, query and body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if a JSON body cannot be serialized.
    fn request(input: Self::Input) -> Result<RequestParts, ApiError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_substitutes_id() {
        let parts = RequestParts::with_id("/product/detail/{id}", "p 1");
        assert_eq!(parts.segments, ["product", "detail", "p 1"]);
        assert_eq!(parts.path(), "/product/detail/p 1");
    }

    #[test]
    fn test_cache_key_includes_query() {
        let parts = RequestParts::paged("/product/list", PageRequest::new(2, 10));
        assert_eq!(
            parts.cache_key(HttpMethod::Get),
            "GET /product/list?page=2&perpage=10"
        );
        assert_eq!(RequestParts::bare("/me").cache_key(HttpMethod::Get), "GET /me");
    }

    #[test]
    fn test_json_body() {
        let parts = RequestParts::bare("/product/add")
            .json(&json!({"name": "Tea"}))
            .unwrap();
        assert_eq!(parts.body, RequestBody::Json(json!({"name": "Tea"})));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(HttpMethod::Get.to_string(), "GET");
    }
}
