//! Typed access to the REST API.
//!
//! - [`endpoint`] - The [`Operation`] trait and request model
//! - [`ops`] - The registry: one marker type per API operation
//! - [`client`] - [`ApiClient`], the only code that talks HTTP

pub mod client;
pub mod endpoint;
pub mod ops;

pub use client::{ApiClient, ClientOptions, REQUEST_ID_HEADER};
pub use endpoint::{Endpoint, HttpMethod, InputKind, Operation, RequestBody, RequestParts, WithId};
pub use ops::ENDPOINTS;
