//! Stampdesk Core - Shared types for the Stampdesk console.
//!
//! This crate holds everything that does not touch the network:
//! - `dto` - Request and response shapes for each entity
//! - `types` - Typed ids, email and price newtypes
//! - `envelope` - The `{ status, data, httpStatus }` response wrapper
//! - `pagination` - Page requests and validated pages
//! - `forms` - Form drafts and their validation rules
//! - `multipart` - Transport-neutral multipart form model
//!
//! # Architecture
//!
//! No I/O, no HTTP clients. The `console` crate owns the client, session and
//! screens and builds on these types.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dto;
pub mod envelope;
pub mod forms;
pub mod multipart;
pub mod pagination;
pub mod types;

pub use envelope::{ApiEnvelope, EnvelopeError};
pub use forms::{FieldError, FormDraft, Prefill, ValidationErrors};
pub use multipart::{FileUpload, FormPart, FormPayload};
pub use pagination::{Page, PageError, PageRequest};
pub use types::*;
