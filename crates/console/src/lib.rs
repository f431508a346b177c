//! Stampdesk Console - API access and screen logic.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`session`] - Bearer token storage
//! - [`api`] - Endpoint registry and the typed HTTP client
//! - [`screens`] - List, detail, create and update state machines
//! - [`navigation`] - Routes and history
//! - [`render`] - Plain-text output
//!
//! # Flow
//!
//! A screen validates its draft, calls an operation through [`ApiClient`],
//! and either stores the unwrapped payload or moves the [`Navigator`]. The
//! client attaches the session token and clears it when the server rejects
//! it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod render;
pub mod screens;
pub mod session;

pub use api::{ApiClient, Operation, ops};
pub use config::{ConfigError, ConsoleConfig};
pub use error::ApiError;
pub use navigation::{Navigator, Route};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};

/// Everything a front end needs: configuration, client and navigator.
#[derive(Debug)]
pub struct Console {
    pub config: ConsoleConfig,
    pub client: ApiClient,
    pub navigator: Navigator,
}

impl Console {
    /// Build a console backed by the configured session file.
    ///
    /// Starts on the dashboard when a token is already stored, otherwise on
    /// the login screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        let session = Session::file(&config.session_file);
        Self::with_session(config, session)
    }

    /// Build a console over an explicit session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_session(config: ConsoleConfig, session: Session) -> Result<Self, ApiError> {
        let start = if session.is_authenticated() {
            Route::Dashboard
        } else {
            Route::Login
        };
        let client = ApiClient::from_config(&config, session)?;
        Ok(Self {
            config,
            client,
            navigator: Navigator::new(start),
        })
    }
}
