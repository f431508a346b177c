//! Single-record screen.

use super::{LoadState, screen_error};
use crate::api::{ApiClient, Operation};
use crate::navigation::Navigator;

pub struct DetailScreen<O: Operation> {
    state: LoadState<O::Output>,
}

impl<O: Operation> DetailScreen<O> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState<O::Output> {
        &self.state
    }

    /// Consume the screen, returning the record if it loaded.
    #[must_use]
    pub fn into_value(self) -> Option<O::Output> {
        match self.state {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Fetch the record, from cache when fresh.
    pub async fn load(&mut self, input: O::Input, client: &ApiClient, nav: &mut Navigator) {
        self.state = LoadState::Loading;
        self.state = match client.query::<O>(input).await {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Error(screen_error(&e, nav)),
        };
    }

    /// Fetch the record from the server, bypassing the cache.
    pub async fn reload(&mut self, input: O::Input, client: &ApiClient, nav: &mut Navigator) {
        self.state = LoadState::Loading;
        self.state = match client.refetch::<O>(input).await {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Error(screen_error(&e, nav)),
        };
    }
}

impl<O: Operation> Default for DetailScreen<O> {
    fn default() -> Self {
        Self::new()
    }
}
