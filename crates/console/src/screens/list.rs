//! Paginated list screen.

use stampdesk_core::{Page, PageRequest};
use tracing::debug;

use super::{LoadState, screen_error};
use crate::api::{ApiClient, Operation};
use crate::error::ApiError;
use crate::navigation::Navigator;

/// Pager state derived from a loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub page: u32,
    pub total_pages: u64,
    pub total: u64,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    #[must_use]
    pub fn of<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page(),
            total_pages: page.total_pages(),
            total: page.total(),
            previous_enabled: page.has_previous(),
            next_enabled: page.has_next(),
        }
    }
}

/// One page of the collection behind a list operation.
pub struct ListScreen<O: Operation> {
    request: PageRequest,
    state: LoadState<O::Output>,
}

impl<O, T> ListScreen<O>
where
    O: Operation<Input = PageRequest, Output = Page<T>>,
{
    /// A screen on page 1.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            request: PageRequest::first(per_page),
            state: LoadState::Loading,
        }
    }

    /// The page currently wanted.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState<Page<T>> {
        &self.state
    }

    /// Pager state, once a page is loaded.
    #[must_use]
    pub fn controls(&self) -> Option<PaginationControls> {
        self.state.value().map(PaginationControls::of)
    }

    /// Switch to `page` and mark the screen loading. Returns the request to send.
    pub fn begin(&mut self, page: u32) -> PageRequest {
        self.request = self.request.with_page(page);
        self.state = LoadState::Loading;
        self.request
    }

    /// Apply the result for `request`. Results for any other page are
    /// discarded. Returns whether the result was applied.
    pub fn apply(
        &mut self,
        request: PageRequest,
        result: Result<Page<T>, ApiError>,
        nav: &mut Navigator,
    ) -> bool {
        if request != self.request {
            debug!(
                operation = O::ENDPOINT.name,
                stale = request.page(),
                current = self.request.page(),
                "Discarding stale page"
            );
            return false;
        }
        self.state = match result {
            Ok(page) => LoadState::Loaded(page),
            Err(e) => LoadState::Error(screen_error(&e, nav)),
        };
        true
    }

    /// Load the current page, from cache when fresh.
    pub async fn load(&mut self, client: &ApiClient, nav: &mut Navigator) {
        let request = self.begin(self.request.page());
        let result = client.query::<O>(request).await;
        self.apply(request, result, nav);
    }

    /// Reload the current page from the server.
    pub async fn reload(&mut self, client: &ApiClient, nav: &mut Navigator) {
        let request = self.begin(self.request.page());
        let result = client.refetch::<O>(request).await;
        self.apply(request, result, nav);
    }

    /// Jump to `page`.
    pub async fn go_to(&mut self, page: u32, client: &ApiClient, nav: &mut Navigator) {
        let request = self.begin(page);
        let result = client.query::<O>(request).await;
        self.apply(request, result, nav);
    }

    /// Advance one page if the pager allows it.
    pub async fn next(&mut self, client: &ApiClient, nav: &mut Navigator) {
        if let Some(controls) = self.controls()
            && controls.next_enabled
        {
            self.go_to(controls.page + 1, client, nav).await;
        }
    }

    /// Go back one page if the pager allows it.
    pub async fn previous(&mut self, client: &ApiClient, nav: &mut Navigator) {
        if let Some(controls) = self.controls()
            && controls.previous_enabled
        {
            self.go_to(controls.page - 1, client, nav).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ops::ListProducts;
    use crate::navigation::Route;

    #[test]
    fn test_stale_page_is_discarded() {
        let mut nav = Navigator::new(Route::ProductList);
        let mut screen = ListScreen::<ListProducts>::new(10);

        let first = screen.begin(2);
        let second = screen.begin(3);

        let stale = Page::new(vec![], 40, 2, 10).unwrap();
        assert!(!screen.apply(first, Ok(stale), &mut nav));
        assert!(screen.state().is_loading());

        let fresh = Page::new(vec![], 40, 3, 10).unwrap();
        assert!(screen.apply(second, Ok(fresh), &mut nav));
        let controls = screen.controls().unwrap();
        assert_eq!(controls.page, 3);
        assert_eq!(controls.total_pages, 4);
        assert!(controls.previous_enabled);
        assert!(controls.next_enabled);
    }

    #[test]
    fn test_error_state_and_auth_redirect() {
        let mut nav = Navigator::new(Route::ProductList);
        let mut screen = ListScreen::<ListProducts>::new(10);
        let request = screen.begin(1);

        screen.apply(request, Err(ApiError::Unauthorized { status: 401 }), &mut nav);
        assert!(screen.state().error().is_some());
        assert_eq!(nav.current(), &Route::Login);
    }

    #[test]
    fn test_pager_on_single_page() {
        let page: Page<u32> = Page::new(vec![1, 2], 2, 1, 10).unwrap();
        let controls = PaginationControls::of(&page);
        assert!(!controls.previous_enabled);
        assert!(!controls.next_enabled);
        assert_eq!(controls.total_pages, 1);
    }
}
