//! Screen routes and navigation history.

use std::fmt;

use stampdesk_core::types::{BusinessId, ProductId};

/// Every screen reachable in the console, addressed by its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Profile,
    CreateProfile,
    UpdateProfile,
    BusinessList,
    /// `None` is the signed-in account's own business.
    BusinessDetail(Option<BusinessId>),
    BusinessCreate,
    BusinessUpdate,
    ProductList,
    ProductDetail(ProductId),
    ProductCreate,
    ProductEdit(ProductId),
    StampTemplateList,
    StampTemplateCreate,
    GenerationList,
    GenerationCreate,
    ActivationList,
    ActivationCreate,
    RetailList,
    RetailCreate,
    DestructionList,
    DestructionCreate,
}

impl Route {
    /// Path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::BusinessDetail(Some(id)) => format!("/business/detail/{id}"),
            Self::ProductDetail(id) => format!("/product/detail/{id}"),
            Self::ProductEdit(id) => format!("/product/edit/{id}"),
            other => other.static_path().to_string(),
        }
    }

    const fn static_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/user/profile",
            Self::CreateProfile => "/user/create-profile",
            Self::UpdateProfile => "/user/update-profile",
            Self::BusinessList => "/business/list",
            Self::BusinessDetail(_) => "/business/detail",
            Self::BusinessCreate => "/business/create",
            Self::BusinessUpdate => "/business/update",
            Self::ProductList => "/product/list",
            Self::ProductDetail(_) => "/product/detail",
            Self::ProductCreate => "/product/create",
            Self::ProductEdit(_) => "/product/edit",
            Self::StampTemplateList => "/stamp/template/list",
            Self::StampTemplateCreate => "/stamp/template/create",
            Self::GenerationList => "/stamp/list",
            Self::GenerationCreate => "/stamp/create",
            Self::ActivationList => "/activation/list",
            Self::ActivationCreate => "/activation/create",
            Self::RetailList => "/retail/list",
            Self::RetailCreate => "/retail/create",
            Self::DestructionList => "/destruction/list",
            Self::DestructionCreate => "/destruction/create",
        }
    }

    /// Parse a path back into a route.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        if let Some(id) = path.strip_prefix("/business/detail/") {
            return non_empty(id).map(|id| Self::BusinessDetail(Some(BusinessId::new(id))));
        }
        if let Some(id) = path.strip_prefix("/product/detail/") {
            return non_empty(id).map(|id| Self::ProductDetail(ProductId::new(id)));
        }
        if let Some(id) = path.strip_prefix("/product/edit/") {
            return non_empty(id).map(|id| Self::ProductEdit(ProductId::new(id)));
        }

        let route = match path {
            "/login" => Self::Login,
            "" | "/dashboard" => Self::Dashboard,
            "/user/profile" => Self::Profile,
            "/user/create-profile" => Self::CreateProfile,
            "/user/update-profile" => Self::UpdateProfile,
            "/business/list" => Self::BusinessList,
            "/business/detail" => Self::BusinessDetail(None),
            "/business/create" => Self::BusinessCreate,
            "/business/update" => Self::BusinessUpdate,
            "/product/list" => Self::ProductList,
            "/product/create" => Self::ProductCreate,
            "/stamp/template/list" => Self::StampTemplateList,
            "/stamp/template/create" => Self::StampTemplateCreate,
            "/stamp/list" => Self::GenerationList,
            "/stamp/create" => Self::GenerationCreate,
            "/activation/list" => Self::ActivationList,
            "/activation/create" => Self::ActivationCreate,
            "/retail/list" => Self::RetailList,
            "/retail/create" => Self::RetailCreate,
            "/destruction/list" => Self::DestructionList,
            "/destruction/create" => Self::DestructionCreate,
            _ => return None,
        };
        Some(route)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty() && !s.contains('/')).then_some(s)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the trail that led to it.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Navigator {
    #[must_use]
    pub const fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    /// Earlier routes, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Move to `route`. Navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::debug!(from = %self.current, to = %route, "Navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    /// Return to the previous route. Returns `false` when there is none.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Send the user to the login screen.
    pub fn to_login(&mut self) {
        self.navigate(Route::Login);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}
