//! Request dispatch table.
//!
//! | Method  | Path        | Route       |
//! |---------|-------------|-------------|
//! | OPTIONS | any         | `Preflight` |
//! | POST    | proxy path  | `Proxy`     |
//! | POST    | other       | `NotFound`  |
//! | other   | any         | `Static`    |

use axum::http::Method;

/// Where a request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// 204 with CORS headers.
    Preflight,
    /// Forward to the upstream API.
    Proxy,
    /// 404 with CORS headers.
    NotFound,
    /// Static file lookup.
    Static,
}

/// Maps method and path to a [`Route`].
#[derive(Debug, Clone)]
pub struct Router {
    proxy_path: String,
}

impl Router {
    /// Create a router proxying POSTs on `proxy_path`.
    pub fn new(proxy_path: impl Into<String>) -> Self {
        Self {
            proxy_path: proxy_path.into(),
        }
    }

    /// Resolve a request. `path` excludes the query string.
    pub fn resolve(&self, method: &Method, path: &str) -> Route {
        if *method == Method::OPTIONS {
            Route::Preflight
        } else if *method == Method::POST {
            if path == self.proxy_path {
                Route::Proxy
            } else {
                Route::NotFound
            }
        } else {
            Route::Static
        }
    }
}
