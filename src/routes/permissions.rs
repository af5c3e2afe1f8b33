//! Declarative route-permission metadata for the manufacturer surface.
//!
//! Pure data: maps each URL pattern and verb to the permission scopes an
//! external authorization layer must require before letting the request
//! through. Nothing here enforces anything.

use axum::http::Method;

pub const SCOPE_TENANT_GUEST: &str = "tenant.guest";
pub const SCOPE_TENANT_USER: &str = "tenant.user";

#[derive(Debug)]
pub struct RouteAction {
    pub method: Method,
    pub scopes: &'static [&'static str],
}

#[derive(Debug)]
pub struct RouteDescriptor {
    pub pattern: &'static str,
    pub actions: &'static [RouteAction],
}

/// Guests may read; writes need a full tenant user.
pub const MANUFACTURER_ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        pattern: "/",
        actions: &[
            RouteAction {
                method: Method::GET,
                scopes: &[SCOPE_TENANT_GUEST, SCOPE_TENANT_USER],
            },
            RouteAction {
                method: Method::POST,
                scopes: &[SCOPE_TENANT_USER],
            },
        ],
    },
    RouteDescriptor {
        pattern: "/:id",
        actions: &[
            RouteAction {
                method: Method::GET,
                scopes: &[SCOPE_TENANT_GUEST, SCOPE_TENANT_USER],
            },
            RouteAction {
                method: Method::PUT,
                scopes: &[SCOPE_TENANT_USER],
            },
            RouteAction {
                method: Method::DELETE,
                scopes: &[SCOPE_TENANT_USER],
            },
        ],
    },
];

/// Scopes required for a pattern + verb, or `None` when the pair is not
/// declared.
pub fn required_scopes(pattern: &str, method: &Method) -> Option<&'static [&'static str]> {
    MANUFACTURER_ROUTES
        .iter()
        .find(|r| r.pattern == pattern)?
        .actions
        .iter()
        .find(|a| a.method == *method)
        .map(|a| a.scopes)
}

/// Flat iteration for routers that merge permission tables from several
/// entity surfaces.
pub fn iter_actions() -> impl Iterator<Item = (&'static str, &'static RouteAction)> {
    MANUFACTURER_ROUTES
        .iter()
        .flat_map(|r| r.actions.iter().map(move |a| (r.pattern, a)))
}
