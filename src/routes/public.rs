use crate::{
    guard::LOGIN_PATH,
    models::{AccessRequirement, ViewId},
    router::RouteRecord,
};

/// Public Route Module
///
/// Entry points reachable without a session. The root path never renders a view:
/// it redirects unconditionally to the login page, before the guard runs.
pub fn public_routes() -> Vec<RouteRecord> {
    vec![
        // / -> /login
        RouteRecord::redirect("/", LOGIN_PATH),
        RouteRecord::view(LOGIN_PATH, ViewId::Login, AccessRequirement::Public),
        RouteRecord::view("/register", ViewId::Register, AccessRequirement::Public),
    ]
}
