use crate::{
    models::{AccessRequirement, NavigationDecision, NavigationOutcome, SessionState},
    router::{HistoryMode, NotFound, RouteMatch, RouteRecord, RouteTable},
};

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated non-admins are sent when they reach an admin route.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// governing_requirement
///
/// The most restrictive requirement in a matched chain. A public parent with a
/// protected child (or the reverse) is governed by the stricter of the two.
pub fn governing_requirement<'a, I>(chain: I) -> AccessRequirement
where
    I: IntoIterator<Item = &'a RouteRecord>,
{
    chain
        .into_iter()
        .map(RouteRecord::access)
        .max()
        .unwrap_or_default()
}

/// authorize
///
/// The navigation gate. Pure: it only reads the session snapshot it is given.
pub fn authorize(requirement: AccessRequirement, session: &SessionState) -> NavigationOutcome {
    match requirement {
        AccessRequirement::Public => NavigationOutcome::Proceed,
        _ if !session.is_authenticated() => NavigationOutcome::redirect(LOGIN_PATH),
        AccessRequirement::RequiresAuth => NavigationOutcome::Proceed,
        AccessRequirement::RequiresAuthAndAdmin if session.is_admin() => NavigationOutcome::Proceed,
        AccessRequirement::RequiresAuthAndAdmin => NavigationOutcome::redirect(DASHBOARD_PATH),
    }
}

/// Applies the gate to an already-resolved route.
pub fn check(route: &RouteMatch<'_>, session: &SessionState) -> NavigationOutcome {
    authorize(governing_requirement(route.chain.iter().copied()), session)
}

/// navigate
///
/// Runs one navigation attempt end to end: normalizes the location for the
/// configured URL mode, resolves it, applies static redirects and then the gate.
/// `NotFound` is returned as an error so the caller has to render it explicitly.
pub fn navigate(
    table: &RouteTable,
    location: &str,
    session: &SessionState,
    mode: HistoryMode,
) -> Result<NavigationDecision, NotFound> {
    let route = table.resolve(mode.route_path(location))?;

    let outcome = match route.leaf().redirect_to() {
        Some(to) => NavigationOutcome::redirect(to),
        None => check(&route, session),
    };

    match &outcome {
        NavigationOutcome::Proceed => {
            tracing::debug!(path = %route.path, pattern = route.pattern, "navigation allowed");
        }
        NavigationOutcome::Redirect { to } => {
            tracing::info!(path = %route.path, pattern = route.pattern, redirect = %to, "navigation redirected");
        }
    }

    Ok(NavigationDecision {
        view: route.view_id(),
        path: route.path,
        params: route.params,
        outcome,
    })
}
