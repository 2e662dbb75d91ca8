use crate::access::{Identity, SessionCredentials};
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

pub const SIGN_IN_PATH: &str = "/sign-in";

/// Attach an `Identity` to every request. Missing or unverifiable
/// credentials make the request anonymous rather than rejecting it.
pub async fn annotate_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = match SessionCredentials::from_headers(req.headers()) {
        Some(credentials) => state.gate.verify(&credentials).await,
        None => Identity::Anonymous,
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Send anonymous visitors to the sign-in page
pub async fn require_identity(req: Request, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<Identity>()
        .is_some_and(Identity::is_authenticated);

    if !authenticated {
        debug!("Anonymous request to {}, redirecting", req.uri().path());
        return Redirect::temporary(SIGN_IN_PATH).into_response();
    }

    next.run(req).await
}
