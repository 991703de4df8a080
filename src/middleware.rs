// Authentication middleware - resolves bearer tokens into a request-scoped
// ViewerContext before any authenticated handler runs.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{app_state::AppState, error::AppError, viewer::ViewerContext};

/// Require a verified viewer on the request. Unknown or absent credentials
/// are rejected here, so the guarded handler never runs and no storage
/// write can occur for an unauthenticated caller.
pub async fn require_viewer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?
        .to_string();

    let principal = state.identity.verify(&token).await?.ok_or_else(|| {
        warn!("Rejected unknown bearer token");
        AppError::Unauthorized("Invalid bearer token".to_string())
    })?;

    request
        .extensions_mut()
        .insert(ViewerContext::new(principal.user_id, principal.username));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
