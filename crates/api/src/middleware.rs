use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};

use chrono::Utc;
use tracing::Instrument;

use stockwatch_core::SessionId;

use crate::app::sessions::SessionStore;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "stockwatch_session";

#[derive(Clone)]
pub struct SessionState {
    pub store: Arc<SessionStore>,
}

/// Attach a [`SessionContext`](crate::context::SessionContext) to the request.
///
/// The handler runs inside a `session` span. Afterwards the session is
/// committed to the store, and a cookie is issued only for a freshly minted
/// id that the store kept.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: Request,
    next: Next,
) -> Response {
    let presented = extract_session_id(req.headers());
    let (ctx, issued) = state.store.resolve(presented, Utc::now());
    let session_id = ctx.session_id();

    req.extensions_mut().insert(ctx.clone());
    let mut res = next
        .run(req)
        .instrument(tracing::info_span!("session", session = %session_id))
        .await;

    let stored = state.store.commit(&ctx, Utc::now());
    if issued && stored {
        match session_cookie(session_id) {
            Ok(value) => {
                res.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(session = %session_id, "failed to encode session cookie: {e}"),
        }
    }

    res
}

fn session_cookie(session_id: SessionId) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

fn extract_session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}
