//! Session endpoints
//!
//! The frontend reports the connector's identity here after the user
//! connects a wallet. When no local session exists, status falls back to
//! asking the signer service directly.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use coffer_core::Identity;

use crate::dto::{ApiError, ConnectRequest, SessionResponse};
use crate::AppState;

/// Create session routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
}

/// GET /session - Current connection status
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let config = state.config().await;
    let operator = Identity::new(config.operator);

    if let Some(session) = state.session().await {
        let is_operator = fund::is_operator(&session.identity, &operator);
        return Json(SessionResponse {
            connected: true,
            identity: Some(session.identity.to_string()),
            is_operator,
        });
    }

    // No local session: ask the signer what it knows
    let identity = match state.signer_client().await {
        Some(signer) => signer.current_identity().await.ok().flatten(),
        None => None,
    };

    let is_operator = identity
        .as_ref()
        .map(|id| fund::is_operator(id, &operator))
        .unwrap_or(false);

    Json(SessionResponse {
        connected: identity.is_some(),
        identity: identity.map(|id| id.to_string()),
        is_operator,
    })
}

/// POST /session/connect - Report a connected identity
pub async fn connect(
    State(state): State<AppState>,
    Json(request): Json<ConnectRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ApiError>)> {
    state.connect(request.identity).await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("invalid_identity", e.to_string())),
        )
    })?;

    Ok(get_session(State(state)).await)
}

/// POST /session/disconnect - Clear the session
pub async fn disconnect(State(state): State<AppState>) -> StatusCode {
    state.disconnect().await;
    StatusCode::NO_CONTENT
}
