//! Operation submission and lifecycle endpoints
//!
//! Each mutating intent is validated, gated, signed, and then tracked until
//! the ledger reports a terminal state. Validation or signing failures are
//! returned immediately and never create a pending operation.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use coffer_core::SubmitError;
use fund::LedgerCall;

use crate::dto::{ApiError, InvestRequest, MintRequest, SubmitResponse, WithdrawRequest};
use crate::op_watcher::{self, OpKind, OpResolution, PendingOpInfo};
use crate::routes::fund::require_operator;
use crate::AppState;

type OpError = (StatusCode, Json<ApiError>);

/// Create operation routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invest", post(invest))
        .route("/withdraw", post(withdraw))
        .route("/mint", post(mint))
        .route("/pending", get(pending))
        .route("/resolved", get(resolved))
}

/// POST /ops/invest - Deposit coins into the fund
pub async fn invest(
    State(state): State<AppState>,
    Json(request): Json<InvestRequest>,
) -> Result<Json<SubmitResponse>, OpError> {
    let call = fund::parse_invest(&request.amount).map_err(validation_error)?;
    require_session(&state).await?;
    submit(&state, OpKind::Invest, call).await
}

/// POST /ops/withdraw - Operator-only treasury withdrawal
pub async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<SubmitResponse>, OpError> {
    let call = fund::parse_withdraw(&request.amount).map_err(validation_error)?;
    require_operator(&state).await?;
    submit(&state, OpKind::Withdraw, call).await
}

/// POST /ops/mint - Operator-only manual token issuance
pub async fn mint(
    State(state): State<AppState>,
    Json(request): Json<MintRequest>,
) -> Result<Json<SubmitResponse>, OpError> {
    let call = fund::parse_mint_manual(&request.recipient, &request.amount, &request.reason)
        .map_err(validation_error)?;
    require_operator(&state).await?;
    submit(&state, OpKind::MintManual, call).await
}

/// GET /ops/pending - Operations awaiting confirmation
pub async fn pending(State(state): State<AppState>) -> Json<Vec<PendingOpInfo>> {
    Json(op_watcher::pending_ops(&state).await)
}

/// GET /ops/resolved - Terminal outcomes, delivered once
pub async fn resolved(State(state): State<AppState>) -> Json<Vec<OpResolution>> {
    Json(op_watcher::take_resolutions(&state).await)
}

/// Shared submission path: refuse duplicates, sign, track.
async fn submit(
    state: &AppState,
    kind: OpKind,
    call: LedgerCall,
) -> Result<Json<SubmitResponse>, OpError> {
    // The server-side analogue of the disabled button: a second submission
    // of the same kind is refused until the first resolves.
    if op_watcher::is_pending(state, kind).await {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiError::new(
                "operation_pending",
                format!("A {} operation is already pending", kind),
            )),
        ));
    }

    let signer = state.signer_client().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("signer_unavailable", "Signer not configured")),
        )
    })?;

    let call_json = serde_json::to_value(&call)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::internal(e.to_string()))))?;

    let tx_id = signer
        .sign_and_submit(&call_json)
        .await
        .map_err(submit_error)?;

    let description = call.describe();
    tracing::info!("Submitted {} ({})", description, tx_id);

    let op_id = op_watcher::track_op(state, kind, tx_id.clone(), description)
        .await
        .map_err(|e| {
            (
                StatusCode::CONFLICT,
                Json(ApiError::new("operation_pending", e.to_string())),
            )
        })?;

    Ok(Json(SubmitResponse {
        op_id,
        tx_id: tx_id.to_string(),
    }))
}

async fn require_session(state: &AppState) -> Result<(), OpError> {
    if state.session().await.is_none() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiError::new("not_connected", "No identity connected")),
        ));
    }
    Ok(())
}

fn validation_error(e: fund::ValidationError) -> OpError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

fn submit_error(e: SubmitError) -> OpError {
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_GATEWAY),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}
