//! Fund protocol endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use coffer_core::Identity;
use fund::{FundMetrics, InvestPreview, MintRemainingPreview};

use crate::dto::{
    ApiError, FundMetricsResponse, FundStateResponse, InvestPreviewRequest,
    InvestPreviewResponse, MintRemainingPreviewResponse,
};
use crate::AppState;

/// Create fund routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/metrics", get(get_metrics))
        .route("/invest/preview", post(invest_preview))
        .route("/mint-remaining/preview", get(mint_remaining_preview))
        .route("/investments", get(get_investments))
}

/// GET /fund/state - Fresh fund snapshot
pub async fn get_state(
    State(state): State<AppState>,
) -> Result<Json<FundStateResponse>, (StatusCode, Json<ApiError>)> {
    let snapshot = state.refresh_fund_snapshot().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("ledger_unavailable", "Ledger not configured")),
        )
    })?;

    Ok(Json(FundStateResponse::from(snapshot)))
}

/// GET /fund/metrics - Derived quantities from a fresh snapshot
pub async fn get_metrics(
    State(state): State<AppState>,
) -> Result<Json<FundMetricsResponse>, (StatusCode, Json<ApiError>)> {
    let snapshot = state.refresh_fund_snapshot().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("ledger_unavailable", "Ledger not configured")),
        )
    })?;

    let target = state.config().await.funding_target();
    Ok(Json(FundMetricsResponse::from(FundMetrics::derive(
        &snapshot, target,
    ))))
}

/// POST /fund/invest/preview - Expected issuance for an amount
pub async fn invest_preview(
    Json(request): Json<InvestPreviewRequest>,
) -> Result<Json<InvestPreviewResponse>, (StatusCode, Json<ApiError>)> {
    let amount = fund::validate::parse_amount(&request.amount).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(e.error_code(), e.to_string())),
        )
    })?;

    let preview = InvestPreview::for_amount(amount);
    Ok(Json(InvestPreviewResponse {
        amount: preview.amount.to_string(),
        tokens_received: preview.tokens_received.to_string(),
        tokens_received_display: coffer_core::units::format_units(preview.tokens_received),
    }))
}

/// GET /fund/mint-remaining/preview - Operator preview of the remaining
/// allocation toward the funding target
pub async fn mint_remaining_preview(
    State(state): State<AppState>,
) -> Result<Json<MintRemainingPreviewResponse>, (StatusCode, Json<ApiError>)> {
    require_operator(&state).await?;

    let snapshot = state.refresh_fund_snapshot().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("ledger_unavailable", "Ledger not configured")),
        )
    })?;

    let target = state.config().await.funding_target();
    let preview =
        MintRemainingPreview::from_contributed(snapshot.total_contributed.unwrap_or(0), target);

    Ok(Json(MintRemainingPreviewResponse::from(preview)))
}

/// GET /fund/investments - Recent investment events
pub async fn get_investments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ledger_client::InvestmentEvent>>, (StatusCode, Json<ApiError>)> {
    let client = state.ledger_client().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("ledger_unavailable", "Ledger not configured")),
        )
    })?;

    let events = client.recent_investments(20).await.map_err(|e| {
        (
            StatusCode::BAD_GATEWAY,
            Json(ApiError::new("ledger_error", e.to_string())),
        )
    })?;

    Ok(Json(events))
}

/// Refuse unless the connected identity passes the operator gate.
pub(crate) async fn require_operator(
    state: &AppState,
) -> Result<Identity, (StatusCode, Json<ApiError>)> {
    let session = state.session().await.ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiError::new("not_connected", "No identity connected")),
        )
    })?;

    let config = state.config().await;
    let operator = Identity::new(config.operator);
    if !fund::is_operator(&session.identity, &operator) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiError::new(
                "not_operator",
                "This action is only available to the fund operator",
            )),
        ));
    }

    Ok(session.identity)
}
