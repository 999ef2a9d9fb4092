//! HTTP request handlers
//!
//! Thin adapters from JSON requests onto `PlaybackGate` operations. Every
//! transport response reports the state after the command was relayed, so a
//! suppressed play shows up as `"state": "paused"` with `"can_play": false`.
//!
//! `can_play` and `active_reasons` in a response always come from one read of
//! the block set, so they agree even while other requests block or release.

use crate::api::AppContext;
use crate::error::{Error, Result};
use crate::playback::BlockReason;
use axum::{extract::State, Json};
use cuegate_common::events::PlaybackState;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RootResponse {
    message: String,
    module: String,
    version: String,
    status: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
    /// RFC 3339, UTC
    timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    state: PlaybackState,
    current_time: f64,
    current_row: u64,
    can_play: bool,
    active_reasons: Vec<BlockReason>,
}

#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    can_play: bool,
    active_reasons: Vec<BlockReason>,
}

#[derive(Debug, Deserialize)]
pub struct TimeRequest {
    current_time: f64,
}

#[derive(Debug, Deserialize)]
pub struct RowRequest {
    current_row: u64,
}

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    /// Omit for an untracked pause
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseRequest {
    reason: String,
}

fn state_response(ctx: &AppContext) -> Json<StateResponse> {
    let transport = ctx.gate.engine().snapshot();
    let active_reasons = ctx.gate.active_reasons();
    Json(StateResponse {
        state: transport.state,
        current_time: transport.current_time,
        current_row: transport.current_row,
        can_play: active_reasons.is_empty(),
        active_reasons,
    })
}

fn permission_response(ctx: &AppContext) -> Json<PermissionResponse> {
    let active_reasons = ctx.gate.active_reasons();
    Json(PermissionResponse {
        can_play: active_reasons.is_empty(),
        active_reasons,
    })
}

fn parse_reason(raw: String) -> Result<BlockReason> {
    if raw.trim().is_empty() {
        return Err(Error::BadRequest("reason must not be empty".to_string()));
    }
    Ok(BlockReason::from(raw))
}

// ============================================================================
// Service Endpoints
// ============================================================================

/// GET / - Service banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "CueGate playback gate".to_string(),
        module: "cuegate-pg".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
    })
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "cuegate-pg".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: cuegate_common::time::now().to_rfc3339(),
    })
}

// ============================================================================
// Transport Endpoints
// ============================================================================

/// GET /playback/state - Transport state and play permission
pub async fn get_state(State(ctx): State<AppContext>) -> Json<StateResponse> {
    state_response(&ctx)
}

/// POST /playback/play - Play if no block reason is held
pub async fn play(State(ctx): State<AppContext>) -> Json<StateResponse> {
    info!("Play request received");
    ctx.gate.play();
    state_response(&ctx)
}

/// POST /playback/pause - Pause unconditionally
pub async fn pause(State(ctx): State<AppContext>) -> Json<StateResponse> {
    info!("Pause request received");
    ctx.gate.pause();
    state_response(&ctx)
}

/// POST /playback/time - Write the transport time
pub async fn set_time(
    State(ctx): State<AppContext>,
    Json(req): Json<TimeRequest>,
) -> Result<Json<StateResponse>> {
    if !req.current_time.is_finite() || req.current_time < 0.0 {
        return Err(Error::BadRequest(format!(
            "current_time must be a non-negative number, got {}",
            req.current_time
        )));
    }

    ctx.gate.set_current_time(req.current_time);
    Ok(state_response(&ctx))
}

/// POST /playback/row - Write the transport row
pub async fn set_row(
    State(ctx): State<AppContext>,
    Json(req): Json<RowRequest>,
) -> Json<StateResponse> {
    ctx.gate.set_current_row(req.current_row);
    state_response(&ctx)
}

// ============================================================================
// Block Endpoints
// ============================================================================

/// POST /playback/block - Hold a block reason (or pause untracked)
pub async fn block(
    State(ctx): State<AppContext>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<PermissionResponse>> {
    let reason = req.reason.map(parse_reason).transpose()?;
    ctx.gate.block_playback(reason);
    Ok(permission_response(&ctx))
}

/// POST /playback/release - Release a block reason
pub async fn release(
    State(ctx): State<AppContext>,
    Json(req): Json<ReleaseRequest>,
) -> Result<Json<PermissionResponse>> {
    let reason = parse_reason(req.reason)?;
    ctx.gate.release_playback(&reason);
    Ok(permission_response(&ctx))
}
