// HTTP handlers - translate requests into board operations.
//
// Bodies are read as raw bytes and picked apart here, so a malformed payload
// becomes the board's own "invalid" error instead of a framework rejection.

use super::api_error::ApiError;
use super::identity::client_identity;
use crate::config::BoardKind;
use crate::core::board::{BoardError, SuggestionBoard};
use crate::core::voting::{ItemSummary, VoteStats};
use crate::infra::moderation::InMemoryBanStore;
use crate::infra::voting::InMemoryItemStore;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub type Board = SuggestionBoard<InMemoryBanStore, InMemoryItemStore>;

/// Shared across every handler.
pub struct AppState {
    pub board: Arc<Board>,
    pub kind: BoardKind,
}

impl AppState {
    fn fail(&self, err: BoardError) -> ApiError {
        ApiError::from_board(err, self.kind)
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Vote target for this row. Differs from the row's position when the
    /// list is sorted.
    pub idx: usize,
    pub text: String,
    pub agree: u8,
    pub disagree: u8,
    pub agree_count: u64,
    pub disagree_count: u64,
    pub pass_count: u64,
    pub total: u64,
}

impl From<ItemSummary> for ItemResponse {
    fn from(item: ItemSummary) -> Self {
        Self {
            idx: item.index,
            text: item.text,
            agree: item.stats.agree_pct,
            disagree: item.stats.disagree_pct,
            agree_count: item.stats.agree_count,
            disagree_count: item.stats.disagree_count,
            pass_count: item.stats.pass_count,
            total: item.stats.total,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub agree: u8,
    pub disagree: u8,
    pub agree_count: u64,
    pub disagree_count: u64,
    pub pass_count: u64,
    pub total: u64,
}

impl From<VoteStats> for VoteResponse {
    fn from(stats: VoteStats) -> Self {
        Self {
            success: true,
            agree: stats.agree_pct,
            disagree: stats.disagree_pct,
            agree_count: stats.agree_count,
            disagree_count: stats.disagree_count,
            pass_count: stats.pass_count,
            total: stats.total,
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn router(state: Arc<AppState>, admin_reset_enabled: bool) -> Router {
    let kind = state.kind;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let mut app = Router::new()
        .route(kind.items_path(), get(list_handler).post(submit_handler))
        .route(kind.vote_path(), post(vote_handler))
        .route(kind.reset_personal_path(), post(reset_personal_handler));

    if admin_reset_enabled {
        app = app.route(kind.reset_all_path(), post(reset_all_handler));
    }

    app.layer(cors).with_state(state)
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.board.list().await.map_err(|e| state.fail(e))?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let identity = client_identity(&headers, peer);
    let payload = parse_body(&body);
    let text = payload.get("text").and_then(Value::as_str);

    state
        .board
        .submit(&identity, text)
        .await
        .map_err(|e| state.fail(e))?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn vote_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<VoteResponse>, ApiError> {
    let identity = client_identity(&headers, peer);
    let payload = parse_body(&body);

    let index = payload.get("idx").and_then(integer_index);
    let vote = payload.get("type").and_then(Value::as_str);
    let (index, vote) = match (index, vote) {
        (Some(index), Some(vote)) => (index, vote),
        _ => return Err(ApiError::InvalidVote),
    };

    let stats = state
        .board
        .vote(&identity, index, vote)
        .await
        .map_err(|e| state.fail(e))?;

    Ok(Json(VoteResponse::from(stats)))
}

pub async fn reset_personal_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, ApiError> {
    let identity = client_identity(&headers, peer);

    state
        .board
        .reset_personal(&identity)
        .await
        .map_err(|e| state.fail(e))?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn reset_all_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.board.reset_all().await.map_err(|e| state.fail(e))?;
    Ok(Json(SuccessResponse::ok()))
}

/// Body as JSON, or `Null` when it isn't JSON at all.
fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// A JSON number with no fractional part. `1.0` counts, `1.5` and `"1"` don't.
fn integer_index(value: &Value) -> Option<i64> {
    if let Some(index) = value.as_i64() {
        return Some(index);
    }

    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
        .map(|f| f as i64)
}
