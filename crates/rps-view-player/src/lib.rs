//! RPS Player Service
//!
//! HTTP service a Web UI talks to: it serves the viewer's derived game
//! snapshot and forwards permitted actions to the ledger.

pub mod config;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use rps_view_core::{
    ActiveGame, Address, Choice, ClientError, GameClient, GameSnapshot, LedgerCall, MockLedger,
    TxHandle, MAX_PASSWORD_LEN,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Application error type
#[derive(Debug)]
pub struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let status = match &err {
            ClientError::Validation(_) => StatusCode::BAD_REQUEST,
            ClientError::NotPermitted { .. } => StatusCode::CONFLICT,
            ClientError::Record(_) | ClientError::Ledger(_) => StatusCode::BAD_GATEWAY,
        };
        if status == StatusCode::BAD_GATEWAY {
            warn!("ledger side failure: {}", err);
        }
        AppError(status, err.to_string())
    }
}

/// Player state
pub struct PlayerState {
    client: GameClient,
    /// Set when running against the mock ledger
    mock: Option<MockLedger>,
}

impl PlayerState {
    pub fn new(client: GameClient, mock: Option<MockLedger>) -> Self {
        Self { client, mock }
    }
}

// === Request/Response types ===

#[derive(Serialize)]
struct PlayerInfoResponse {
    viewer: Address,
}

#[derive(Deserialize)]
struct CreateGameRequest {
    opponent: Address,
}

#[derive(Deserialize)]
struct JoinGameRequest {
    game: Address,
}

#[derive(Deserialize)]
struct CommitRequest {
    #[serde(default)]
    choice: Option<Choice>,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct RevealRequest {
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct TxResponse {
    tx: TxHandle,
}

#[derive(Serialize)]
struct MockCallsResponse {
    calls: Vec<LedgerCall>,
}

/// Passwords are capped where they enter the system
fn check_password_len(password: &str) -> Result<(), AppError> {
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(AppError(
            StatusCode::BAD_REQUEST,
            format!("Password must be at most {} characters", MAX_PASSWORD_LEN),
        ));
    }
    Ok(())
}

// === Route handlers ===

async fn get_player_info(State(state): State<Arc<PlayerState>>) -> Json<PlayerInfoResponse> {
    Json(PlayerInfoResponse {
        viewer: *state.client.viewer(),
    })
}

async fn get_game(State(state): State<Arc<PlayerState>>) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(state.client.snapshot().await?))
}

async fn create_game(
    State(state): State<Arc<PlayerState>>,
    Json(req): Json<CreateGameRequest>,
) -> Result<Json<TxResponse>, AppError> {
    let tx = state.client.create_game(&req.opponent).await?;
    Ok(Json(TxResponse { tx }))
}

async fn join_game(
    State(state): State<Arc<PlayerState>>,
    Json(req): Json<JoinGameRequest>,
) -> Result<Json<TxResponse>, AppError> {
    let tx = state.client.join_game(&req.game).await?;
    Ok(Json(TxResponse { tx }))
}

async fn commit(
    State(state): State<Arc<PlayerState>>,
    Json(req): Json<CommitRequest>,
) -> Result<Json<TxResponse>, AppError> {
    check_password_len(&req.password)?;
    let tx = state.client.commit(req.choice, &req.password).await?;
    Ok(Json(TxResponse { tx }))
}

async fn reveal(
    State(state): State<Arc<PlayerState>>,
    Json(req): Json<RevealRequest>,
) -> Result<Json<TxResponse>, AppError> {
    check_password_len(&req.password)?;
    let tx = state.client.reveal(&req.password).await?;
    Ok(Json(TxResponse { tx }))
}

async fn claim_default_win(
    State(state): State<Arc<PlayerState>>,
) -> Result<Json<TxResponse>, AppError> {
    let tx = state.client.claim_default_win().await?;
    Ok(Json(TxResponse { tx }))
}

async fn leave_game(State(state): State<Arc<PlayerState>>) -> Result<Json<TxResponse>, AppError> {
    let tx = state.client.leave_game().await?;
    Ok(Json(TxResponse { tx }))
}

fn mock_ledger(state: &PlayerState) -> Result<&MockLedger, AppError> {
    state
        .mock
        .as_ref()
        .ok_or_else(|| AppError(StatusCode::NOT_FOUND, "Mock ledger not in use".to_string()))
}

async fn put_mock_game(
    State(state): State<Arc<PlayerState>>,
    Json(game): Json<Option<ActiveGame>>,
) -> Result<StatusCode, AppError> {
    let mock = mock_ledger(&state)?;
    let viewer = *state.client.viewer();
    match game {
        Some(game) => {
            info!("Mock ledger: installed game {} for {}", game.address, viewer);
            mock.set_active_game(viewer, game);
        }
        None => {
            info!("Mock ledger: cleared game for {}", viewer);
            mock.clear_active_game(&viewer);
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_mock_calls(
    State(state): State<Arc<PlayerState>>,
) -> Result<Json<MockCallsResponse>, AppError> {
    let mock = mock_ledger(&state)?;
    Ok(Json(MockCallsResponse {
        calls: mock.calls(),
    }))
}

pub fn create_router(state: Arc<PlayerState>) -> Router {
    let mut router = Router::new()
        .route("/api/player", get(get_player_info))
        .route("/api/game", get(get_game))
        .route("/api/game/create", post(create_game))
        .route("/api/game/join", post(join_game))
        .route("/api/game/commit", post(commit))
        .route("/api/game/reveal", post(reveal))
        .route("/api/game/claim", post(claim_default_win))
        .route("/api/game/leave", post(leave_game));

    if state.mock.is_some() {
        router = router
            .route("/api/mock/game", put(put_mock_game))
            .route("/api/mock/calls", get(get_mock_calls));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}
