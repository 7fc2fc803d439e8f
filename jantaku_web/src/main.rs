mod config;
mod rooms;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use config::ServerConfig;
use jantaku_core::{
    score as calc_score, GameConfig, GameError, GameEvent, RequestError, ScoreReport,
    ScoreRequest, Snapshot,
};
use rooms::{CreatedRoom, Lobby, RoomError, Rooms};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HOST_TOKEN_HEADER: &str = "x-host-token";

struct AppState {
    rooms: Rooms,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jantaku_web=info,jantaku_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState {
        rooms: Rooms::new(config.room_capacity),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/score", post(score))
        .route("/api/rooms", post(create_room))
        .route("/api/rooms/:code", get(lobby).delete(close_room))
        .route("/api/rooms/:code/join", post(join_room))
        .route("/api/rooms/:code/start", post(start_game))
        .route("/api/rooms/:code/events", post(apply_event))
        .route("/api/rooms/:code/state", get(room_state))
        .route("/api/rooms/:code/ws", get(room_ws))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let rooms = state.rooms.room_count().await;
    Json(serde_json::json!({ "status": "ok", "rooms": rooms }))
}

async fn score(Json(req): Json<ScoreRequest>) -> Result<Json<ScoreReport>, ApiError> {
    let report = calc_score(&req)?;
    Ok(Json(report))
}

#[derive(Deserialize)]
struct CreateRoom {
    host_name: String,
    #[serde(default)]
    config: GameConfig,
}

async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoom>,
) -> (StatusCode, Json<CreatedRoom>) {
    let created = state.rooms.create(req.host_name, req.config).await;
    (StatusCode::CREATED, Json(created))
}

#[derive(Deserialize)]
struct JoinRoom {
    name: String,
}

async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<JoinRoom>,
) -> Result<Json<Lobby>, ApiError> {
    Ok(Json(state.rooms.join(&code, req.name).await?))
}

async fn lobby(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Lobby>, ApiError> {
    Ok(Json(state.rooms.lobby(&code).await?))
}

async fn start_game(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Snapshot>, ApiError> {
    let token = host_token(&headers)?;
    Ok(Json(state.rooms.start(&code, token).await?))
}

async fn close_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = host_token(&headers)?;
    state.rooms.close(&code, token).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_event(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    headers: HeaderMap,
    Json(event): Json<GameEvent>,
) -> Result<Json<Snapshot>, ApiError> {
    let token = host_token(&headers)?;
    Ok(Json(state.rooms.apply(&code, token, &event).await?))
}

async fn room_state(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(state.rooms.snapshot(&code).await?))
}

async fn room_ws(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let (current, rx) = state.rooms.subscribe(&code).await?;
    let first = current
        .to_json()
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(ws.on_upgrade(move |socket| stream_snapshots(socket, code, first, rx)))
}

/// Pushes every snapshot to one guest socket. Lagging only skips stale
/// snapshots, since each one replaces the last.
async fn stream_snapshots(
    mut socket: WebSocket,
    code: String,
    first: String,
    mut rx: broadcast::Receiver<String>,
) {
    if socket.send(Message::Text(first)).await.is_err() {
        return;
    }
    loop {
        match rx.recv().await {
            Ok(json) => {
                if socket.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(%code, skipped, "guest socket lagging");
            }
            Err(RecvError::Closed) => break,
        }
    }
    tracing::debug!(%code, "guest socket closed");
}

fn host_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(HOST_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError(StatusCode::FORBIDDEN, "missing host token".into()))
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.1 }));
        (self.0, body).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        ApiError(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl From<RoomError> for ApiError {
    fn from(e: RoomError) -> Self {
        let status = match &e {
            RoomError::NotFound(_) => StatusCode::NOT_FOUND,
            RoomError::Forbidden => StatusCode::FORBIDDEN,
            RoomError::Game(
                GameError::NotStarted | GameError::AlreadyStarted | GameError::Finished,
            ) => StatusCode::CONFLICT,
            RoomError::Game(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError(status, e.to_string())
    }
}
