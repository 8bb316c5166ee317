//! HTTP routes.
//!
//! Every game route is served twice: at the root for the default table and
//! under `/tables/{table}` for named tables. Handlers never see the
//! difference; the [`SelectedTable`] and [`OpenedTable`] extractors resolve
//! it.

use crate::client;
use crate::error::RegistryError;
use crate::registry::Registry;
use crate::socket::ws_handler;
use crate::table::Table;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRef, FromRequestParts, Query, RawPathParams, State};
use axum::http::request::Parts;
use axum::http::{Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, body::Body};
use parlor_tictactoe::{Board, GameResult, Mark, RawMove, Snapshot, Turn};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// An already open table, for read-only requests.
///
/// Unknown ids are `404` with body `false`; reading never opens a table.
#[derive(Debug, Clone)]
pub struct SelectedTable(pub Arc<Table>);

/// The table a move, reset, new game or push subscription addresses,
/// opened on first use.
#[derive(Debug, Clone)]
pub struct OpenedTable(pub Arc<Table>);

impl<S> FromRequestParts<S> for SelectedTable
where
    Registry: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Registry::from_ref(state);
        let table = match table_param(parts, state).await? {
            None => Ok(registry.default_table()),
            Some(id) => registry.lookup(&id),
        };
        table.map(Self).map_err(|e| registry_error_response(&e))
    }
}

impl<S> FromRequestParts<S> for OpenedTable
where
    Registry: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = Registry::from_ref(state);
        let table = match table_param(parts, state).await? {
            None => Ok(registry.default_table()),
            Some(id) => registry.get_or_create(&id),
        };
        table.map(Self).map_err(|e| registry_error_response(&e))
    }
}

/// The `{table}` path segment, absent on the unprefixed routes.
async fn table_param<S>(parts: &mut Parts, state: &S) -> Result<Option<String>, Response>
where
    S: Send + Sync,
{
    let params = RawPathParams::from_request_parts(parts, state)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(params
        .iter()
        .find(|(key, _)| *key == "table")
        .map(|(_, id)| id.to_string()))
}

fn registry_error_response(err: &RegistryError) -> Response {
    debug!(error = %err, "Table unavailable");
    let status = match err {
        RegistryError::InvalidId(_) => StatusCode::BAD_REQUEST,
        RegistryError::Unknown(_) | RegistryError::Full { .. } => StatusCode::NOT_FOUND,
    };
    (status, Json(false)).into_response()
}

/// Routes acting on one table.
fn game_routes() -> Router<Registry> {
    Router::new()
        .route("/board", get(get_board))
        .route("/turn", get(get_turn))
        .route("/status", get(get_status))
        .route("/state", get(get_state))
        .route("/move", get(get_move).post(post_move))
        .route("/reset", get(reset))
        .route("/newgame", get(new_game))
        .route("/playerx", get(player_x_page))
        .route("/playero", get(player_o_page))
        .route("/ws", get(ws_handler))
}

/// Builds the application router.
#[instrument(skip(registry))]
pub fn router(registry: Registry) -> Router {
    info!("Building router");
    Router::new()
        .route("/", get(index_page))
        .route("/healthz", get(health))
        .route("/tables", get(list_tables))
        .merge(game_routes())
        .nest("/tables/{table}", game_routes())
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request<Body>| {
                    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .map_response(|res: Response| {
                    debug!(status = ?res.status(), "Response sent");
                    res
                }),
        )
        .with_state(registry)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_tables(State(registry): State<Registry>) -> Json<Vec<String>> {
    Json(registry.list())
}

async fn get_board(SelectedTable(table): SelectedTable) -> Json<Board> {
    Json(table.board())
}

async fn get_turn(SelectedTable(table): SelectedTable) -> Json<Turn> {
    Json(table.turn())
}

async fn get_status(SelectedTable(table): SelectedTable) -> Json<GameResult> {
    Json(table.result())
}

async fn get_state(SelectedTable(table): SelectedTable) -> Json<Snapshot> {
    Json(table.snapshot())
}

/// `GET /move?row=&col=&player=`; malformed queries are rejected moves.
async fn get_move(
    OpenedTable(table): OpenedTable,
    query: Result<Query<RawMove>, QueryRejection>,
) -> Json<bool> {
    let accepted = match query {
        Ok(Query(raw)) => table.submit_raw(raw),
        Err(e) => {
            debug!(error = %e, "Unreadable move query");
            false
        }
    };
    Json(accepted)
}

/// `POST /move` with a JSON body; malformed bodies are rejected moves.
async fn post_move(
    OpenedTable(table): OpenedTable,
    body: Result<Json<RawMove>, JsonRejection>,
) -> Json<bool> {
    let accepted = match body {
        Ok(Json(raw)) => table.submit_raw(raw),
        Err(e) => {
            debug!(error = %e, "Unreadable move body");
            false
        }
    };
    Json(accepted)
}

async fn reset(OpenedTable(table): OpenedTable) -> Json<bool> {
    Json(table.reset())
}

async fn new_game(OpenedTable(table): OpenedTable) -> Json<bool> {
    Json(table.new_game())
}

async fn player_x_page() -> Html<String> {
    client::player_page(Mark::X)
}

async fn player_o_page() -> Html<String> {
    client::player_page(Mark::O)
}

async fn index_page() -> Html<&'static str> {
    client::index_page()
}
