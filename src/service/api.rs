use crate::{
    application::app::Application,
    domain::models::{Action, Bounty, Channel, ChannelBounties},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

pub async fn start_server(
    shutdown: broadcast::Sender<()>,
    app: Arc<impl Application + Send + Sync + 'static>,
    listen_port: u16,
) -> anyhow::Result<()> {
    let router = Router::new()
        .route("/bounties", get(get_bounties))
        .route("/bounties/:action_id", get(get_bounty))
        .route("/countries", get(get_countries))
        .route("/channels", get(get_channels))
        .route("/channels/:id", get(get_channel))
        .route("/actions", get(get_actions))
        .with_state(app)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", listen_port)).await?;

    let server = axum::serve(listener, router);

    tracing::info!("API server started on port {}", listen_port);

    let mut shutdown_rx = shutdown.subscribe();

    tokio::select! {
        _ = shutdown_rx.recv() => {
            tracing::warn!("API server received shutdown signal");
        }
        _ = server => {
            tracing::warn!("API server stopped unexpectedly");
        }
    }

    Ok(())
}

#[derive(Deserialize)]
struct BountyQuery {
    country: Option<String>,
}

async fn get_bounties(
    State(app): State<Arc<impl Application>>,
    Query(params): Query<BountyQuery>,
) -> Result<Json<Vec<ChannelBounties>>, StatusCode> {
    app.get_channel_bounties(params.country)
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn get_bounty(
    State(app): State<Arc<impl Application>>,
    Path(action_id): Path<String>,
) -> Result<Json<Bounty>, StatusCode> {
    app.get_bounty(action_id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::NOT_FOUND)
}

async fn get_countries(
    State(app): State<Arc<impl Application>>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let mut rx = app.get_country_list();

    rx.recv()
        .await
        .map(Json)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn get_channels(
    State(app): State<Arc<impl Application>>,
) -> Result<Json<Vec<Channel>>, StatusCode> {
    app.get_channels()
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn get_channel(
    State(app): State<Arc<impl Application>>,
    Path(id): Path<i64>,
) -> Result<Json<Channel>, StatusCode> {
    app.get_channel(id)
        .await
        .map(Json)
        .map_err(|_| StatusCode::NOT_FOUND)
}

async fn get_actions(
    State(app): State<Arc<impl Application>>,
) -> Result<Json<Vec<Action>>, StatusCode> {
    app.get_bounty_actions()
        .await
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
