use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{
    categories::CategoryCatalog,
    suggest::{SearchLimits, suggest_playlists},
    youtube::CatalogSearch,
};

pub const CATEGORY_NOT_FOUND: &str = "Categoria não encontrada";
pub const CATEGORY_REQUIRED: &str = "Parâmetro 'categoria' é obrigatório";

#[derive(Debug, Clone)]
pub struct AppState {
    pub search: Arc<dyn CatalogSearch>,
    pub catalog: CategoryCatalog,
    pub limits: SearchLimits,
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    categoria: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn with_status(status: StatusCode, error: impl ToString) -> Response {
        (
            status,
            Json(Self {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/categorias", get(list_categories))
        .route("/sugerir_playlists", get(suggest))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the API until `ct` is cancelled
///
/// # Errors
/// Errors if the address cannot be bound or the server fails while running
pub async fn serve(addr: SocketAddr, state: AppState, ct: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Launching HTTP server on {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .with_context(|| format!("Running HTTP server on {addr}"))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Backend funcionando!",
    })
}

async fn list_categories(State(state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(state.catalog.names())
}

// Unknown categories answer 200 with an error body; existing frontends key on the `error` field
async fn suggest(
    State(state): State<AppState>,
    query: Result<Query<SuggestQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => {
            return ErrorResponse::with_status(rejection.status(), rejection.body_text());
        }
    };
    let Some(name) = query.categoria else {
        return ErrorResponse::with_status(StatusCode::UNPROCESSABLE_ENTITY, CATEGORY_REQUIRED);
    };
    let Some(category) = state.catalog.get(&name) else {
        return ErrorResponse::with_status(StatusCode::OK, CATEGORY_NOT_FOUND);
    };

    match suggest_playlists(state.search.as_ref(), category.seed_channels, state.limits).await {
        Ok(playlists) => Json(playlists).into_response(),
        Err(e) => {
            error!("Unable to suggest playlists for {name}: {e}");
            ErrorResponse::with_status(StatusCode::BAD_GATEWAY, e)
        }
    }
}
