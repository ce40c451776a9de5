//! 画像・車両APIサーバ
//!
//! - `GET /api/images?folder=…|name=…`
//! - `GET /api/images/folders`
//! - `GET /api/vehicles`, `/api/vehicles/featured`, `/api/vehicles/{id}`, `/api/vehicles/{id}/images`
//! - `GET /api/debug/media`

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::catalog::{Catalog, VehicleFilter, DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE_LIMIT};
use crate::config::Config;
use crate::error::{MediaError, Result};
use crate::resolver::{ImageLookup, ImageRoot};
use crate::scanner;

pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Arc<Self> {
        Arc::new(Self { config, catalog })
    }

    pub fn image_root(&self) -> ImageRoot<'_> {
        ImageRoot::new(&self.config.images_root, &self.config.url_prefix)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ImagesQuery {
    pub folder: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VehiclesQuery {
    pub brand: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// ファイルシステムを触る処理はブロッキングスレッドで実行
async fn run_blocking<T, F>(state: Arc<AppState>, f: F) -> Result<T>
where
    F: FnOnce(ImageRoot<'_>, &Catalog) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(state.image_root(), &state.catalog))
        .await
        .map_err(|e| MediaError::Server(e.to_string()))?
}

pub async fn images_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImagesQuery>,
) -> Response {
    let folder = query.folder.unwrap_or_default();
    let name = query.name.unwrap_or_default();

    let result = run_blocking(state, move |root, _| {
        if !folder.is_empty() {
            root.lookup_folder(&folder)
        } else if !name.is_empty() {
            Ok(root.lookup_by_name(&name))
        } else {
            Ok(ImageLookup::empty())
        }
    })
    .await;

    match result {
        Ok(lookup) => Json(lookup).into_response(),
        Err(MediaError::PathTraversal(folder)) => {
            warn!("不正なフォルダ指定: {}", folder);
            (StatusCode::BAD_REQUEST, Json(json!({ "images": [] }))).into_response()
        }
        Err(e) => {
            error!("画像一覧の取得に失敗: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "images": [] }))).into_response()
        }
    }
}

pub async fn folders_handler(State(state): State<Arc<AppState>>) -> Response {
    let result = run_blocking(state, |root, _| {
        scanner::folder_infos(root.root, root.url_prefix)
    })
    .await;

    match result {
        Ok(folders) => Json(json!({ "folders": folders })).into_response(),
        Err(e) => {
            error!("フォルダ一覧の取得に失敗: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "folders": [] }))).into_response()
        }
    }
}

pub async fn vehicles_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VehiclesQuery>,
) -> Response {
    let filter = VehicleFilter {
        brand: query.brand,
        search: query.search,
    };
    let page = state.catalog.page(
        &filter,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    );
    Json(page).into_response()
}

pub async fn featured_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> Response {
    let data = state
        .catalog
        .featured(query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT));
    Json(json!({ "data": data })).into_response()
}

pub async fn vehicle_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let vehicle = state
        .catalog
        .get(&id)
        .ok_or(MediaError::VehicleNotFound(id))?;
    Ok(Json(vehicle).into_response())
}

pub async fn vehicle_images_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let lookup = run_blocking(state, move |root, catalog| {
        let vehicle = catalog
            .get(&id)
            .ok_or_else(|| MediaError::VehicleNotFound(id.clone()))?;
        Ok(root.lookup_vehicle(vehicle))
    })
    .await?;
    Ok(Json(lookup).into_response())
}

pub async fn media_debug_handler(State(state): State<Arc<AppState>>) -> Result<Response> {
    let report = run_blocking(state, |root, catalog| Ok(root.diagnose(catalog))).await?;
    Ok(Json(report).into_response())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/images", get(images_handler))
        .route("/api/images/folders", get(folders_handler))
        .route("/api/vehicles", get(vehicles_handler))
        .route("/api/vehicles/featured", get(featured_handler))
        .route("/api/vehicles/{id}", get(vehicle_handler))
        .route("/api/vehicles/{id}/images", get(vehicle_images_handler))
        .route("/api/debug/media", get(media_debug_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(state: Arc<AppState>) -> Result<()> {
    let address = format!("0.0.0.0:{}", state.config.port);
    info!(
        "画像ルート: {} / 車両: {}台",
        state.config.images_root.display(),
        state.catalog.len()
    );

    let app = build_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Ctrl+Cハンドラの登録に失敗: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("シグナルハンドラの登録に失敗: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
