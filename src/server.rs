use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::admin::{self, authorize};
use crate::api::market::MarketService;
use crate::api::types::{
    LoginRequest, LoginResponse, MessageResponse, NewsletterSubscribe, SchemeInput, SchemesQuery,
    SchemesResponse, SubscribeResponse, TeamResponse, TopCoinsQuery,
};
use crate::api::{newsletter, schemes, site};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::providers::CoinGeckoProvider;
use crate::store::{seed, DocumentStore, MemoryStore, Scheme, SchemeUpdate, SettingsUpdate, SiteSettings};
use crate::types::{GlobalStats, TopCoinsResponse, TrendingResponse};

pub struct AppState {
    pub market: MarketService<CoinGeckoProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub admin_password: String,
}

impl AppState {
    pub fn new(config: &GatewayConfig, store: Arc<dyn DocumentStore>) -> Result<Self, GatewayError> {
        let provider = CoinGeckoProvider::new(config.upstream.timeout())
            .map_err(|e| GatewayError::Config(format!("http client: {}", e)))?;

        Ok(Self {
            market: MarketService::from_config(provider, config),
            store,
            admin_password: config.admin.password.clone(),
        })
    }
}

type ApiResult<T> = Result<Json<T>, GatewayError>;

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Crypto Investment API" }))
}

pub async fn top_coins_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopCoinsQuery>,
) -> ApiResult<TopCoinsResponse> {
    Ok(Json(state.market.get_top_coins(query.limit).await?))
}

pub async fn trending_handler(State(state): State<Arc<AppState>>) -> ApiResult<TrendingResponse> {
    Ok(Json(state.market.get_trending().await?))
}

pub async fn global_handler(State(state): State<Arc<AppState>>) -> ApiResult<GlobalStats> {
    Ok(Json(state.market.get_global_stats().await?))
}

pub async fn list_schemes_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchemesQuery>,
) -> ApiResult<SchemesResponse> {
    Ok(Json(schemes::list_schemes(&*state.store, query.active_only).await?))
}

pub async fn settings_handler(State(state): State<Arc<AppState>>) -> ApiResult<SiteSettings> {
    Ok(Json(site::get_settings(&*state.store).await?))
}

pub async fn team_handler() -> Json<TeamResponse> {
    Json(site::get_team())
}

pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewsletterSubscribe>,
) -> ApiResult<SubscribeResponse> {
    Ok(Json(newsletter::subscribe(&*state.store, request).await?))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    Ok(Json(admin::login(&state.admin_password, &request)?))
}

pub async fn create_scheme_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<SchemeInput>,
) -> ApiResult<Scheme> {
    authorize(&state.admin_password, &headers)?;
    Ok(Json(schemes::create_scheme(&*state.store, input).await?))
}

pub async fn update_scheme_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(update): Json<SchemeUpdate>,
) -> ApiResult<Scheme> {
    authorize(&state.admin_password, &headers)?;
    Ok(Json(schemes::update_scheme(&*state.store, &id, update).await?))
}

pub async fn delete_scheme_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<MessageResponse> {
    authorize(&state.admin_password, &headers)?;
    Ok(Json(schemes::delete_scheme(&*state.store, &id).await?))
}

pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<SiteSettings> {
    authorize(&state.admin_password, &headers)?;
    Ok(Json(site::update_settings(&*state.store, update).await?))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o.trim() == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/api", get(root_handler))
        .route("/api/", get(root_handler))
        .route("/api/crypto/top-coins", get(top_coins_handler))
        .route("/api/crypto/trending", get(trending_handler))
        .route("/api/crypto/global", get(global_handler))
        .route("/api/schemes", get(list_schemes_handler))
        .route("/api/settings", get(settings_handler))
        .route("/api/team", get(team_handler))
        .route("/api/newsletter/subscribe", post(subscribe_handler))
        .route("/api/admin/login", post(login_handler))
        .route("/api/admin/schemes", post(create_scheme_handler))
        .route(
            "/api/admin/schemes/:id",
            put(update_scheme_handler).delete(delete_scheme_handler),
        )
        .route("/api/admin/settings", put(update_settings_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

pub async fn run_server(config: GatewayConfig) -> Result<(), GatewayError> {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    seed::seed_defaults(&*store).await?;

    let state = Arc::new(AppState::new(&config, store)?);
    let app = build_router(state, &config.server.cors_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, upstream = %config.upstream.base_url, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
