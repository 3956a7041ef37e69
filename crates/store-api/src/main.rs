//! 스토어 API 서버 진입점.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::postgres::PgPoolOptions;
use store_api::{
    create_router, metrics_layer,
    repository::{MemoryProductStore, MemoryUserStore, PgProductRepository, PgUserRepository},
    setup_metrics_recorder, AppState,
};
use store_core::{init_logging, AppConfig, LogConfig, ServerConfig};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

/// CORS 레이어 생성.
///
/// `server.cors_origins`가 비어 있으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("No valid CORS origins configured, allowing any origin (development mode)");
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

/// 전체 애플리케이션 라우터 생성.
fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    config: &ServerConfig,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_router(state))
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(cors_layer(config))
}

/// 설정에 따라 저장소를 선택하고 AppState를 구성합니다.
async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let Some(url) = config.database.url.as_deref() else {
        warn!("database.url not set, using in-memory stores (data is lost on restart)");
        let state = AppState::new(
            &config.auth,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryProductStore::new()),
        )?;
        return Ok(state);
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .connect(url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;
    info!("Connected to PostgreSQL, migrations applied");

    let state = AppState::new(
        &config.auth,
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgProductRepository::new(pool.clone())),
    )?;
    Ok(state.with_db_pool(pool))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("failed to load configuration")?;

    init_logging(LogConfig::from(&config.logging)).map_err(|e| anyhow::anyhow!(e))?;
    info!("Starting store API server...");

    let metrics_handle =
        setup_metrics_recorder().context("failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");

    let state = Arc::new(build_state(&config).await?);
    let app = create_app(state, metrics_handle, &config.server);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, "API server listening");
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
