use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use linkdisplay::bootstrap::app_context::{AppContext, AppServices};
use linkdisplay::bootstrap::config::Config;
use linkdisplay::infrastructure::db::repositories::category_repository_sqlx::SqlxCategoryRepository;
use linkdisplay::infrastructure::db::repositories::error_log_repository_sqlx::SqlxErrorLogRepository;
use linkdisplay::infrastructure::db::repositories::link_repository_sqlx::SqlxLinkRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            linkdisplay::presentation::http::categories::list_categories,
            linkdisplay::presentation::http::categories::get_category,
            linkdisplay::presentation::http::categories::create_category,
            linkdisplay::presentation::http::categories::update_category,
            linkdisplay::presentation::http::categories::delete_category,
            linkdisplay::presentation::http::categories::category_stats,
            linkdisplay::presentation::http::links::list_links,
            linkdisplay::presentation::http::links::get_link,
            linkdisplay::presentation::http::links::create_link,
            linkdisplay::presentation::http::links::update_link,
            linkdisplay::presentation::http::links::delete_link,
            linkdisplay::presentation::http::links::toggle_pin,
            linkdisplay::presentation::http::links::search_links,
            linkdisplay::presentation::http::links::pinned_links,
            linkdisplay::presentation::http::links::link_stats,
            linkdisplay::presentation::http::errors::list_errors,
            linkdisplay::presentation::http::errors::get_error,
            linkdisplay::presentation::http::errors::error_statistics,
            linkdisplay::presentation::http::errors::cleanup_errors,
            linkdisplay::presentation::http::health::health,
            linkdisplay::presentation::http::health::ping,
        ),
        components(schemas(
            linkdisplay::presentation::http::categories::CategoryItem,
            linkdisplay::presentation::http::categories::CreateCategoryRequest,
            linkdisplay::presentation::http::categories::UpdateCategoryRequest,
            linkdisplay::presentation::http::categories::CategoryStatsResponse,
            linkdisplay::presentation::http::categories::CategoryLinksCount,
            linkdisplay::presentation::http::links::LinkItem,
            linkdisplay::presentation::http::links::CreateLinkRequest,
            linkdisplay::presentation::http::links::UpdateLinkRequest,
            linkdisplay::presentation::http::links::TogglePinRequest,
            linkdisplay::presentation::http::links::LinkStatsResponse,
            linkdisplay::presentation::http::links::PerCategoryCount,
            linkdisplay::presentation::http::errors::ErrorLogItem,
            linkdisplay::presentation::http::errors::ErrorLogListResponse,
            linkdisplay::presentation::http::errors::ErrorStatsResponse,
            linkdisplay::presentation::http::errors::StatusCodeCount,
            linkdisplay::presentation::http::errors::MethodCount,
            linkdisplay::presentation::http::errors::EndpointCount,
            linkdisplay::presentation::http::health::HealthResp,
            linkdisplay::presentation::http::health::PingResp,
        )),
        tags(
            (name = "Categories", description = "Category management"),
            (name = "Links", description = "Bookmark management"),
            (name = "Errors", description = "Request/error log browsing"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE];
    let base = CorsLayer::new().allow_methods(methods).allow_headers(headers);
    match cfg
        .frontend_url
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok())
    {
        Some(origin) => base.allow_origin(origin).allow_credentials(true),
        // FRONTEND_URL is mandatory in production (enforced at config load),
        // but fall back to deny-all rather than mirroring
        None if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        // Development convenience
        None => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "linkdisplay=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting LinkDisplay backend");

    // Database
    let pool =
        linkdisplay::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    linkdisplay::infrastructure::db::migrate(&pool).await?;

    let category_repo = Arc::new(SqlxCategoryRepository::new(pool.clone()));
    let link_repo = Arc::new(SqlxLinkRepository::new(pool.clone()));
    let error_log_repo = Arc::new(SqlxErrorLogRepository::new(pool.clone()));

    let services = AppServices::new(category_repo, link_repo, error_log_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    let cors = cors_layer(&cfg);

    // Build API router
    let app = Router::new()
        .nest(
            "/api",
            linkdisplay::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api",
            linkdisplay::presentation::http::categories::routes(ctx.clone()),
        )
        .nest(
            "/api",
            linkdisplay::presentation::http::links::routes(ctx.clone()),
        )
        .nest(
            "/api",
            linkdisplay::presentation::http::errors::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(
            ctx.clone(),
            linkdisplay::presentation::http::request_log::record,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
