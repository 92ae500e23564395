use std::time::Duration;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use chexplore::{
    background_task::start_limiter_eviction_task,
    graceful_shutdown::shutdown_signal,
    routes::{configure_routes, cors, multipart_config},
    settings::AppConfig,
    AppState,
};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

const LIMITER_IDLE_TTL: Duration = Duration::from_secs(60 * 30);

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let production = std::env::var("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false);

    if production {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to build backend client: {}", e);
            std::process::exit(1);
        }
    };
    let app_state = web::Data::new(state);

    let server_addr = format!("{}:{}", config.host, config.port);
    let origins = config.cors_origins();
    let upload_limits = config.clone();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let limiter = app_state.limiter.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(multipart_config(&upload_limits))
            .wrap(cors(&origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_limiter_eviction_task(limiter, LIMITER_IDLE_TTL));

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
