use std::net::SocketAddr;

use stillalive::{
    build_router,
    config::{Config, LogFormat},
    database,
    middleware::secure::SecureOptions,
    AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false, LogFormat::Text);
            error!("{}", e);
            std::process::exit(1);
        }
    };
    init_tracing(config.dev_mode, config.log_format);

    if config.dev_mode {
        info!("Development mode: HTTPS enforcement disabled");
    } else if SecureOptions::from_config(&config).trusts_any_host() {
        warn!("ALLOWED_HOSTS is empty; HTTPS redirects will follow the client's Host header");
    }

    let pool = database::connect(&config).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(AppState::new(pool.clone(), config)?);

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    pool.close().await;
    info!("Database pool closed");

    served?;
    Ok(())
}

fn init_tracing(dev_mode: bool, format: LogFormat) {
    let default_directive = if dev_mode {
        "debug,sqlx=info"
    } else {
        "info,tower_http=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received CTRL+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
