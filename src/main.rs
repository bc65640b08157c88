use anyhow::Result;
use oauth_grant_server::application::{
    ports::{credential::CredentialCodec, time::Clock},
    services::ApplicationServices,
};
use oauth_grant_server::config::AppConfig;
use oauth_grant_server::infrastructure::{
    security::{
        consumed_store::{self, InMemoryConsumedCredentialStore},
        jwt_codec::JwtCredentialCodec,
    },
    time::SystemClock,
};
use oauth_grant_server::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let codec: Arc<dyn CredentialCodec> =
        Arc::new(JwtCredentialCodec::new(config.jwt_secret(), Arc::clone(&clock)));
    let replay_guard = config.single_use_credentials().then(|| {
        consumed_store::into_arc(InMemoryConsumedCredentialStore::new(Arc::clone(&clock)))
    });
    tracing::info!(
        single_use = config.single_use_credentials(),
        "credential codec ready"
    );

    let services = ApplicationServices::new(config.grant_settings(), codec, replay_guard);

    let state = HttpState {
        services: Arc::new(services),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
