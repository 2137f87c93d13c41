mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use snip_gateway::{App, AppState};
use snip_generator::RandomGenerator;
use snip_redirector::{RedirectorService, StatsService};
use snip_shortener::{ShortenerService, ShortenerSettings};
use snip_storage::{InMemoryRepository, Repository, SqliteRepository, SqliteSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    snip_telemetry::init(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        db_path = %config.db_path.display(),
        max_attempts = config.max_attempts,
        "starting snip gateway"
    );

    let generator =
        RandomGenerator::new(config.code_length).context("invalid code length configuration")?;
    info!(code_length = generator.length(), "random code generator ready");
    let settings = ShortenerSettings::builder()
        .base_url(config.base_url)
        .max_attempts(config.max_attempts)
        .build();

    match config.storage {
        StorageBackendArg::InMemory => {
            warn!("in-memory storage selected; links are lost on restart");
            let repository = Arc::new(InMemoryRepository::new());
            run_server(config.listen_addr, repository, generator, settings).await?;
        }
        StorageBackendArg::Sqlite => {
            let sqlite_settings = SqliteSettings::builder().path(config.db_path).build();
            let repository = Arc::new(
                SqliteRepository::open(sqlite_settings)
                    .await
                    .context("failed to open sqlite link store")?,
            );
            let served =
                run_server(config.listen_addr, Arc::clone(&repository), generator, settings)
                    .await;
            repository.close().await;
            served?;
        }
    }

    info!("snip gateway stopped");
    Ok(())
}

async fn run_server<R: Repository>(
    listen_addr: SocketAddr,
    repository: Arc<R>,
    generator: RandomGenerator,
    settings: ShortenerSettings,
) -> anyhow::Result<()> {
    let shortener = ShortenerService::new(Arc::clone(&repository), generator, settings)
        .context("invalid shortener configuration")?;
    let state = AppState::new(
        Arc::new(shortener),
        Arc::new(RedirectorService::new(Arc::clone(&repository))),
        Arc::new(StatsService::new(repository)),
    );

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "listening for http requests");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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

    info!("shutdown signal received, draining connections");
}
