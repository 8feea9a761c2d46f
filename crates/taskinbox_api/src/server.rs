//! Server bootstrap and graceful shutdown.

use crate::config::ServerConfig;
use crate::routes::create_router;
use crate::state::AppState;
use anyhow::Context;
use log::{error, info};
use std::future::Future;
use tokio::net::TcpListener;

/// Binds the configured address and serves a fresh, empty collection until
/// Ctrl+C or SIGTERM.
pub async fn run(config: &ServerConfig) -> anyhow::Result<()> {
    let address = config.socket_addr();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("bind server listener on {address} failed"))?;

    serve(listener, AppState::in_memory(), shutdown_signal()).await
}

/// Serves the API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .context("read listener address failed")?;
    info!("event=server_start module=api status=ok addr=http://{local_addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server terminated with error")?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal_install module=api status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=signal_install module=api status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=shutdown module=api status=start signal=ctrl_c"),
        () = terminate => info!("event=shutdown module=api status=start signal=sigterm"),
    }
}
