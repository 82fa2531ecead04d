//! OS signal handling.
//!
//! - SIGHUP → reload trigger (route file only)
//! - SIGINT / SIGTERM → graceful shutdown
//!
//! Signals are translated into calls on [`ReloadTrigger`] and [`Shutdown`];
//! nothing else in the crate knows about the OS mechanism.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::supervisor::ReloadTrigger;

/// Forward SIGHUP to `trigger` until shutdown.
#[cfg(unix)]
pub async fn forward_reload_signals(
    trigger: Arc<dyn ReloadTrigger>,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    tracing::debug!("SIGHUP handler installed");

    loop {
        tokio::select! {
            received = hangup.recv() => {
                if received.is_none() {
                    break;
                }
                tracing::info!("SIGHUP received, reloading routes");
                trigger.trigger_reload();
            }
            _ = shutdown.recv() => break,
        }
    }
    Ok(())
}

/// No SIGHUP here; reloads come from the watcher or admin API only.
#[cfg(not(unix))]
pub async fn forward_reload_signals(
    _trigger: Arc<dyn ReloadTrigger>,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let _ = shutdown.recv().await;
    Ok(())
}

/// Wait for SIGINT or SIGTERM, then trigger `shutdown`.
pub async fn shutdown_on_signal(shutdown: Shutdown) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res?,
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutdown signal received");
    shutdown.trigger();
    Ok(())
}
