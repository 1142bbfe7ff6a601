//! OS signal handling.
//!
//! # Responsibilities
//! - Translate SIGHUP into a forced properties reload
//! - Stop listening once shutdown is broadcast
//!
//! # Design Decisions
//! - SIGHUP reloads, it never shuts down
//! - The reload callback runs on the signal task; loads are short and blocking

use tokio::sync::broadcast;

/// Run `on_reload` for every SIGHUP until `shutdown` fires.
#[cfg(unix)]
pub async fn reload_on_hangup<F>(
    mut on_reload: F,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()>
where
    F: FnMut() + Send,
{
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    tracing::info!("Listening for SIGHUP to reload external properties");

    loop {
        tokio::select! {
            received = hangup.recv() => {
                if received.is_none() {
                    break;
                }
                tracing::info!("SIGHUP received, forcing properties reload");
                on_reload();
            }
            _ = shutdown.recv() => break,
        }
    }
    Ok(())
}

/// SIGHUP does not exist here; wait for shutdown only.
#[cfg(not(unix))]
pub async fn reload_on_hangup<F>(
    _on_reload: F,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()>
where
    F: FnMut() + Send,
{
    let _ = shutdown.recv().await;
    Ok(())
}
