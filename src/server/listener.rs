use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routing::Handlers;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(cfg).await?;
    serve(listener, Arc::new(Handlers::new(cfg)), cfg.read_timeout()).await
}

pub async fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(&cfg.address)
        .await
        .with_context(|| format!("failed to bind to {}", cfg.address))?;
    info!(addr = %listener.local_addr()?, "Listening");
    Ok(listener)
}

/// Accepts connections forever, one task per connection. A failing accept
/// or connection is logged and never stops the loop.
pub async fn serve(
    listener: TcpListener,
    handlers: Arc<Handlers>,
    read_timeout: Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "Error accepting connection");
                continue;
            }
        };
        info!(peer = %peer, "Accepted connection");

        let handlers = Arc::clone(&handlers);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handlers, read_timeout);
            if let Err(e) = conn.run().await {
                error!(peer = %peer, error = format!("{e:#}"), "Connection error");
            }
        });
    }
}
