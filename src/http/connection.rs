use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::routing::Handlers;

/// Serves exactly one request on a client stream, then closes it.
pub struct Connection<S = TcpStream> {
    stream: BufReader<S>,
    handlers: Arc<Handlers>,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handlers: Arc<Handlers>, read_timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            handlers,
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`.
    ///
    /// A request that cannot be parsed, or does not arrive within the read
    /// timeout, gets no response at all. The stream is closed when the
    /// connection is dropped, whichever way this returns.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let req = self.read_request().await?;
                    self.state = ConnectionState::Processing(req);
                }

                ConnectionState::Processing(req) => {
                    let response = self.handlers.handle(req).await;

                    tracing::info!(
                        method = ?req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Handled request"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer
                        .write_to_stream(self.stream.get_mut())
                        .await
                        .context("failed to write response")?;

                    // Single request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    let _ = self.stream.get_mut().shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Parses one request, bounded by the read timeout. The deadline covers
    /// the whole read phase, not each individual read.
    pub async fn read_request(&mut self) -> anyhow::Result<Request> {
        let request = timeout(self.read_timeout, parse_http_request(&mut self.stream))
            .await
            .map_err(|_| anyhow::anyhow!("read timed out after {:?}", self.read_timeout))?
            .context("HTTP parse error")?;

        Ok(request)
    }
}
