//! [`ServerBuilder`] and the accept loop.
//!
//! This is the entry point for running a Sidewinder server. It ties the
//! layers together: transport → protocol → matchmaker → arbiter → log.

use std::sync::Arc;

use sidewinder_store::MoveLog;
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::matchmaker::Matchmaker;
use crate::transport::WebSocketListener;
use crate::ServerError;

/// Shared server state handed to each connection handler task.
///
/// Wrapped in `Arc` by the server; the matchmaker sits behind a mutex
/// because pairing and teardown must not interleave.
pub(crate) struct ServerState<L> {
    pub(crate) matchmaker: Mutex<Matchmaker<L>>,
}

/// Builder for configuring and starting a server.
///
/// # Example
///
/// ```rust,no_run
/// use sidewinder_server::ServerBuilder;
/// use sidewinder_store::MemoryMoveLog;
///
/// # async fn run() -> Result<(), sidewinder_server::ServerError> {
/// let server = ServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .build(MemoryMoveLog::new())
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct ServerBuilder {
    bind_addr: String,
}

impl ServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }

    /// Sets the address to bind the server to. Use port 0 to let the OS
    /// pick one (and read it back with [`Server::local_addr`]).
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener and assembles a server over the given move log.
    pub async fn build<L: MoveLog>(self, log: L) -> Result<Server<L>, ServerError> {
        let listener = WebSocketListener::bind(&self.bind_addr).await?;
        let state = Arc::new(ServerState {
            matchmaker: Mutex::new(Matchmaker::new(Arc::new(log))),
        });
        Ok(Server { listener, state })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Sidewinder server. Call [`run`](Self::run) to start
/// accepting connections.
pub struct Server<L> {
    listener: WebSocketListener,
    state: Arc<ServerState<L>>,
}

impl<L: MoveLog> Server<L> {
    /// Creates a new builder.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop, spawning a handler task per connection.
    /// Runs until the process is terminated; a failed accept is logged
    /// and the loop continues.
    pub async fn run(mut self) -> Result<(), ServerError> {
        tracing::info!("sidewinder server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(handle_connection(conn, state));
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
