//! Error types for the server crate.

/// Errors that can occur in the transport layer.
///
/// Connection-scoped failures (send, receive) end that connection's
/// session and nothing else; only a failed bind can stop the server from
/// coming up at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding the listener or accepting a connection failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),
}

/// Top-level server error.
///
/// Everything that can abort [`Server::run`](crate::Server::run) or
/// [`ServerBuilder::build`](crate::ServerBuilder::build); per-connection
/// trouble never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A transport-level failure (bind, accept).
    #[error(transparent)]
    Transport(#[from] TransportError),
}
