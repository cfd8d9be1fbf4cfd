//! Error types for the protocol layer.

/// Errors that can occur while parsing inbound text or serializing
/// outbound messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The inbound text is not a recognized command.
    ///
    /// Covers everything from random garbage to a move submission with a
    /// player number outside 1/2 or non-integer coordinates. The payload
    /// is the offending text, for logs; clients only ever see a generic
    /// error message.
    #[error("malformed message: {0:?}")]
    Malformed(String),

    /// Serializing an outbound message failed.
    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
