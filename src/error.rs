use std::io;

use thiserror::Error;

use crate::client::TagId;

/// Failure to establish or tear down a session.
///
/// Never fatal to the agent: the connection manager retries establishment
/// forever, and teardown failures are swallowed at release time.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("connection refused: {0}")]
    Refused(String),

    #[error("session handshake failed: {0}")]
    Handshake(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failure to read one tag's value through a live session.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("no such node: {0}")]
    NodeNotFound(TagId),

    #[error("bad value for {tag}: {reason}")]
    BadValue { tag: TagId, reason: String },

    #[error("read failed for {tag}: {reason}")]
    Transient { tag: TagId, reason: String },

    #[error("session lost: {0}")]
    SessionLost(String),
}

impl ReadError {
    /// A session-level fault aborts the whole sampling batch and triggers
    /// full teardown-and-reconnect. Every other read failure degrades to an
    /// unreadable sample for that one tag.
    pub fn is_session_fault(&self) -> bool {
        matches!(self, ReadError::SessionLost(_))
    }
}

/// Failure to append a row to the on-disk log.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything that can knock a running cycle over. The orchestrator answers
/// every variant the same way: release the session and reconnect.
#[derive(Error, Debug)]
pub enum CycleFault {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
