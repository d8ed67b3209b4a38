//! The session-client capability the agent consumes, expressed as traits.
//!
//! The agent does not implement the wire protocol. It needs exactly three
//! operations from a transport: connect, read-value-by-identifier and
//! disconnect. Anything providing those through [`Connector`] and
//! [`SessionClient`] can drive the sampling loop; the built-in
//! [`crate::sim`] backend is one such implementation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConnectError, ReadError};

/// Identifier of one data point on the remote server, e.g. `ns=3;i=1002`.
///
/// Opaque to the agent. A configured tag list may contain the same
/// identifier more than once; each occurrence is sampled independently and
/// gets its own column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagId(String);

impl TagId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TagId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TagId(s.to_string()))
    }
}

impl From<&str> for TagId {
    fn from(s: &str) -> Self {
        TagId(s.to_string())
    }
}

/// A typed value read from one tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// The result of reading one tag at one instant.
///
/// An unreadable tag is data, not control flow: a sampling cycle always
/// yields exactly one sample per configured tag, readable or not.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Value(Value),
    Unreadable,
}

impl Sample {
    /// CSV field rendering; an unreadable tag is an empty field.
    pub fn field(&self) -> String {
        match self {
            Sample::Value(v) => v.to_string(),
            Sample::Unreadable => String::new(),
        }
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, Sample::Unreadable)
    }
}

/// A live session with the server.
///
/// The agent holds at most one session at a time and releases it on every
/// exit path, normal or faulted.
#[allow(async_fn_in_trait)]
pub trait SessionClient {
    /// Read the current value of one tag.
    async fn read_value(&mut self, tag: &TagId) -> Result<Value, ReadError>;

    /// Tear the session down. Best effort; the caller logs and discards
    /// errors.
    async fn disconnect(&mut self) -> Result<(), ConnectError>;
}

/// Factory for sessions. `connect` is the one fallible step the connection
/// manager retries forever.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session: SessionClient;

    async fn connect(&self) -> Result<Self::Session, ConnectError>;

    /// Endpoint string for status lines.
    fn endpoint(&self) -> &str;
}
