pub mod agent;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod sampler;
pub mod shutdown;
pub mod sim;
pub mod sink;

pub use agent::Agent;
pub use client::{Connector, Sample, SessionClient, TagId, Value};
pub use config::AgentConfig;
pub use connection::ConnectionManager;
pub use sink::{LogSink, Row};
