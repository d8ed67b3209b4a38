use chrono::Local;
use tokio::time::sleep;
use tracing::{error, info};

use crate::client::Connector;
use crate::config::AgentConfig;
use crate::connection::ConnectionManager;
use crate::error::{CycleFault, SinkError};
use crate::sampler::sample_all;
use crate::shutdown::{self, StopRx};
use crate::sink::{LogSink, Row};

/// How a stretch of RUNNING ended.
enum RunEnd {
    /// Operator asked for a stop; exit quietly.
    Stopped,
    /// Something broke mid-cycle; tear down and reconnect.
    Fault(CycleFault),
}

/// The sampling loop: ties the connection manager, tag reader and log sink
/// into an infinite cadence-driven cycle.
///
/// The lifecycle is an explicit outer loop over three states: CONNECTING
/// (acquire a session, retrying forever), RUNNING (sample all tags and log
/// one row per interval) and RECOVERING (release the session and go back to
/// CONNECTING). Faults never end the process; the stop signal is the only
/// way out, and it releases the session first on every path.
pub struct Agent<C: Connector> {
    config: AgentConfig,
    connections: ConnectionManager<C>,
    sink: LogSink,
    stop: StopRx,
}

impl<C: Connector> Agent<C> {
    /// Set up the agent, creating the log directory if needed.
    pub fn new(config: AgentConfig, connector: C, stop: StopRx) -> Result<Self, SinkError> {
        let sink = LogSink::new(&config.log_dir, config.tags.len())?;
        Ok(Self {
            config,
            connections: ConnectionManager::new(connector),
            sink,
            stop,
        })
    }

    /// Run until a stop is requested.
    pub async fn run(mut self) {
        loop {
            let Some(mut session) = self.connections.acquire(&mut self.stop).await else {
                info!("stopped by user");
                return;
            };

            match self.run_cycles(&mut session).await {
                RunEnd::Stopped => {
                    self.connections.release(session).await;
                    info!("stopped by user");
                    return;
                }
                RunEnd::Fault(e) => {
                    error!("cycle failed: {e}. Restarting connection");
                    self.connections.release(session).await;
                    // back to CONNECTING
                }
            }
        }
    }

    async fn run_cycles(&mut self, session: &mut C::Session) -> RunEnd {
        loop {
            if shutdown::requested(&self.stop) {
                return RunEnd::Stopped;
            }
            if let Err(e) = self.cycle(session).await {
                return RunEnd::Fault(e);
            }
            tokio::select! {
                _ = sleep(self.config.interval) => {}
                _ = shutdown::wait(&mut self.stop) => return RunEnd::Stopped,
            }
        }
    }

    /// One cycle: capture the timestamp, read every tag, append the row.
    async fn cycle(&mut self, session: &mut C::Session) -> Result<(), CycleFault> {
        let captured = Local::now();
        let samples = sample_all(session, &self.config.tags).await?;
        let row = Row::new(captured, samples);
        let fields = row.fields();
        self.sink.append(&row)?;
        info!(time = %fields[0], values = ?&fields[2..], "cycle logged");
        Ok(())
    }
}
