//! Built-in simulation backend.
//!
//! Stands in for a real transport so the agent can run end to end without a
//! server on the network. It serves the same waveform points a simulation
//! server exposes (counter, random, sawtooth, sinusoid, square, triangle,
//! constant) under their usual node identifiers, and can be told to fail a
//! number of connect attempts to exercise the retry path.

use std::f64::consts::PI;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use rand::Rng;

use crate::client::{Connector, SessionClient, TagId, Value};
use crate::error::{ConnectError, ReadError};

/// Full period of the repeating waveforms, in seconds.
const WAVE_PERIOD_SECS: f64 = 10.0;
/// Peak amplitude of the repeating waveforms.
const AMPLITUDE: f64 = 2.0;

/// Connector for the simulated server.
pub struct SimConnector {
    endpoint: String,
    fail_connects: AtomicU32,
}

impl SimConnector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fail_connects: AtomicU32::new(0),
        }
    }

    /// Make the next `n` connect attempts fail with a simulated outage.
    pub fn fail_next_connects(self, n: u32) -> Self {
        self.fail_connects.store(n, Ordering::Relaxed);
        self
    }
}

impl Connector for SimConnector {
    type Session = SimSession;

    async fn connect(&self) -> Result<Self::Session, ConnectError> {
        let left = self.fail_connects.load(Ordering::Relaxed);
        if left > 0 {
            self.fail_connects.store(left - 1, Ordering::Relaxed);
            return Err(ConnectError::Unreachable(format!(
                "simulated outage at {}",
                self.endpoint
            )));
        }
        Ok(SimSession {
            started: Instant::now(),
            counter: 0,
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// One simulated session. Waveforms are functions of the time since
/// connect; the counter point advances once per read.
pub struct SimSession {
    started: Instant,
    counter: i64,
}

impl SimSession {
    fn phase(&self) -> f64 {
        let t = self.started.elapsed().as_secs_f64();
        (t % WAVE_PERIOD_SECS) / WAVE_PERIOD_SECS
    }
}

impl SessionClient for SimSession {
    async fn read_value(&mut self, tag: &TagId) -> Result<Value, ReadError> {
        let phase = self.phase();
        match tag.as_str() {
            // Counter
            "ns=3;i=1001" => {
                self.counter += 1;
                Ok(Value::Int(self.counter))
            }
            // Random
            "ns=3;i=1002" => {
                let v = rand::thread_rng().gen_range(-AMPLITUDE..AMPLITUDE);
                Ok(Value::Float(v))
            }
            // Sawtooth
            "ns=3;i=1003" => Ok(Value::Float(-AMPLITUDE + 2.0 * AMPLITUDE * phase)),
            // Sinusoid
            "ns=3;i=1004" => Ok(Value::Float(AMPLITUDE * (2.0 * PI * phase).sin())),
            // Square
            "ns=3;i=1005" => {
                let v = if phase < 0.5 { AMPLITUDE } else { -AMPLITUDE };
                Ok(Value::Float(v))
            }
            // Triangle
            "ns=3;i=1006" => {
                let v = if phase < 0.5 {
                    -AMPLITUDE + 4.0 * AMPLITUDE * phase
                } else {
                    3.0 * AMPLITUDE - 4.0 * AMPLITUDE * phase
                };
                Ok(Value::Float(v))
            }
            // Constant
            "ns=3;i=1007" => Ok(Value::Float(1.0)),
            _ => Err(ReadError::NodeNotFound(tag.clone())),
        }
    }

    async fn disconnect(&mut self) -> Result<(), ConnectError> {
        Ok(())
    }
}
