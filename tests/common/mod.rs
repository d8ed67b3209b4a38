//! Shared test doubles: a scripted connector and session whose lifecycle
//! (connects, reads, disconnects) is observable through shared counters.

// Shared across multiple test files; not every helper is used in each one.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use opclog_rs::client::{Connector, SessionClient, TagId, Value};
use opclog_rs::error::{ConnectError, ReadError};
use opclog_rs::shutdown::StopTx;

/// One scripted reaction to a `read_value` call, consumed in call order.
/// A session whose script runs out keeps answering `Ok(0.0)`.
#[derive(Clone)]
pub enum ReadScript {
    Ok(Value),
    Unreadable,
    SessionLost,
}

/// Shorthand for a scripted float read.
pub fn ok_f(v: f64) -> ReadScript {
    ReadScript::Ok(Value::Float(v))
}

pub fn tag_list(names: &[&str]) -> Vec<TagId> {
    names.iter().copied().map(TagId::from).collect()
}

#[derive(Clone, Default)]
pub struct Counters {
    pub connects: usize,
    pub disconnects: usize,
    pub reads: usize,
}

#[derive(Default)]
struct State {
    counters: Counters,
    connect_failures: usize,
    sessions: VecDeque<Vec<ReadScript>>,
    stop_after_connects: Option<(usize, StopTx)>,
    stop_after_reads: Option<(usize, StopTx)>,
    fail_disconnects: bool,
}

/// Connector double driven by per-session read scripts. Clones share state,
/// so a test can keep one handle for assertions after moving another into
/// the agent.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    state: Arc<Mutex<State>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> Counters {
        self.state.lock().unwrap().counters.clone()
    }

    /// Fail the next `n` connect attempts.
    pub fn set_connect_failures(&self, n: usize) {
        self.state.lock().unwrap().connect_failures = n;
    }

    /// Queue the read script for the next successful connect.
    pub fn push_session(&self, script: Vec<ReadScript>) {
        self.state.lock().unwrap().sessions.push_back(script);
    }

    /// Request a stop right after the `n`th successful connect.
    pub fn stop_after_connects(&self, n: usize, tx: StopTx) {
        self.state.lock().unwrap().stop_after_connects = Some((n, tx));
    }

    /// Request a stop once `n` reads have been served in total.
    pub fn stop_after_reads(&self, n: usize, tx: StopTx) {
        self.state.lock().unwrap().stop_after_reads = Some((n, tx));
    }

    /// Make every disconnect report a failure.
    pub fn fail_disconnects(&self) {
        self.state.lock().unwrap().fail_disconnects = true;
    }
}

impl Connector for ScriptedConnector {
    type Session = ScriptedSession;

    async fn connect(&self) -> Result<Self::Session, ConnectError> {
        let mut state = self.state.lock().unwrap();
        state.counters.connects += 1;
        if state.connect_failures > 0 {
            state.connect_failures -= 1;
            return Err(ConnectError::Unreachable("scripted failure".into()));
        }
        let connects = state.counters.connects;
        if state
            .stop_after_connects
            .as_ref()
            .is_some_and(|(n, _)| connects >= *n)
        {
            let (_, tx) = state.stop_after_connects.take().unwrap();
            let _ = tx.send(true);
        }
        let script = state.sessions.pop_front().unwrap_or_default();
        Ok(ScriptedSession {
            state: Arc::clone(&self.state),
            script: script.into(),
        })
    }

    fn endpoint(&self) -> &str {
        "scripted://test"
    }
}

pub struct ScriptedSession {
    state: Arc<Mutex<State>>,
    script: VecDeque<ReadScript>,
}

impl SessionClient for ScriptedSession {
    async fn read_value(&mut self, tag: &TagId) -> Result<Value, ReadError> {
        let step = self.script.pop_front().unwrap_or(ok_f(0.0));
        {
            let mut state = self.state.lock().unwrap();
            state.counters.reads += 1;
            let reads = state.counters.reads;
            if state
                .stop_after_reads
                .as_ref()
                .is_some_and(|(n, _)| reads >= *n)
            {
                let (_, tx) = state.stop_after_reads.take().unwrap();
                let _ = tx.send(true);
            }
        }
        match step {
            ReadScript::Ok(v) => Ok(v),
            ReadScript::Unreadable => Err(ReadError::Transient {
                tag: tag.clone(),
                reason: "scripted read failure".into(),
            }),
            ReadScript::SessionLost => Err(ReadError::SessionLost("scripted fault".into())),
        }
    }

    async fn disconnect(&mut self) -> Result<(), ConnectError> {
        let mut state = self.state.lock().unwrap();
        state.counters.disconnects += 1;
        if state.fail_disconnects {
            return Err(ConnectError::Unreachable(
                "scripted disconnect failure".into(),
            ));
        }
        Ok(())
    }
}
