use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::client::{Connector, SessionClient};
use crate::shutdown::{self, StopRx};

/// Delay between failed connection attempts.
///
/// Fixed on purpose: an unattended field agent favors availability over
/// fast-fail, so there is no backoff growth and no attempt cap.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Owns the session lifecycle: establishes sessions with unbounded retry
/// and tears them down without letting teardown failures escape.
pub struct ConnectionManager<C: Connector> {
    connector: C,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Establish a session, retrying forever with a fixed delay.
    ///
    /// Connection failures are never surfaced to the caller. Returns `None`
    /// only when a stop is requested during the retry wait.
    pub async fn acquire(&self, stop: &mut StopRx) -> Option<C::Session> {
        loop {
            match self.connector.connect().await {
                Ok(session) => {
                    info!(endpoint = self.connector.endpoint(), "connected");
                    return Some(session);
                }
                Err(e) => {
                    warn!(
                        endpoint = self.connector.endpoint(),
                        "connection failed: {e}. Retrying in {}s",
                        RETRY_DELAY.as_secs()
                    );
                    tokio::select! {
                        _ = sleep(RETRY_DELAY) => {}
                        _ = shutdown::wait(stop) => return None,
                    }
                }
            }
        }
    }

    /// Disconnect a session. At teardown time the priority is releasing the
    /// resource, not reporting, so failures are logged and swallowed.
    pub async fn release(&self, mut session: C::Session) {
        match session.disconnect().await {
            Ok(()) => info!("disconnected"),
            Err(e) => warn!("disconnect failed: {e}"),
        }
    }
}
