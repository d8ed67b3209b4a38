//! Cooperative, single-shot stop signal.
//!
//! The binary flips the channel on ctrl-c; the agent observes it only
//! between blocking operations (never mid-read) and exits cleanly after
//! releasing its session.

use tokio::sync::watch;

pub type StopTx = watch::Sender<bool>;
pub type StopRx = watch::Receiver<bool>;

/// Create an un-signalled stop channel.
pub fn channel() -> (StopTx, StopRx) {
    watch::channel(false)
}

/// True once a stop has been requested.
pub fn requested(rx: &StopRx) -> bool {
    *rx.borrow()
}

/// Resolves once a stop is requested. A dropped sender counts as a stop.
pub async fn wait(rx: &mut StopRx) {
    let _ = rx.wait_for(|stop| *stop).await;
}
