use tracing::warn;

use crate::client::{Sample, SessionClient, TagId};
use crate::error::ReadError;

/// Read every configured tag once against a live session.
///
/// Reads are issued one at a time, in list order, against the single shared
/// session. A tag that fails to read becomes [`Sample::Unreadable`] and the
/// batch continues; one misbehaving tag never blocks the rest of the cycle.
/// Only a session-level fault aborts and propagates. On success the result
/// has exactly `tags.len()` entries.
pub async fn sample_all<S: SessionClient>(
    session: &mut S,
    tags: &[TagId],
) -> Result<Vec<Sample>, ReadError> {
    let mut samples = Vec::with_capacity(tags.len());
    for tag in tags {
        match session.read_value(tag).await {
            Ok(value) => samples.push(Sample::Value(value)),
            Err(e) if e.is_session_fault() => return Err(e),
            Err(e) => {
                warn!(tag = %tag, "read failed: {e}");
                samples.push(Sample::Unreadable);
            }
        }
    }
    Ok(samples)
}
