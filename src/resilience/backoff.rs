//! Slot-based wait between settlement polls.

use std::time::Duration;

/// Time to wait before the next poll: one slot per confirmation still missing.
///
/// Shrinks as confirmations accumulate; zero once `confirmations` reaches the
/// target.
pub fn slot_wait(target_depth: u64, confirmations: u64, slot_interval: Duration) -> Duration {
    let remaining = target_depth.saturating_sub(confirmations);
    let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
    slot_interval.saturating_mul(remaining)
}
