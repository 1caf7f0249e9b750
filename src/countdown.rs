use std::thread;
use std::time::Duration;

use crate::cancel::CancelFlag;

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Completed,
    Cancelled,
}

/// Blocking countdown of `ticks` ticks of `tick_interval` each.
///
/// The cancel flag is checked at every tick boundary; `on_tick` receives the
/// remaining tick count (`ticks`, `ticks - 1`, ..., `1`) before each sleep,
/// which is where the "Starting in N seconds..." prints come from. A sleep
/// already in progress is not interrupted, matching the 1 s granularity the
/// operator sees.
pub fn run(
    ticks: u64,
    tick_interval: Duration,
    cancel: &CancelFlag,
    mut on_tick: impl FnMut(u64),
) -> CountdownOutcome {
    for remaining in (1..=ticks).rev() {
        if cancel.is_cancelled() {
            return CountdownOutcome::Cancelled;
        }
        on_tick(remaining);
        thread::sleep(tick_interval);
    }

    if cancel.is_cancelled() {
        CountdownOutcome::Cancelled
    } else {
        CountdownOutcome::Completed
    }
}
