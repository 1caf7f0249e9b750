//! Session segmenter: groups accepted samples into fixed-size gesture
//! windows and keeps the running totals the shutdown summary reports.
//!
//! The segmenter owns state and counters only; writing to the sink and
//! running the inter-window countdown stay with the capture loop.

/// Segmenter state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    /// Initial countdown before the first capture window.
    PreRoll,
    /// Accepting samples into the current window.
    Capturing,
    /// Countdown after a completed window, before the next one.
    InterWindowPause,
    /// Terminal. Reached only through operator cancellation.
    Stopped,
}

/// Process-lifetime counters. Never persisted across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounters {
    /// Accepted samples in the current window; resets on completion.
    pub samples_in_window: u32,
    /// Completed windows; monotonically increasing.
    pub windows_completed: u32,
}

/// Result of accepting one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    InProgress,
    /// The sample just closed a window; running total included for the
    /// operator confirmation.
    Complete { windows_completed: u32 },
}

/// Final report produced on entering `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSummary {
    pub windows_completed: u32,
    /// `windows_completed * N + samples_in_window`, so a partial window at
    /// cancellation time is still accounted for.
    pub total_samples: u64,
}

pub struct Segmenter {
    samples_per_window: u32,
    state: SegmenterState,
    counters: SessionCounters,
}

impl Segmenter {
    /// `samples_per_window` must be at least 1; the CLI enforces this.
    pub fn new(samples_per_window: u32) -> Self {
        debug_assert!(samples_per_window >= 1);
        Segmenter {
            samples_per_window,
            state: SegmenterState::PreRoll,
            counters: SessionCounters::default(),
        }
    }

    pub fn state(&self) -> SegmenterState {
        self.state
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    pub fn samples_per_window(&self) -> u32 {
        self.samples_per_window
    }

    /// Countdown expired: `PreRoll`/`InterWindowPause` → `Capturing`.
    pub fn begin_capture(&mut self) {
        debug_assert!(matches!(
            self.state,
            SegmenterState::PreRoll | SegmenterState::InterWindowPause
        ));
        self.state = SegmenterState::Capturing;
    }

    /// Register one accepted sample (already written to the sink by the
    /// caller). Closing sample of a window resets the per-window count,
    /// bumps the window total and moves to `InterWindowPause`.
    pub fn accept_sample(&mut self) -> WindowStatus {
        debug_assert_eq!(self.state, SegmenterState::Capturing);

        self.counters.samples_in_window += 1;
        if self.counters.samples_in_window == self.samples_per_window {
            self.counters.samples_in_window = 0;
            self.counters.windows_completed += 1;
            self.state = SegmenterState::InterWindowPause;
            return WindowStatus::Complete {
                windows_completed: self.counters.windows_completed,
            };
        }

        WindowStatus::InProgress
    }

    /// Operator cancellation from any state → `Stopped`, with the final
    /// summary.
    pub fn stop(&mut self) -> CaptureSummary {
        self.state = SegmenterState::Stopped;
        CaptureSummary {
            windows_completed: self.counters.windows_completed,
            total_samples: self.counters.windows_completed as u64
                * self.samples_per_window as u64
                + self.counters.samples_in_window as u64,
        }
    }
}
