use std::time::Duration;

/// Serial port the microcontroller enumerates as. On Windows this is a COM
/// port (e.g. `COM7`), on Linux/macOS something like `/dev/ttyACM0`.
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Must match the `Serial.begin(...)` rate in the firmware sketch.
pub const DEFAULT_BAUD: u32 = 9_600;

/// Samples per gesture window. Must match `numSamples` in the firmware;
/// 100 samples is roughly 2 s at 50 Hz.
pub const DEFAULT_SAMPLES_PER_GESTURE: u32 = 100;

/// Pause between gesture windows (and before the first one), in seconds.
pub const DEFAULT_PAUSE_SECS: u64 = 3;

/// Output CSV path, truncated at startup.
pub const DEFAULT_OUTPUT: &str = "output.csv";

/// How long a serial read blocks before reporting a timeout.
pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Capture-loop settings carried into the library.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Accepted samples per gesture window.
    pub samples_per_gesture: u32,
    /// Countdown ticks before the first window and between windows.
    pub pause_ticks: u64,
    /// Duration of one countdown tick.
    pub tick_interval: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            samples_per_gesture: DEFAULT_SAMPLES_PER_GESTURE,
            pause_ticks: DEFAULT_PAUSE_SECS,
            tick_interval: Duration::from_secs(1),
        }
    }
}
