use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::time::Duration;

use gesture_capture::cancel::CancelFlag;
use gesture_capture::capture::{run_capture, ts_now};
use gesture_capture::config::{
    CaptureConfig, DEFAULT_BAUD, DEFAULT_OUTPUT, DEFAULT_PAUSE_SECS, DEFAULT_PORT,
    DEFAULT_SAMPLES_PER_GESTURE, READ_TIMEOUT,
};
use gesture_capture::sink::CsvSink;
use gesture_capture::source::SerialLineSource;

#[derive(Parser, Debug)]
#[command(name = "gesture_capture")]
#[command(about = "Capture serial IMU samples into a labeled gesture CSV", long_about = None)]
struct Args {
    /// Serial port the microcontroller is connected to
    #[arg(long, default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate (must match the firmware's Serial.begin)
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Samples per gesture (must match the firmware's numSamples)
    #[arg(long, default_value_t = DEFAULT_SAMPLES_PER_GESTURE,
          value_parser = clap::value_parser!(u32).range(1..))]
    samples: u32,

    /// Pause before each gesture window, in seconds
    #[arg(long, default_value_t = DEFAULT_PAUSE_SECS)]
    pause_secs: u64,

    /// Output CSV path (overwritten on start)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: String,
}

/// Warnings (malformed lines) are operator output, so they must show up
/// without RUST_LOG set.
fn log_builder() -> env_logger::Builder {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
}

fn main() -> Result<()> {
    log_builder().init();
    let args = Args::parse();

    println!("[{}] Gesture Capture Starting", ts_now());
    println!("  Port: {} at {} baud", args.port, args.baud);
    println!("  Samples per gesture: {}", args.samples);
    println!("  Output: {}", args.output);

    let cancel = CancelFlag::new();
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || handler_flag.cancel())
        .context("failed to install Ctrl+C handler")?;

    // Both resources are required before the loop starts; no retry.
    let mut source = SerialLineSource::open(&args.port, args.baud, READ_TIMEOUT)
        .context("serial port unavailable")?;
    let mut sink = CsvSink::create(&args.output).context("output file unavailable")?;

    let config = CaptureConfig {
        samples_per_gesture: args.samples,
        pause_ticks: args.pause_secs,
        tick_interval: Duration::from_secs(1),
    };

    println!(
        "[{}] Starting data collection, press Ctrl+C to stop",
        ts_now()
    );

    let summary = run_capture(&mut source, &mut sink, &config, &cancel)?;

    println!("\n[{}] Data collection stopped", ts_now());
    println!("\n=== Final Stats ===");
    println!("Gestures captured: {}", summary.windows_completed);
    println!("Total samples saved: {}", summary.total_samples);
    println!("\nData saved to '{}'.", args.output);
    println!("Next steps:");
    println!("  1. Rename the file after the captured gesture (e.g. 'wave.csv')");
    println!("  2. Move it into your training dataset directory");

    Ok(())
}
