//! Serial IMU gesture capture.
//!
//! Reads `aX,aY,aZ,gX,gY,gZ` lines streamed by a microcontroller over a
//! serial port, segments accepted samples into fixed-size gesture windows
//! with a timed pause between windows, and appends everything to one CSV
//! file for model training. Runs until the operator hits Ctrl+C.

pub mod cancel;
pub mod capture;
pub mod config;
pub mod countdown;
pub mod error;
pub mod parser;
pub mod segmenter;
pub mod sink;
pub mod source;
