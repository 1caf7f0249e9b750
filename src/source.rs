use std::io::{ErrorKind, Read};
use std::time::Duration;

use serialport::SerialPort;

use crate::error::{CaptureError, Result};

/// Outcome of one line read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRead {
    /// One complete line, without its terminator.
    Line(String),
    /// Nothing arrived before the read timeout. Treated like an empty line.
    TimedOut,
}

/// A lazy, effectively infinite sequence of text lines. Restartable only by
/// re-running the program; there is no reconnect logic.
pub trait LineSource {
    fn next_line(&mut self) -> Result<SourceRead>;
}

/// Splits a raw byte stream into `\n`-terminated lines, tolerating chunk
/// boundaries anywhere. Bytes of an unterminated line stay pending, so a
/// line split by a read timeout is not lost.
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Pop the next complete line, if one is buffered. Invalid UTF-8 is
    /// replaced rather than rejected; the parser will classify such lines
    /// as malformed.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=pos).collect();
        let text = String::from_utf8_lossy(&line[..pos]);
        Some(text.trim_end_matches('\r').to_string())
    }
}

/// Serial port line source. The port blocks up to the configured timeout
/// per read; on timeout the caller gets `SourceRead::TimedOut` and any
/// partial line stays buffered in the framer.
pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    framer: LineFramer,
}

impl SerialLineSource {
    pub fn open(port_name: &str, baud: u32, timeout: Duration) -> Result<Self> {
        let port = serialport::new(port_name, baud)
            .timeout(timeout)
            .open()
            .map_err(|source| CaptureError::PortOpen {
                port: port_name.to_string(),
                source,
            })?;

        Ok(SerialLineSource {
            port,
            framer: LineFramer::new(),
        })
    }
}

impl LineSource for SerialLineSource {
    fn next_line(&mut self) -> Result<SourceRead> {
        let mut buf = [0u8; 256];
        loop {
            if let Some(line) = self.framer.next_line() {
                return Ok(SourceRead::Line(line));
            }

            match self.port.read(&mut buf) {
                Ok(0) => return Ok(SourceRead::TimedOut),
                Ok(n) => self.framer.extend(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    return Ok(SourceRead::TimedOut);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(CaptureError::SourceRead(e)),
            }
        }
    }
}
