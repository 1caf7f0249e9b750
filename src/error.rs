use thiserror::Error;

/// Capture error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to open serial port {port}: {source}")]
    PortOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("failed to create output file {path}: {source}")]
    SinkCreate {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("serial read failed: {0}")]
    SourceRead(#[from] std::io::Error),

    #[error("failed to write record: {0}")]
    SinkWrite(#[from] csv::Error),

    #[error("failed to flush output file: {0}")]
    SinkFlush(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
