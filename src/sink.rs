use std::fs::File;
use std::path::Path;

use crate::error::{CaptureError, Result};
use crate::parser::{Sample, FIELD_NAMES};

/// Where accepted samples go. One record per sample, arrival order.
pub trait RecordSink {
    fn write_sample(&mut self, sample: &Sample) -> Result<()>;

    /// Push buffered records out. Called at shutdown.
    fn flush(&mut self) -> Result<()>;
}

/// CSV file sink. Created in truncate mode; writes the single
/// `aX,aY,aZ,gX,gY,gZ` header up front, then appends records for the life
/// of the run.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut writer =
            csv::Writer::from_path(path).map_err(|source| CaptureError::SinkCreate {
                path: path.display().to_string(),
                source,
            })?;

        writer
            .write_record(FIELD_NAMES)
            .map_err(|source| CaptureError::SinkCreate {
                path: path.display().to_string(),
                source,
            })?;

        Ok(CsvSink { writer })
    }
}

impl RecordSink for CsvSink {
    fn write_sample(&mut self, sample: &Sample) -> Result<()> {
        self.writer
            .write_record(sample.fields().iter().map(|v| v.to_string()))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(CaptureError::SinkFlush)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_header_then_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write_sample(&Sample {
            ax: 0.1,
            ay: -0.2,
            az: 9.8,
            gx: 1.0,
            gy: 2.0,
            gz: -3.0,
        })
        .unwrap();
        sink.write_sample(&Sample {
            ax: 0.0,
            ay: 0.0,
            az: 0.0,
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
        })
        .unwrap();
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "aX,aY,aZ,gX,gY,gZ");
        assert_eq!(lines[1], "0.1,-0.2,9.8,1,2,-3");
        assert_eq!(lines[2], "0,0,0,0,0,0");
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale data from a previous run\n").unwrap();

        let mut sink = CsvSink::create(&path).unwrap();
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "aX,aY,aZ,gX,gY,gZ\n");
    }

    #[test]
    fn test_create_fails_on_missing_directory() {
        match CsvSink::create("/nonexistent-dir/out.csv") {
            Err(CaptureError::SinkCreate { .. }) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected sink creation to fail"),
        }
    }
}
