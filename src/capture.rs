use std::io::{self, Write};

use chrono::Utc;

use crate::cancel::CancelFlag;
use crate::config::CaptureConfig;
use crate::countdown::{self, CountdownOutcome};
use crate::error::Result;
use crate::parser::{classify_line, LineClass};
use crate::segmenter::{CaptureSummary, Segmenter, WindowStatus};
use crate::sink::RecordSink;
use crate::source::{LineSource, SourceRead};

/// One sequential pass over the line stream: read, classify, route, maybe
/// complete a window, maybe pause. Ends only through the cancel flag; the
/// stream itself is treated as infinite.
///
/// The sink is flushed before the summary is computed, so everything the
/// summary counts is on disk.
pub fn run_capture(
    source: &mut impl LineSource,
    sink: &mut impl RecordSink,
    config: &CaptureConfig,
    cancel: &CancelFlag,
) -> Result<CaptureSummary> {
    let mut segmenter = Segmenter::new(config.samples_per_gesture);

    // Pre-roll: give the operator time to get into position.
    if pause_before_window(config, cancel) == CountdownOutcome::Completed {
        segmenter.begin_capture();

        while !cancel.is_cancelled() {
            let line = match source.next_line()? {
                SourceRead::Line(line) => line,
                SourceRead::TimedOut => continue,
            };

            match classify_line(&line) {
                LineClass::Empty | LineClass::Header => {}
                LineClass::Malformed(malformed) => {
                    log::warn!("{}", malformed);
                }
                LineClass::Sample(sample) => {
                    sink.write_sample(&sample)?;
                    if let WindowStatus::Complete { windows_completed } =
                        segmenter.accept_sample()
                    {
                        println!(
                            "[{}] Gesture complete: {} samples saved",
                            ts_now(),
                            segmenter.samples_per_window()
                        );
                        println!(
                            "[{}] Total gestures captured: {}",
                            ts_now(),
                            windows_completed
                        );
                        println!(
                            "[{}] Ready for next gesture (Ctrl+C to stop)",
                            ts_now()
                        );

                        if pause_before_window(config, cancel) == CountdownOutcome::Cancelled {
                            break;
                        }
                        segmenter.begin_capture();
                    }
                }
            }
        }
    }

    sink.flush()?;
    Ok(segmenter.stop())
}

fn pause_before_window(config: &CaptureConfig, cancel: &CancelFlag) -> CountdownOutcome {
    let outcome = countdown::run(config.pause_ticks, config.tick_interval, cancel, |remaining| {
        print!("\r  Starting in {} seconds...", remaining);
        let _ = io::stdout().flush();
    });
    if config.pause_ticks > 0 {
        println!();
    }
    outcome
}

pub fn ts_now() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Sample;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Replays scripted reads; once the script runs out it cancels the
    /// capture, standing in for the operator's Ctrl+C.
    struct ScriptedSource {
        reads: VecDeque<SourceRead>,
        cancel: CancelFlag,
    }

    impl ScriptedSource {
        fn new(lines: &[&str], cancel: CancelFlag) -> Self {
            ScriptedSource {
                reads: lines
                    .iter()
                    .map(|l| SourceRead::Line(l.to_string()))
                    .collect(),
                cancel,
            }
        }
    }

    impl LineSource for ScriptedSource {
        fn next_line(&mut self) -> Result<SourceRead> {
            match self.reads.pop_front() {
                Some(read) => Ok(read),
                None => {
                    self.cancel.cancel();
                    Ok(SourceRead::TimedOut)
                }
            }
        }
    }

    #[derive(Default)]
    struct MemorySink {
        samples: Vec<Sample>,
        flushed: bool,
    }

    impl RecordSink for MemorySink {
        fn write_sample(&mut self, sample: &Sample) -> Result<()> {
            self.samples.push(*sample);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    fn test_config(samples_per_gesture: u32) -> CaptureConfig {
        CaptureConfig {
            samples_per_gesture,
            pause_ticks: 1,
            tick_interval: Duration::from_millis(1),
        }
    }

    fn sample_lines(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("{}.0,0.1,9.8,1.0,2.0,3.0", i))
            .collect()
    }

    #[test]
    fn test_full_window_plus_trailing_malformed_line() {
        // 100 good lines at N = 100, then a 4-field line, then cancel.
        let cancel = CancelFlag::new();
        let lines = sample_lines(100);
        let mut all: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        all.push("1.0,2.0,3.0,4.0");

        let mut source = ScriptedSource::new(&all, cancel.clone());
        let mut sink = MemorySink::default();

        let summary =
            run_capture(&mut source, &mut sink, &test_config(100), &cancel).unwrap();

        assert_eq!(summary.windows_completed, 1);
        assert_eq!(summary.total_samples, 100);
        assert_eq!(sink.samples.len(), 100);
        assert!(sink.flushed);
    }

    #[test]
    fn test_partial_window_counts_in_summary() {
        let cancel = CancelFlag::new();
        let lines = sample_lines(2 * 5 + 3);
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();

        let mut source = ScriptedSource::new(&refs, cancel.clone());
        let mut sink = MemorySink::default();

        let summary =
            run_capture(&mut source, &mut sink, &test_config(5), &cancel).unwrap();

        assert_eq!(summary.windows_completed, 2);
        assert_eq!(summary.total_samples, 13);
        assert_eq!(sink.samples.len(), 13);
    }

    #[test]
    fn test_headers_empties_and_garbage_never_reach_sink() {
        let cancel = CancelFlag::new();
        let mut source = ScriptedSource::new(
            &[
                "aX,aY,aZ,gX,gY,gZ",
                "",
                "1.0,2.0,3.0,4.0,5.0,6.0",
                "not,a,sample",
                "   ",
                "1.0,2.0,bogus,4.0,5.0,6.0",
                "7.0,8.0,9.0,10.0,11.0,12.0",
            ],
            cancel.clone(),
        );
        let mut sink = MemorySink::default();

        let summary =
            run_capture(&mut source, &mut sink, &test_config(100), &cancel).unwrap();

        assert_eq!(summary.windows_completed, 0);
        assert_eq!(summary.total_samples, 2);
        assert_eq!(sink.samples.len(), 2);
        assert_eq!(sink.samples[0].ax, 1.0);
        assert_eq!(sink.samples[1].gz, 12.0);
    }

    #[test]
    fn test_read_timeouts_are_silent_gaps() {
        let cancel = CancelFlag::new();
        let mut source = ScriptedSource {
            reads: VecDeque::from([
                SourceRead::TimedOut,
                SourceRead::Line("1.0,2.0,3.0,4.0,5.0,6.0".to_string()),
                SourceRead::TimedOut,
                SourceRead::Line("6.0,5.0,4.0,3.0,2.0,1.0".to_string()),
            ]),
            cancel: cancel.clone(),
        };
        let mut sink = MemorySink::default();

        let summary =
            run_capture(&mut source, &mut sink, &test_config(100), &cancel).unwrap();

        assert_eq!(summary.total_samples, 2);
        assert_eq!(sink.samples.len(), 2);
    }

    #[test]
    fn test_cancel_during_pre_roll_reports_empty_summary() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let mut source = ScriptedSource::new(&["1,2,3,4,5,6"], cancel.clone());
        let mut sink = MemorySink::default();

        let summary =
            run_capture(&mut source, &mut sink, &test_config(100), &cancel).unwrap();

        assert_eq!(summary.windows_completed, 0);
        assert_eq!(summary.total_samples, 0);
        assert!(sink.samples.is_empty());
        assert!(sink.flushed);
    }

    #[test]
    fn test_sink_order_matches_arrival_order() {
        let cancel = CancelFlag::new();
        let lines = sample_lines(10);
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();

        let mut source = ScriptedSource::new(&refs, cancel.clone());
        let mut sink = MemorySink::default();

        run_capture(&mut source, &mut sink, &test_config(4), &cancel).unwrap();

        for (i, sample) in sink.samples.iter().enumerate() {
            assert_eq!(sample.ax, i as f64);
        }
    }
}
