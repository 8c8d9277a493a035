use std::path::Path;

use serde::Deserialize;
use time::{Date, Month, PrimitiveDateTime, Time};
use tracing::debug;

use crate::detect::require_version;
use crate::domain::Version;
use crate::error::{Result, ScopeError};
use crate::options::SessionOptions;
use crate::settings::modern::read_json_object;
use crate::util::pattern::{find_files, find_files_recursive};
use crate::util::table::{Table, parse_f64};

/// One contiguous capture interval.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordingSegment {
    pub start: PrimitiveDateTime,
    /// Per-frame capture times in milliseconds since the segment started.
    pub timestamps_ms: Vec<f64>,
}

/// `recordingStartTime` object of a segment's `metaData.json`.
#[derive(Deserialize)]
struct StartTimeFields {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    msec: u16,
}

impl StartTimeFields {
    fn to_datetime(&self) -> std::result::Result<PrimitiveDateTime, time::error::ComponentRange> {
        let date = Date::from_calendar_date(self.year, Month::try_from(self.month)?, self.day)?;
        let time = Time::from_hms_milli(self.hour, self.minute, self.second, self.msec)?;
        Ok(PrimitiveDateTime::new(date, time))
    }
}

/// Start time of every segment, read from the `metaData.json` in each direct subfolder of `root`.
pub fn recording_start_times(root: &Path, opts: &SessionOptions) -> Result<Vec<PrimitiveDateTime>> {
    require_version(root, Version::Modern, "reading recording start times")?;

    let files = find_files(root, &format!("*/{}", opts.config_file))?;
    if files.is_empty() {
        return Err(ScopeError::NotFound(format!(
            "the configuration files ('{}') are missing from '{}'",
            opts.config_file,
            root.display()
        )));
    }

    files
        .iter()
        .map(|path| -> Result<PrimitiveDateTime> {
            let mut config = read_json_object(path)?;
            let raw = config.remove("recordingStartTime").ok_or_else(|| {
                ScopeError::SchemaViolation(format!(
                    "'{}' does not contain 'recordingStartTime'",
                    path.display()
                ))
            })?;
            let fields: StartTimeFields = serde_json::from_value(raw).map_err(|e| {
                ScopeError::SchemaViolation(format!(
                    "'recordingStartTime' in '{}': {e}",
                    path.display()
                ))
            })?;
            fields.to_datetime().map_err(|e| {
                ScopeError::SchemaViolation(format!(
                    "'recordingStartTime' in '{}': {e}",
                    path.display()
                ))
            })
        })
        .collect()
}

/// Concatenate segments into one series in seconds.
///
/// A segment whose first sample is negative is shifted up so that it starts
/// at zero; each segment is then offset by the wall-clock time elapsed since
/// the first segment started.
pub fn concatenate_segments(segments: &[RecordingSegment]) -> Vec<f64> {
    let Some(first) = segments.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(segments.iter().map(|s| s.timestamps_ms.len()).sum());
    for seg in segments {
        let mut secs: Vec<f64> = seg.timestamps_ms.iter().map(|ms| ms / 1000.0).collect();
        let baseline = match secs.first() {
            Some(&v) if v < 0.0 => v.abs(),
            _ => 0.0,
        };
        let offset = (seg.start - first.start).as_seconds_f64();
        for v in &mut secs {
            *v += baseline + offset;
        }
        out.extend(secs);
    }
    out
}

fn read_segment_millis(path: &Path, column: &str) -> Result<Vec<f64>> {
    let table = Table::read(path, ',', 0)?;
    let col = table.require_column(column, path)?;
    (0..table.len())
        .map(|row| parse_f64(table.cell(row, col), path))
        .collect()
}

/// Timestamps of every segment under `root`, concatenated in natural segment order.
pub fn read_modern_timestamps(root: &Path, opts: &SessionOptions) -> Result<Vec<f64>> {
    require_version(root, Version::Modern, "reading modern timestamps")?;

    let files = find_files_recursive(root, &opts.timestamps_pattern)?;
    if files.is_empty() {
        return Err(ScopeError::NotFound(format!(
            "the timestamps ('{}') are missing from '{}'",
            opts.timestamps_pattern,
            root.display()
        )));
    }
    let starts = recording_start_times(root, opts)?;
    if starts.len() != files.len() {
        return Err(ScopeError::LengthMismatch {
            what: "recording start times per timestamp file",
            expected: files.len(),
            found: starts.len(),
        });
    }

    let segments = files
        .iter()
        .zip(starts)
        .map(|(path, start)| -> Result<RecordingSegment> {
            Ok(RecordingSegment {
                start,
                timestamps_ms: read_segment_millis(path, &opts.timestamps_column)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let out = concatenate_segments(&segments);
    debug!(segments = segments.len(), frames = out.len(), "modern timestamps");
    Ok(out)
}
