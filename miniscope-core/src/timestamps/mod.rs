//! Per-frame timestamps in seconds, aligned one-to-one with concatenated video frames.

use std::path::Path;

use crate::detect::detect_version;
use crate::domain::Version;
use crate::error::Result;
use crate::options::SessionOptions;

pub mod legacy;
pub mod modern;

pub use legacy::read_legacy_timestamps;
pub use modern::{RecordingSegment, concatenate_segments, read_modern_timestamps, recording_start_times};

/// Timestamp series for the session under `root`, in seconds.
///
/// Legacy sessions select `opts.cam_num` from `timestamp.dat`; modern
/// sessions concatenate every segment matched by `opts.timestamps_pattern`.
pub fn read_timestamps(root: &Path, opts: &SessionOptions) -> Result<Vec<f64>> {
    match detect_version(root)? {
        Version::Legacy => read_legacy_timestamps(root, opts.cam_num, opts),
        Version::Modern => read_modern_timestamps(root, opts),
    }
}
