//! Frame offsets of externally stored video files on a virtual concatenated frame axis.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ScopeError};
use crate::util::pattern::find_files;

pub mod ffprobe;

pub use ffprobe::FfprobeProbe;

/// Frame counting for one video file.
pub trait VideoProbe {
    fn frame_count(&self, path: &Path) -> Result<u64>;
}

/// First frame index of each file if the files were played back to back.
///
/// `files` must already be in playback order. The last file is never probed.
pub fn starting_frames<P: AsRef<Path>>(files: &[P], probe: &dyn VideoProbe) -> Result<Vec<u64>> {
    let Some((_, head)) = files.split_last() else {
        return Err(ScopeError::NotFound("no matching video files".into()));
    };
    let mut out = Vec::with_capacity(files.len());
    out.push(0u64);
    for file in head {
        let frames = probe.frame_count(file.as_ref())?;
        debug!(file = %file.as_ref().display(), frames, "probed video");
        let last = out[out.len() - 1];
        out.push(last + frames);
    }
    Ok(out)
}

/// Video files under `root` matching `pattern`, in natural order.
pub fn external_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let files = find_files(root, pattern)?;
    if files.is_empty() {
        return Err(ScopeError::NotFound(format!(
            "could not find video files matching '{pattern}' in '{}'",
            root.display()
        )));
    }
    Ok(files)
}

/// [`external_files`] followed by [`starting_frames`].
pub fn starting_frames_in(root: &Path, pattern: &str, probe: &dyn VideoProbe) -> Result<Vec<u64>> {
    let files = external_files(root, pattern)?;
    starting_frames(&files, probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FixedProbe {
        counts: HashMap<PathBuf, u64>,
        probed: RefCell<Vec<PathBuf>>,
    }

    impl FixedProbe {
        fn new(counts: &[(&str, u64)]) -> Self {
            Self {
                counts: counts.iter().map(|(p, n)| (PathBuf::from(p), *n)).collect(),
                probed: RefCell::new(Vec::new()),
            }
        }
    }

    impl VideoProbe for FixedProbe {
        fn frame_count(&self, path: &Path) -> Result<u64> {
            self.probed.borrow_mut().push(path.to_path_buf());
            self.counts.get(path).copied().ok_or_else(|| ScopeError::Probe {
                path: path.display().to_string(),
                reason: "unknown file".into(),
            })
        }
    }

    #[test]
    fn offsets_accumulate_and_skip_last() {
        let probe = FixedProbe::new(&[("0.avi", 100), ("1.avi", 150)]);
        let offsets = starting_frames(&["0.avi", "1.avi", "2.avi"], &probe).unwrap();
        assert_eq!(offsets, [0, 100, 250]);
        assert_eq!(
            *probe.probed.borrow(),
            [PathBuf::from("0.avi"), PathBuf::from("1.avi")]
        );
    }

    #[test]
    fn single_file_needs_no_probe() {
        let probe = FixedProbe::new(&[]);
        assert_eq!(starting_frames(&["only.avi"], &probe).unwrap(), [0]);
        assert!(probe.probed.borrow().is_empty());
    }

    #[test]
    fn empty_list_is_not_found() {
        let probe = FixedProbe::new(&[]);
        let files: [&str; 0] = [];
        assert!(matches!(
            starting_frames(&files, &probe),
            Err(ScopeError::NotFound(_))
        ));
    }

    #[test]
    fn probe_failure_propagates() {
        let probe = FixedProbe::new(&[]);
        let err = starting_frames(&["a.avi", "b.avi"], &probe).unwrap_err();
        assert!(matches!(err, ScopeError::Probe { .. }));
    }
}
