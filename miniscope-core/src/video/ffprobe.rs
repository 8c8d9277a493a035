use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::VideoProbe;
use crate::error::{Result, ScopeError};

/// Counts frames by running `ffprobe` on the first video stream.
#[derive(Clone, Debug)]
pub struct FfprobeProbe {
    program: PathBuf,
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeProbe {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// True if the program can be spawned.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

fn parse_frame_count(stdout: &str) -> Option<u64> {
    stdout
        .lines()
        .map(|l| l.trim().trim_end_matches(','))
        .find(|l| !l.is_empty())?
        .parse()
        .ok()
}

impl VideoProbe for FfprobeProbe {
    fn frame_count(&self, path: &Path) -> Result<u64> {
        if !path.is_file() {
            return Err(ScopeError::NotFound(format!(
                "video file '{}' does not exist",
                path.display()
            )));
        }
        let output = Command::new(&self.program)
            .args(["-v", "error", "-select_streams", "v:0", "-count_packets"])
            .args(["-show_entries", "stream=nb_read_packets", "-of", "csv=p=0"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ScopeError::ImportUnavailable(format!(
                    "'{}' was not found; install FFmpeg to count video frames",
                    self.program.display()
                )),
                _ => ScopeError::Io(e),
            })?;

        if !output.status.success() {
            return Err(ScopeError::Probe {
                path: path.display().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_frame_count(&stdout).ok_or_else(|| ScopeError::Probe {
            path: path.display().to_string(),
            reason: format!("unexpected ffprobe output '{}'", stdout.trim()),
        })
    }
}
