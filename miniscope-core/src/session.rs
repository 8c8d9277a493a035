use std::path::{Path, PathBuf};

use time::PrimitiveDateTime;
use tracing::info;

use crate::detect::detect_version;
use crate::domain::{AnnotationSeries, DeviceMetadata, Version};
use crate::error::{Result, ScopeError};
use crate::notes::{read_modern_notes, read_notes};
use crate::options::SessionOptions;
use crate::schema::DeviceSchema;
use crate::settings::{read_legacy_config, read_modern_config};
use crate::timestamps::{read_legacy_timestamps, read_modern_timestamps, recording_start_times};
use crate::video::{VideoProbe, external_files, starting_frames};

/// One acquisition session folder, classified once on open.
///
/// Every accessor re-reads the files it needs.
#[derive(Clone, Debug)]
pub struct Session {
    root: PathBuf,
    version: Version,
    opts: SessionOptions,
}

impl Session {
    pub fn open(root: &Path, opts: SessionOptions) -> Result<Self> {
        let version = detect_version(root)?;
        info!(root = %root.display(), %version, "session opened");
        Ok(Self {
            root: root.to_path_buf(),
            version,
            opts,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn options(&self) -> &SessionOptions {
        &self.opts
    }

    /// Device configuration of `folder`, relative to the session root.
    /// Legacy sessions keep their settings at the root, so `folder` is usually empty there.
    pub fn device_config(&self, folder: &Path, schema: &DeviceSchema) -> Result<DeviceMetadata> {
        let dir = self.root.join(folder);
        match self.version {
            Version::Legacy => read_legacy_config(&dir, schema, &self.opts),
            Version::Modern => read_modern_config(&dir, schema, &self.opts),
        }
    }

    pub fn timestamps(&self) -> Result<Vec<f64>> {
        match self.version {
            Version::Legacy => read_legacy_timestamps(&self.root, self.opts.cam_num, &self.opts),
            Version::Modern => read_modern_timestamps(&self.root, &self.opts),
        }
    }

    pub fn recording_start_times(&self) -> Result<Vec<PrimitiveDateTime>> {
        match self.version {
            Version::Legacy => Err(ScopeError::VersionMismatch {
                operation: "reading recording start times",
                version: self.version,
            }),
            Version::Modern => recording_start_times(&self.root, &self.opts),
        }
    }

    pub fn notes(&self) -> Result<Option<AnnotationSeries>> {
        match self.version {
            Version::Legacy => read_notes(&self.root, &self.opts),
            Version::Modern => read_modern_notes(&self.root),
        }
    }

    /// Video files matching `opts.video_pattern`, in natural order.
    pub fn external_files(&self) -> Result<Vec<PathBuf>> {
        external_files(&self.root, &self.opts.video_pattern)
    }

    pub fn starting_frames(&self, files: &[PathBuf], probe: &dyn VideoProbe) -> Result<Vec<u64>> {
        starting_frames(files, probe)
    }
}
