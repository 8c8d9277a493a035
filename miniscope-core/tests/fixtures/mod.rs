#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use miniscope_core::VideoProbe;
use miniscope_core::error::{Result, ScopeError};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Session folder on disk, removed when dropped.
pub struct SessionFixture {
    pub dir: TempDir,
}

impl SessionFixture {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: impl AsRef<[u8]>) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture folder");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
    }

    /// Two modern segments, `seg2` then `seg10`, started ten seconds apart.
    pub fn modern() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        fixture.write_segment("seg2", 28, &[0.0, 33.0, 66.0]);
        fixture.write_segment("seg10", 38, &[-500.0, 500.0, 1500.0]);
        fixture
    }

    fn write_segment(&self, segment: &str, second: u8, millis: &[f64]) {
        self.write(
            &format!("{segment}/metaData.json"),
            json!({
                "animalName": "C6-J588",
                "experimentName": "Disc5",
                "recordingStartTime": {
                    "year": 2021, "month": 10, "day": 7,
                    "hour": 15, "minute": 3, "second": second, "msec": 0
                }
            })
            .to_string(),
        );
        self.write(
            &format!("{segment}/Miniscope/metaData.json"),
            miniscope_config().to_string(),
        );
        self.write(
            &format!("{segment}/BehavCam_2/metaData.json"),
            behav_cam_config().to_string(),
        );
        let mut csv = String::from("Frame Number,Time Stamp (ms),Buffer Index\n");
        for (i, ms) in millis.iter().enumerate() {
            csv.push_str(&format!("{i},{ms},0\n"));
        }
        self.write(&format!("{segment}/Miniscope/timeStamps.csv"), &csv);
        self.write(&format!("{segment}/Miniscope/0.avi"), b"");
        self.write(&format!("{segment}/BehavCam_2/0.avi"), b"");
    }

    /// Legacy session: settings, notes and a two-camera timestamp table at the root.
    pub fn legacy() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        fixture.write(
            "settings_and_notes.dat",
            "animal\texcitation\tmsCamExposure\trecordLength\t\n\
             mouse1\t12\t255\t0\t\n\
             \n\
             elapsedTime\tNote\n\
             1500\tstart\n\
             62000\tlight on\n",
        );
        fixture.write(
            "timestamp.dat",
            "camNum\tframeNum\tsysClock\tbuffer\n\
             0\t1\t14853\t1\n\
             1\t1\t14860\t1\n\
             0\t2\t14886\t1\n\
             1\t2\t14893\t2\n\
             1\t3\t14926\t1\n",
        );
        fixture.write("msCam1.avi", b"");
        fixture.write("msCam2.avi", b"");
        fixture.write("msCam10.avi", b"");
        fixture
    }
}

pub fn miniscope_config() -> Value {
    json!({
        "compression": "FFV1",
        "deviceDirectory": "C:/mData/2021_10_07/C6-J588_Disc5/15_03_28/Miniscope",
        "deviceID": 0,
        "deviceName": "Miniscope",
        "deviceType": "Miniscope_V4_BNO",
        "ewl": 70,
        "frameRate": "20FPS",
        "framesPerFile": 1000,
        "gain": 1,
        "led0": 10,
        "ROI": {"height": 608, "leftEdge": 0, "topEdge": 0, "width": 608}
    })
}

pub fn behav_cam_config() -> Value {
    json!({
        "compression": "MJPG",
        "deviceDirectory": "C:/mData/2021_10_07/C6-J588_Disc5/15_03_28/BehavCam_2",
        "deviceID": 2,
        "deviceName": "BehavCam 2",
        "deviceType": "WebCam-1920x1080",
        "frameRate": "15FPS",
        "framesPerFile": 1000,
        "ROI": {"height": 720, "leftEdge": 0, "topEdge": 0, "width": 1280},
        "cameraCalibration": {"fx": 1.0}
    })
}

/// Frame counts keyed by file name; every other file fails to probe.
pub struct StubProbe {
    pub counts: HashMap<PathBuf, u64>,
}

impl StubProbe {
    pub fn new(counts: impl IntoIterator<Item = (PathBuf, u64)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }
}

impl VideoProbe for StubProbe {
    fn frame_count(&self, path: &Path) -> Result<u64> {
        self.counts.get(path).copied().ok_or_else(|| ScopeError::Probe {
            path: path.display().to_string(),
            reason: "not stubbed".into(),
        })
    }
}
