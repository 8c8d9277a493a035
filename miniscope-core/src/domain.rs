// miniscope_core/src/domain.rs
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Acquisition software generation that produced a session folder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// `settings_and_notes.dat` / `timestamp.dat` (Miniscope V3 software).
    Legacy,
    /// Per-device `metaData.json` and `timeStamps.csv` (Miniscope V4 software).
    Modern,
}

impl Version {
    /// Version tag stored on device records.
    pub fn tag(self) -> &'static str {
        match self {
            Version::Legacy => "V3",
            Version::Modern => "V4",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Legacy => write!(f, "legacy ({})", self.tag()),
            Version::Modern => write!(f, "modern ({})", self.tag()),
        }
    }
}

/// Canonical device metadata keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceMetadata(Map<String, Value>);

impl DeviceMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }
}

impl From<Map<String, Value>> for DeviceMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Free-text notes with their elapsed times, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSeries {
    pub name: String,
    pub description: String,
    pub data: Vec<String>,
    pub timestamps: Vec<f64>,
}

/// Name and description of an image series before it is bound to a device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Image series backed by external video files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSeriesRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub device: String,
    pub format: String,
    pub external_file: Vec<String>,
    pub starting_frame: Vec<u64>,
    pub timestamps: Vec<f64>,
}
