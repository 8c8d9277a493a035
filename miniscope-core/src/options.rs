use serde::{Deserialize, Serialize};

pub const LEGACY_SETTINGS_FILE: &str = "settings_and_notes.dat";
pub const LEGACY_TIMESTAMPS_FILE: &str = "timestamp.dat";
pub const MODERN_CONFIG_FILE: &str = "metaData.json";

/// File names and patterns used to resolve a session folder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub settings_file: String,
    pub legacy_timestamps_file: String,
    pub config_file: String,
    /// Matched at any depth below the session root.
    pub timestamps_pattern: String,
    pub timestamps_column: String,
    /// Matched relative to the session root.
    pub video_pattern: String,
    /// Camera feed selected from the legacy timestamp table.
    pub cam_num: i64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            settings_file: LEGACY_SETTINGS_FILE.to_string(),
            legacy_timestamps_file: LEGACY_TIMESTAMPS_FILE.to_string(),
            config_file: MODERN_CONFIG_FILE.to_string(),
            timestamps_pattern: "Miniscope/timeStamps.csv".to_string(),
            timestamps_column: "Time Stamp (ms)".to_string(),
            video_pattern: "*/BehavCam*/*.avi".to_string(),
            cam_num: 1,
        }
    }
}
