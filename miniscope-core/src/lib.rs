#![forbid(unsafe_code)]

pub mod error;
pub mod options;
pub mod schema;

pub mod util {
    pub mod natsort;
    pub mod pattern;
    pub mod table;
}

pub mod domain;
pub mod detect;
pub mod notes;
pub mod settings;
pub mod timestamps;
pub mod video;

pub mod container;
pub mod container_factory;
pub mod container_mem;
pub mod record;

pub mod session;

// Re-exports: stable API surface
pub use container::{ArchiveContainer, ContainerSnapshot, OpenParams};
pub use detect::detect_version;
pub use domain::{AnnotationSeries, DeviceMetadata, ImageSeriesRecord, SeriesMetadata, Version};
pub use options::SessionOptions;
pub use record::{ImageSeriesRequest, add_device, add_image_series};
pub use schema::DeviceSchema;
pub use session::Session;
pub use settings::read_device_config;
pub use timestamps::read_timestamps;
pub use video::{FfprobeProbe, VideoProbe, starting_frames};
