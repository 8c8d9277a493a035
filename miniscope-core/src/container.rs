// miniscope_core/src/container.rs
use serde::Serialize;

use crate::domain::{AnnotationSeries, DeviceMetadata, ImageSeriesRecord};
use crate::error::Result;
use crate::schema::DeviceSchema;

#[derive(Clone, Debug, Default)]
pub struct OpenParams {
    pub schema: DeviceSchema,
}

/// Everything registered in a container, in name order.
#[derive(Clone, Debug, Serialize)]
pub struct ContainerSnapshot {
    pub schema: DeviceSchema,
    pub devices: Vec<DeviceMetadata>,
    pub acquisition: Vec<ImageSeriesRecord>,
    pub annotations: Vec<AnnotationSeries>,
}

/// Archival container that device and series records are registered into.
///
/// `add_*` reject a name that is already registered; callers that want
/// idempotent registration check with `has_*` first.
pub trait ArchiveContainer: Send + Sync {
    fn schema(&self) -> &DeviceSchema;

    fn has_device(&self, name: &str) -> bool;

    fn device(&self, name: &str) -> Option<&DeviceMetadata>;

    fn add_device(&mut self, device: DeviceMetadata) -> Result<()>;

    fn has_series(&self, name: &str) -> bool;

    fn series(&self, name: &str) -> Option<&ImageSeriesRecord>;

    fn add_series(&mut self, series: ImageSeriesRecord) -> Result<()>;

    fn add_annotations(&mut self, notes: AnnotationSeries) -> Result<()>;

    fn snapshot(&self) -> ContainerSnapshot;
}
