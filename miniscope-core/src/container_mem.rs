use std::collections::BTreeMap;

use tracing::info;

use crate::container::{ArchiveContainer, ContainerSnapshot, OpenParams};
use crate::domain::{AnnotationSeries, DeviceMetadata, ImageSeriesRecord};
use crate::error::{Result, ScopeError};
use crate::schema::DeviceSchema;

#[derive(Debug, Default)]
pub struct MemContainer {
    schema: DeviceSchema,
    devices: BTreeMap<String, DeviceMetadata>,
    acquisition: BTreeMap<String, ImageSeriesRecord>,
    annotations: BTreeMap<String, AnnotationSeries>,
}

impl MemContainer {
    pub fn new(params: OpenParams) -> Self {
        Self {
            schema: params.schema,
            ..Default::default()
        }
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn series_count(&self) -> usize {
        self.acquisition.len()
    }
}

impl ArchiveContainer for MemContainer {
    fn schema(&self) -> &DeviceSchema {
        &self.schema
    }

    fn has_device(&self, name: &str) -> bool {
        self.devices.contains_key(name)
    }

    fn device(&self, name: &str) -> Option<&DeviceMetadata> {
        self.devices.get(name)
    }

    fn add_device(&mut self, device: DeviceMetadata) -> Result<()> {
        let name = device
            .name()
            .ok_or_else(|| ScopeError::SchemaViolation("'name' is missing from metadata".into()))?
            .to_string();
        if self.devices.contains_key(&name) {
            return Err(ScopeError::AlreadyExists {
                kind: "device",
                name,
            });
        }
        info!(device = %name, fields = device.len(), "device registered");
        self.devices.insert(name, device);
        Ok(())
    }

    fn has_series(&self, name: &str) -> bool {
        self.acquisition.contains_key(name)
    }

    fn series(&self, name: &str) -> Option<&ImageSeriesRecord> {
        self.acquisition.get(name)
    }

    fn add_series(&mut self, series: ImageSeriesRecord) -> Result<()> {
        if self.acquisition.contains_key(&series.name) {
            return Err(ScopeError::AlreadyExists {
                kind: "image series",
                name: series.name,
            });
        }
        if !self.devices.contains_key(&series.device) {
            return Err(ScopeError::NotFound(format!(
                "device '{}' referenced by '{}' is not registered",
                series.device, series.name
            )));
        }
        info!(
            series = %series.name,
            device = %series.device,
            files = series.external_file.len(),
            frames = series.timestamps.len(),
            "image series registered"
        );
        self.acquisition.insert(series.name.clone(), series);
        Ok(())
    }

    fn add_annotations(&mut self, notes: AnnotationSeries) -> Result<()> {
        if self.annotations.contains_key(&notes.name) {
            return Err(ScopeError::AlreadyExists {
                kind: "annotation series",
                name: notes.name,
            });
        }
        self.annotations.insert(notes.name.clone(), notes);
        Ok(())
    }

    fn snapshot(&self) -> ContainerSnapshot {
        ContainerSnapshot {
            schema: self.schema.clone(),
            devices: self.devices.values().cloned().collect(),
            acquisition: self.acquisition.values().cloned().collect(),
            annotations: self.annotations.values().cloned().collect(),
        }
    }
}
