//! Device configuration parsing for both acquisition software generations.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::detect::detect_version;
use crate::domain::{DeviceMetadata, Version};
use crate::error::{Result, ScopeError};
use crate::options::SessionOptions;
use crate::schema::{DeviceSchema, FieldKind};

pub mod legacy;
pub mod modern;

pub use legacy::read_legacy_config;
pub use modern::read_modern_config;

/// Read the device configuration stored in `folder`, dispatching on its detected version.
pub fn read_device_config(
    folder: &Path,
    schema: &DeviceSchema,
    opts: &SessionOptions,
) -> Result<DeviceMetadata> {
    match detect_version(folder)? {
        Version::Legacy => read_legacy_config(folder, schema, opts),
        Version::Modern => read_modern_config(folder, schema, opts),
    }
}

/// Replace an object-valued `ROI` with `[height, width]`.
pub fn flatten_roi(meta: &mut DeviceMetadata) -> Result<()> {
    let Some(Value::Object(roi)) = meta.get("ROI") else {
        return Ok(());
    };
    let dim = |key: &str| {
        roi.get(key).cloned().ok_or_else(|| {
            ScopeError::SchemaViolation(format!("'ROI' is missing its '{key}' entry"))
        })
    };
    let flat = Value::Array(vec![dim("height")?, dim("width")?]);
    meta.insert("ROI", flat);
    Ok(())
}

/// Drop every field the schema does not know, warning once with all of their names.
/// `name` is always kept. Returns the dropped field names.
pub(crate) fn retain_schema_fields(
    meta: &mut DeviceMetadata,
    schema: &DeviceSchema,
) -> Vec<String> {
    let dropped: Vec<String> = meta
        .fields()
        .filter(|f| *f != "name" && !schema.contains(f))
        .map(str::to_string)
        .collect();
    if dropped.is_empty() {
        return dropped;
    }
    for field in &dropped {
        meta.remove(field);
    }
    warn!(
        device = meta.name().unwrap_or_default(),
        fields = ?dropped,
        "configuration fields are not part of the device schema and were dropped"
    );
    dropped
}

/// Integer literals in float-typed fields become floats.
pub(crate) fn coerce_float_fields(meta: &mut DeviceMetadata, schema: &DeviceSchema) {
    for (field, value) in meta.as_map_mut().iter_mut() {
        if schema.kind_of(field) != Some(FieldKind::Float) {
            continue;
        }
        if value.is_i64() || value.is_u64() {
            if let Some(f) = value.as_f64() {
                *value = Value::from(f);
            }
        }
    }
}
