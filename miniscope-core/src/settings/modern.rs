use std::path::Path;

use serde_json::{Map, Value};

use crate::detect::require_version;
use crate::domain::{DeviceMetadata, Version};
use crate::error::{Result, ScopeError};
use crate::options::SessionOptions;
use crate::schema::DeviceSchema;
use crate::settings::{coerce_float_fields, flatten_roi, retain_schema_fields};

/// Local-machine artifacts that never belong in archived metadata.
const INTERNAL_FIELDS: [&str; 2] = ["deviceDirectory", "deviceID"];

/// Read the `metaData.json` written by the modern software for one device folder.
pub fn read_modern_config(
    folder: &Path,
    schema: &DeviceSchema,
    opts: &SessionOptions,
) -> Result<DeviceMetadata> {
    require_version(folder, Version::Modern, "reading modern settings")?;
    let path = folder.join(&opts.config_file);
    let raw = read_json_object(&path)?;
    canonicalize(raw, schema)
}

pub(crate) fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    if !path.is_file() {
        return Err(ScopeError::NotFound(format!(
            "configuration file '{}' does not exist",
            path.display()
        )));
    }
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(map),
        _ => Err(ScopeError::SchemaViolation(format!(
            "'{}' is not a JSON object",
            path.display()
        ))),
    }
}

/// Turn a raw modern configuration object into canonical device metadata.
pub fn canonicalize(mut raw: Map<String, Value>, schema: &DeviceSchema) -> Result<DeviceMetadata> {
    let name = match raw.remove("deviceName") {
        Some(Value::String(name)) => name.replace(' ', ""),
        Some(_) => {
            return Err(ScopeError::SchemaViolation(
                "'deviceName' must be a string".into(),
            ));
        }
        None => {
            return Err(ScopeError::SchemaViolation(
                "'deviceName' field is missing from the configuration file".into(),
            ));
        }
    };
    raw.insert("name".into(), Value::String(name));
    for field in INTERNAL_FIELDS {
        raw.remove(field);
    }
    raw.entry("version")
        .or_insert_with(|| Value::from(Version::Modern.tag()));

    let mut meta = DeviceMetadata::from(raw);
    flatten_roi(&mut meta)?;
    retain_schema_fields(&mut meta, schema);
    coerce_float_fields(&mut meta, schema);
    Ok(meta)
}
