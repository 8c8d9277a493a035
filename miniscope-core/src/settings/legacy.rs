use std::path::Path;

use crate::detect::require_version;
use crate::domain::{DeviceMetadata, Version};
use crate::error::{Result, ScopeError};
use crate::options::SessionOptions;
use crate::schema::DeviceSchema;
use crate::settings::retain_schema_fields;
use crate::util::table::{Table, parse_i64};

const LEGACY_DEVICE_NAME: &str = "Miniscope";
const LEGACY_INT_FIELDS: [&str; 2] = ["excitation", "msCamExposure"];

/// Read `settings_and_notes.dat`: a tab-delimited header row followed by one row of values.
pub fn read_legacy_config(
    folder: &Path,
    schema: &DeviceSchema,
    opts: &SessionOptions,
) -> Result<DeviceMetadata> {
    require_version(folder, Version::Legacy, "reading legacy settings")?;
    let path = folder.join(&opts.settings_file);
    let table = Table::read(&path, '\t', 0)?;
    if table.is_empty() {
        return Err(ScopeError::SchemaViolation(format!(
            "'{}' has no settings row",
            path.display()
        )));
    }

    let mut meta = DeviceMetadata::new();
    meta.insert("name", LEGACY_DEVICE_NAME);
    meta.insert("version", Version::Legacy.tag());
    for field in LEGACY_INT_FIELDS {
        let col = table.require_column(field, &path)?;
        meta.insert(field, parse_i64(table.cell(0, col), &path)?);
    }
    retain_schema_fields(&mut meta, schema);
    Ok(meta)
}
