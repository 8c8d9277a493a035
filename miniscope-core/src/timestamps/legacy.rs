use std::path::Path;

use tracing::debug;

use crate::detect::require_version;
use crate::domain::Version;
use crate::error::{Result, ScopeError};
use crate::options::SessionOptions;
use crate::util::table::{Table, parse_f64, parse_i64};

/// Read `timestamp.dat` and return the `sysClock` values of one camera feed in seconds.
///
/// The first sample is forced to 0.0: the legacy firmware does not record a
/// true elapsed time for it.
pub fn read_legacy_timestamps(
    folder: &Path,
    cam_num: i64,
    opts: &SessionOptions,
) -> Result<Vec<f64>> {
    require_version(folder, Version::Legacy, "reading legacy timestamps")?;

    let path = folder.join(&opts.legacy_timestamps_file);
    let table = Table::read(&path, '\t', 0)?;
    let cam_col = table.require_column("camNum", &path)?;
    let clock_col = table.require_column("sysClock", &path)?;

    let mut out = Vec::new();
    for row in 0..table.len() {
        if parse_i64(table.cell(row, cam_col), &path)? != cam_num {
            continue;
        }
        out.push(parse_f64(table.cell(row, clock_col), &path)? / 1000.0);
    }
    let Some(first) = out.first_mut() else {
        return Err(ScopeError::NotFound(format!(
            "no timestamps for camera {cam_num} in '{}'",
            path.display()
        )));
    };
    *first = 0.0;
    debug!(cam_num, frames = out.len(), "legacy timestamps");
    Ok(out)
}
