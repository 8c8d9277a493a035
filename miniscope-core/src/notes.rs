use std::path::Path;

use crate::detect::require_version;
use crate::domain::{AnnotationSeries, Version};
use crate::error::{Result, ScopeError};
use crate::options::SessionOptions;
use crate::util::table::{Table, parse_f64};

/// Raw lines of `settings_and_notes.dat` that precede the notes table.
const NOTES_HEADER_LINES: usize = 3;

/// Read the `(elapsedTime, Note)` table from a legacy settings file.
///
/// Returns `Ok(None)` when the table has no rows. Modern sessions fail with
/// `VersionMismatch`; their notes format is not supported yet.
pub fn read_notes(folder: &Path, opts: &SessionOptions) -> Result<Option<AnnotationSeries>> {
    require_version(folder, Version::Legacy, "reading notes")?;

    let path = folder.join(&opts.settings_file);
    let table = Table::read(&path, '\t', NOTES_HEADER_LINES)?;
    if table.is_empty() {
        return Ok(None);
    }
    let note_col = table.require_column("Note", &path)?;
    let time_col = table.require_column("elapsedTime", &path)?;

    let mut data = Vec::with_capacity(table.len());
    let mut timestamps = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        data.push(table.cell(row, note_col).to_string());
        timestamps.push(parse_f64(table.cell(row, time_col), &path)? / 1000.0);
    }
    Ok(Some(AnnotationSeries {
        name: "notes".to_string(),
        description: "read from miniscope settings_and_notes.dat file".to_string(),
        data,
        timestamps,
    }))
}

/// Notes written alongside modern recordings (e.g. head orientation tables).
///
/// Modern notes are not supported: any modern session fails with
/// `Unsupported`, other sessions with `VersionMismatch`.
pub fn read_modern_notes(folder: &Path) -> Result<Option<AnnotationSeries>> {
    require_version(folder, Version::Modern, "reading modern notes")?;
    Err(ScopeError::Unsupported(
        "notes export for the modern format is not implemented".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_legacy_notes_in_seconds() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("settings_and_notes.dat"),
            "animal\texcitation\tmsCamExposure\nm1\t10\t100\n\nelapsedTime\tNote\n1500\tstart\n62000\tmoved\n",
        )
        .unwrap();
        let notes = read_notes(tmp.path(), &SessionOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(notes.name, "notes");
        assert_eq!(notes.data, ["start", "moved"]);
        assert_eq!(notes.timestamps, [1.5, 62.0]);
    }

    #[test]
    fn empty_notes_table_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("settings_and_notes.dat"),
            "animal\texcitation\tmsCamExposure\nm1\t10\t100\n\nelapsedTime\tNote\n",
        )
        .unwrap();
        assert!(read_notes(tmp.path(), &SessionOptions::default()).unwrap().is_none());
    }

    #[test]
    fn modern_session_is_version_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("metaData.json"), "{}").unwrap();
        let err = read_notes(tmp.path(), &SessionOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ScopeError::VersionMismatch {
                version: Version::Modern,
                ..
            }
        ));
    }

    #[test]
    fn modern_notes_unsupported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("metaData.json"), "{}").unwrap();
        assert!(matches!(
            read_modern_notes(tmp.path()),
            Err(ScopeError::Unsupported(_))
        ));
    }
}
