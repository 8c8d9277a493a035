use tracing::debug;

use crate::container::ArchiveContainer;
use crate::domain::{DeviceMetadata, ImageSeriesRecord, SeriesMetadata};
use crate::error::{Result, ScopeError};
use crate::settings::flatten_roi;

/// Inputs for one externally stored image series.
#[derive(Clone, Debug, Default)]
pub struct ImageSeriesRequest {
    pub series: SeriesMetadata,
    /// Device the series is linked to; registered first if the container lacks it.
    pub device: DeviceMetadata,
    pub timestamps: Vec<f64>,
    pub external_files: Vec<String>,
    /// May be omitted when there is exactly one external file.
    pub starting_frames: Option<Vec<u64>>,
}

fn prepare_device(metadata: &DeviceMetadata) -> Result<(String, DeviceMetadata)> {
    let name = metadata
        .name()
        .ok_or_else(|| ScopeError::SchemaViolation("'name' is missing from metadata".into()))?
        .to_string();
    let mut device = metadata.clone();
    flatten_roi(&mut device)?;
    Ok((name, device))
}

/// Register a device unless one with the same name is already present.
pub fn add_device(container: &mut dyn ArchiveContainer, metadata: &DeviceMetadata) -> Result<()> {
    let (name, device) = prepare_device(metadata)?;
    if container.has_device(&name) {
        debug!(device = %name, "device already registered");
        return Ok(());
    }
    container.add_device(device)
}

fn resolve_starting_frames(request: &ImageSeriesRequest) -> Result<Vec<u64>> {
    let files = request.external_files.len();
    if files == 0 {
        return Err(ScopeError::SchemaViolation(
            "'external_files' must be specified".into(),
        ));
    }
    match &request.starting_frames {
        None if files == 1 => Ok(vec![0]),
        None => Err(ScopeError::LengthMismatch {
            what: "starting frames per external file",
            expected: files,
            found: 0,
        }),
        Some(frames) if frames.len() != files => Err(ScopeError::LengthMismatch {
            what: "starting frames per external file",
            expected: files,
            found: frames.len(),
        }),
        Some(frames) => Ok(frames.clone()),
    }
}

/// Register an external image series and, if needed, its device.
///
/// All validation happens before the first write, so a rejected request
/// leaves the container untouched. A series whose name is already present
/// is left as is.
pub fn add_image_series(
    container: &mut dyn ArchiveContainer,
    request: ImageSeriesRequest,
) -> Result<()> {
    let starting_frame = resolve_starting_frames(&request)?;
    let (device_name, device) = prepare_device(&request.device)?;
    if request.series.name.is_empty() {
        return Err(ScopeError::SchemaViolation(
            "image series 'name' is missing from metadata".into(),
        ));
    }

    if container.has_series(&request.series.name) {
        debug!(series = %request.series.name, "image series already registered");
        return Ok(());
    }
    if !container.has_device(&device_name) {
        container.add_device(device)?;
    }

    container.add_series(ImageSeriesRecord {
        name: request.series.name,
        description: request.series.description,
        device: device_name,
        format: "external".to_string(),
        external_file: request.external_files,
        starting_frame,
        timestamps: request.timestamps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::OpenParams;
    use crate::container_mem::MemContainer;
    use serde_json::json;

    fn device(name: &str) -> DeviceMetadata {
        let mut d = DeviceMetadata::new();
        d.insert("name", name);
        d.insert("compression", "MJPG");
        d
    }

    fn request(files: &[&str], frames: Option<Vec<u64>>) -> ImageSeriesRequest {
        ImageSeriesRequest {
            series: SeriesMetadata {
                name: "BehavCamImageSeries".into(),
                description: Some("behavior video".into()),
            },
            device: device("BehavCam2"),
            timestamps: vec![0.0, 0.5, 1.0],
            external_files: files.iter().map(|f| f.to_string()).collect(),
            starting_frames: frames,
        }
    }

    #[test]
    fn device_registration_is_idempotent() {
        let mut c = MemContainer::new(OpenParams::default());
        add_device(&mut c, &device("Miniscope")).unwrap();
        add_device(&mut c, &device("Miniscope")).unwrap();
        assert_eq!(c.device_count(), 1);
    }

    #[test]
    fn device_roi_flattened_on_registration() {
        let mut c = MemContainer::new(OpenParams::default());
        let mut d = device("BehavCam2");
        d.insert("ROI", json!({"height": 720, "width": 1280}));
        add_device(&mut c, &d).unwrap();
        assert_eq!(c.device("BehavCam2").unwrap().get("ROI"), Some(&json!([720, 1280])));
    }

    #[test]
    fn device_without_name_rejected() {
        let mut c = MemContainer::new(OpenParams::default());
        let err = add_device(&mut c, &DeviceMetadata::new()).unwrap_err();
        assert!(matches!(err, ScopeError::SchemaViolation(_)));
    }

    #[test]
    fn single_file_gets_implicit_zero_offset() {
        let mut c = MemContainer::new(OpenParams::default());
        add_image_series(&mut c, request(&["0.avi"], None)).unwrap();
        let s = c.series("BehavCamImageSeries").unwrap();
        assert_eq!(s.starting_frame, [0]);
        assert_eq!(s.format, "external");
        assert_eq!(s.device, "BehavCam2");
        assert!(c.has_device("BehavCam2"));
    }

    #[test]
    fn mismatched_lengths_write_nothing() {
        let mut c = MemContainer::new(OpenParams::default());
        let err = add_image_series(&mut c, request(&["0.avi", "1.avi"], Some(vec![0])))
            .unwrap_err();
        assert!(matches!(
            err,
            ScopeError::LengthMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
        let err = add_image_series(&mut c, request(&["0.avi", "1.avi"], None)).unwrap_err();
        assert!(matches!(err, ScopeError::LengthMismatch { .. }));
        assert_eq!(c.device_count(), 0);
        assert_eq!(c.series_count(), 0);
    }

    #[test]
    fn empty_external_files_rejected() {
        let mut c = MemContainer::new(OpenParams::default());
        let err = add_image_series(&mut c, request(&[], None)).unwrap_err();
        assert!(matches!(err, ScopeError::SchemaViolation(_)));
    }

    #[test]
    fn series_registration_is_idempotent() {
        let mut c = MemContainer::new(OpenParams::default());
        add_image_series(&mut c, request(&["0.avi", "1.avi"], Some(vec![0, 1000]))).unwrap();
        let mut again = request(&["x.avi"], None);
        again.timestamps = vec![9.0];
        add_image_series(&mut c, again).unwrap();
        assert_eq!(c.series_count(), 1);
        let s = c.series("BehavCamImageSeries").unwrap();
        assert_eq!(s.starting_frame, [0, 1000]);
        assert_eq!(s.timestamps, [0.0, 0.5, 1.0]);
    }

    #[test]
    fn existing_device_is_reused() {
        let mut c = MemContainer::new(OpenParams::default());
        let mut d = device("BehavCam2");
        d.insert("compression", "FFV1");
        add_device(&mut c, &d).unwrap();
        add_image_series(&mut c, request(&["0.avi"], None)).unwrap();
        assert_eq!(c.device_count(), 1);
        assert_eq!(
            c.device("BehavCam2").unwrap().get("compression"),
            Some(&json!("FFV1"))
        );
    }
}
