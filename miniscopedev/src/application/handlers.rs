use std::path::{Component, Path, PathBuf};

use miniscope_core::container::OpenParams;
use miniscope_core::container_factory::{Backend, open_container};
use miniscope_core::error::Result;
use miniscope_core::{
    ArchiveContainer, DeviceSchema, FfprobeProbe, ImageSeriesRequest, SeriesMetadata, Session, SessionOptions,
    Version, add_device, add_image_series, detect_version, read_device_config,
};
use serde::Serialize;
use tracing::{debug, info};

fn read_json<T: serde::de::DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(p) => Ok(serde_json::from_str(&std::fs::read_to_string(p)?)?),
        None => Ok(T::default()),
    }
}

fn load_options(
    options: Option<PathBuf>,
    cam_num: Option<i64>,
    timestamps_pattern: Option<String>,
    video_pattern: Option<String>,
) -> Result<SessionOptions> {
    let mut opts: SessionOptions = read_json(options.as_deref())?;
    if let Some(n) = cam_num {
        opts.cam_num = n;
    }
    if let Some(p) = timestamps_pattern {
        opts.timestamps_pattern = p;
    }
    if let Some(p) = video_pattern {
        opts.video_pattern = p;
    }
    Ok(opts)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Videos recorded by the device in `series_device`: the same device folder in
/// every segment of a modern session, or the folder itself for a legacy one.
fn series_video_pattern(version: Version, series_device: &Path) -> String {
    let parts: Vec<String> = series_device
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => Some(p.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    match (version, parts.last()) {
        (Version::Modern, Some(device)) => format!("*/{device}/*.avi"),
        (_, None) => "*.avi".to_string(),
        _ => format!("{}/*.avi", parts.join("/")),
    }
}

pub fn handle_detect(session: PathBuf) -> Result<()> {
    let version = detect_version(&session)?;
    println!("{} {}", version.tag(), version);
    Ok(())
}

pub fn handle_config(folder: PathBuf, schema: Option<PathBuf>, options: Option<PathBuf>) -> Result<()> {
    let schema: DeviceSchema = read_json(schema.as_deref())?;
    let opts = load_options(options, None, None, None)?;
    let meta = read_device_config(&folder, &schema, &opts)?;
    print_json(&meta)
}

pub fn handle_timestamps(
    session: PathBuf,
    cam_num: Option<i64>,
    timestamps_pattern: Option<String>,
    options: Option<PathBuf>,
) -> Result<()> {
    let opts = load_options(options, cam_num, timestamps_pattern, None)?;
    let session = Session::open(&session, opts)?;
    print_json(&session.timestamps()?)
}

pub fn handle_start_times(session: PathBuf, options: Option<PathBuf>) -> Result<()> {
    let opts = load_options(options, None, None, None)?;
    let session = Session::open(&session, opts)?;
    for start in session.recording_start_times()? {
        println!("{start}");
    }
    Ok(())
}

pub fn handle_notes(session: PathBuf, options: Option<PathBuf>) -> Result<()> {
    let opts = load_options(options, None, None, None)?;
    let session = Session::open(&session, opts)?;
    match session.notes()? {
        Some(notes) => print_json(&notes),
        None => {
            info!("session has no notes");
            Ok(())
        }
    }
}

pub fn handle_frames(
    session: PathBuf,
    video_pattern: Option<String>,
    ffprobe: PathBuf,
    options: Option<PathBuf>,
) -> Result<()> {
    let opts = load_options(options, None, None, video_pattern)?;
    let session = Session::open(&session, opts)?;
    let files = session.external_files()?;
    let frames = session.starting_frames(&files, &FfprobeProbe::new(ffprobe))?;
    for (file, start) in files.iter().zip(frames) {
        println!("{:>10}  {}", start, relative_to(session.root(), file));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_ingest(
    session: PathBuf,
    devices: Vec<PathBuf>,
    series_device: PathBuf,
    series_name: String,
    description: Option<String>,
    notes: bool,
    cam_num: Option<i64>,
    timestamps_pattern: Option<String>,
    video_pattern: Option<String>,
    ffprobe: PathBuf,
    schema: Option<PathBuf>,
    options: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let derive_videos = video_pattern.is_none();
    let mut opts = load_options(options, cam_num, timestamps_pattern, video_pattern)?;
    if derive_videos && opts.video_pattern == SessionOptions::default().video_pattern {
        opts.video_pattern = series_video_pattern(detect_version(&session)?, &series_device);
        debug!(pattern = %opts.video_pattern, "video pattern derived from series device");
    }
    let schema: DeviceSchema = read_json(schema.as_deref())?;
    let session = Session::open(&session, opts)?;
    let mut container = open_container(Backend::Memory, OpenParams { schema });
    let schema = container.schema().clone();

    for folder in &devices {
        let meta = session.device_config(folder, &schema)?;
        add_device(container.as_mut(), &meta)?;
    }

    let files = session.external_files()?;
    let starting_frames = session.starting_frames(&files, &FfprobeProbe::new(ffprobe))?;
    let request = ImageSeriesRequest {
        series: SeriesMetadata {
            name: series_name,
            description,
        },
        device: session.device_config(&series_device, &schema)?,
        timestamps: session.timestamps()?,
        external_files: files
            .iter()
            .map(|f| relative_to(session.root(), f))
            .collect(),
        starting_frames: Some(starting_frames),
    };
    add_image_series(container.as_mut(), request)?;

    if notes {
        if let Some(series) = session.notes()? {
            container.add_annotations(series)?;
        }
    }

    let snapshot = serde_json::to_string_pretty(&container.snapshot())?;
    match out {
        Some(path) => {
            std::fs::write(&path, snapshot)?;
            info!(path = %path.display(), "container snapshot written");
        }
        None => println!("{snapshot}"),
    }
    Ok(())
}
