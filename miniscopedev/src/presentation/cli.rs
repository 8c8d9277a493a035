use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "miniscopedev CLI (alpha)", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print whether a session folder is legacy (V3) or modern (V4)
    Detect { session: PathBuf },

    /// Print the canonical device metadata of one device folder
    Config {
        folder: PathBuf,

        /// JSON file with the device schema (defaults to the Miniscope fields)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// JSON file with session options
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Print the reconciled timestamp series in seconds
    Timestamps {
        session: PathBuf,

        /// camera feed to select (legacy sessions only)
        #[arg(long)]
        cam_num: Option<i64>,

        /// timestamp file pattern, matched at any depth (modern sessions only)
        #[arg(long)]
        timestamps_pattern: Option<String>,

        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Print the recording start time of every segment (modern sessions only)
    StartTimes {
        session: PathBuf,

        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Print the notes table of a legacy session
    Notes {
        session: PathBuf,

        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Print external video files and their starting frames
    Frames {
        session: PathBuf,

        /// video file pattern relative to the session root
        #[arg(long)]
        video_pattern: Option<String>,

        /// ffprobe executable used to count frames
        #[arg(long, default_value = "ffprobe")]
        ffprobe: PathBuf,

        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Register devices and one external image series, then write the container as JSON
    Ingest {
        session: PathBuf,

        /// device folder (relative to the session) to register; repeatable
        #[arg(long = "device")]
        devices: Vec<PathBuf>,

        /// device folder the image series is linked to ("." for a legacy session root)
        #[arg(long)]
        series_device: PathBuf,

        /// name of the image series
        #[arg(long, default_value = "OnePhotonSeries")]
        series_name: String,

        #[arg(long)]
        description: Option<String>,

        /// also register the session notes (legacy sessions only)
        #[arg(long)]
        notes: bool,

        #[arg(long)]
        cam_num: Option<i64>,

        #[arg(long)]
        timestamps_pattern: Option<String>,

        /// video file pattern; defaults to the videos of the series device
        #[arg(long)]
        video_pattern: Option<String>,

        #[arg(long, default_value = "ffprobe")]
        ffprobe: PathBuf,

        #[arg(long)]
        schema: Option<PathBuf>,

        #[arg(long)]
        options: Option<PathBuf>,

        /// output path for the JSON snapshot (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
