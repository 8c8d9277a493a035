pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use miniscope_core::error::Result;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Detect { session } => handlers::handle_detect(session),
        Commands::Config {
            folder,
            schema,
            options,
        } => handlers::handle_config(folder, schema, options),
        Commands::Timestamps {
            session,
            cam_num,
            timestamps_pattern,
            options,
        } => handlers::handle_timestamps(session, cam_num, timestamps_pattern, options),
        Commands::StartTimes { session, options } => handlers::handle_start_times(session, options),
        Commands::Notes { session, options } => handlers::handle_notes(session, options),
        Commands::Frames {
            session,
            video_pattern,
            ffprobe,
            options,
        } => handlers::handle_frames(session, video_pattern, ffprobe, options),
        Commands::Ingest {
            session,
            devices,
            series_device,
            series_name,
            description,
            notes,
            cam_num,
            timestamps_pattern,
            video_pattern,
            ffprobe,
            schema,
            options,
            out,
        } => handlers::handle_ingest(
            session,
            devices,
            series_device,
            series_name,
            description,
            notes,
            cam_num,
            timestamps_pattern,
            video_pattern,
            ffprobe,
            schema,
            options,
            out,
        ),
    }
}
