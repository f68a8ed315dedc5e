use chrono::{DateTime, Local};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("buildshapeify_{}.log", now.format("%Y-%m-%d_%H-%M-%S"))
}

pub fn init(log_dir: Option<&Path>) -> Option<PathBuf> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let opened = log_dir.map(|dir| {
        let path = dir.join(log_file_name(Local::now()));
        (File::create(&path), path)
    });
    let (file, log_path, file_error) = match opened {
        Some((Ok(file), path)) => (Some(file), Some(path), None),
        Some((Err(err), path)) => (None, None, Some((path, err))),
        None => (None, None, None),
    };
    let file_layer = file.map(|f| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(f))
    });

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .try_init()
    {
        eprintln!("[warn] could not install the logger: {err}");
    }

    if let Some((path, err)) = file_error {
        tracing::warn!("could not create log file {}: {}", path.display(), err);
    }
    log_path
}
