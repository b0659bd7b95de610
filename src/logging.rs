use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::LOG_FILE_NAME;

/// Routes `log` records into `<dir>/snake-arcade.log`.
///
/// Stdout belongs to the terminal UI, so nothing is written to the console.
/// Returns the log file path.
pub fn init_file_logger(dir: &Path, verbose: bool) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = File::create(&path)?;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)
        .map_err(|error| io::Error::new(io::ErrorKind::AlreadyExists, error))?;

    Ok(path)
}
