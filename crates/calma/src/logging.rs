//! Log output. The terminal belongs to the UI, so records go to a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use calma_config::Config;
use color_eyre::eyre::WrapErr;

/// Install the global logger writing to `path`, or to the default log file.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Without a usable
/// location logging stays disabled.
pub fn init(path: Option<&Path>) -> color_eyre::Result<Option<PathBuf>> {
    let Some(path) = path.map(Path::to_path_buf).or_else(Config::log_path) else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create log directory '{}'", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file '{}'", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(Some(path))
}
