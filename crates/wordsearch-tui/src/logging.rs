use log::LevelFilter;
use std::env;
use std::fs::{self, File};
use std::path::Path;

/// Where log records go
pub enum LogTarget<'a> {
    /// Standard error, for one-shot commands
    Stderr,
    /// A file, while the full-screen UI owns the terminal
    File(&'a Path),
}

/// Initialize logging.
///
/// `verbose` raises the default level to `Debug`; `RUST_LOG` overrides
/// either default when set.
pub fn init_logger(verbose: bool, target: LogTarget<'_>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    match target {
        LogTarget::Stderr => {
            // Keep one-shot output quiet unless asked
            if !verbose && env::var("RUST_LOG").is_err() {
                builder.filter(None, LevelFilter::Warn);
            }
        }
        LogTarget::File(path) => {
            let file = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| File::create(path));
            match file {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                // Nowhere safe to write while the screen is in use
                Err(_) => {
                    builder.filter(None, LevelFilter::Off);
                }
            }
        }
    }

    let _ = builder.try_init();
    log::debug!("logger initialized at {level:?} level");
}
