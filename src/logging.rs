use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are recorded as well; otherwise
/// info and above. `RUST_LOG` overrides either. The terminal is taken over
/// by the game, so records go to `log_file` when it can be opened and to
/// stderr otherwise.
pub fn init(verbose: bool, log_file: Option<&Path>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    if let Some(path) = log_file {
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
