//! Logging setup.
//!
//! Diagnostics go through `tracing` to stderr so that reports on stdout
//! stay clean. Level is chosen from the CLI flags:
//!
//! - `-q`: error only
//! - default: warn
//! - `-v`: info (each deletion and cross-set decision)
//! - `-vv`: debug (each hashed file)
//! - `-vvv`: trace
//!
//! `RUST_LOG`, when set, adds its directives on top.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map verbosity flags to a level.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(verbose: u8, quiet: bool) {
    let env_filter = EnvFilter::from_default_env().add_directive(level_for(verbose, quiet).into());

    // Already set (tests, embedding): keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
