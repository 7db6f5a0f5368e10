//! Log initialisation for the command-line entrypoint.
//!
//! Progress goes through the `log` facade; the binary installs an
//! `env_logger` backend writing to standard error.

use std::io::Write;

use log::LevelFilter;

/// Environment variable overriding the level chosen on the command line.
pub const LOG_ENV_VAR: &str = "DEJAVU_GEN_LOG";

/// Prefix of every rendered log line.
pub const LOG_PREFIX: &str = "dejavu-gen: ";

/// Build the logger used by the binary.
///
/// `level` is the default filter; [`LOG_ENV_VAR`] takes precedence when set,
/// using the usual `env_logger` filter syntax.
#[must_use]
pub fn builder(level: LevelFilter) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_env(env_logger::Env::new().filter(LOG_ENV_VAR))
        .format(|buf, record| writeln!(buf, "{LOG_PREFIX}{}", record.args()));
    builder
}

/// Install the logger. A second call is a no-op.
pub fn init(level: LevelFilter) {
    if builder(level).try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
