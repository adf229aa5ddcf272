use log::*;

pub use log::LevelFilter::*;

/// Routes the `log` macros to stderr. Stdout is left to the caller.
pub fn setup_logging(verbosity: LevelFilter) -> Result<(), String> {
    fern::Dispatch::new()
        .level(verbosity)
        .format(|out, message, record| out.finish(format_args!("({}) {}: {}", record.level(), record.target(), message)))
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| e.to_string())
}
