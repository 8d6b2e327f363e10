use colored::Colorize;
use middleware::logger::LoggerMiddleware;

pub mod middleware {
    pub mod logger;
}

const LOG_FILE: &str = "entitlements.log";

/// Installs the global logger.
///
/// The log file is always written, so error diagnostics survive even when
/// console logging is switched off. Stdout is only added when it is on.
pub fn setup(console_logging_enabled: bool) -> Result<(), fern::InitError> {
    dispatch(console_logging_enabled)
        .chain(fern::log_file(LOG_FILE)?)
        .apply()?;
    Ok(())
}

/// Formatting and level filters shared by every output.
pub fn dispatch(console_logging_enabled: bool) -> fern::Dispatch {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            let color = match record.level() {
                log::Level::Info => "green",
                log::Level::Warn => "yellow",
                log::Level::Error => "red",
                log::Level::Debug => "magenta",
                log::Level::Trace => "bright black",
            };
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level().to_string().color(color),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .level_for("sqlx", log::LevelFilter::Warn)
        .level_for("actix_server", log::LevelFilter::Info)
        .level_for("mio", log::LevelFilter::Off);

    if console_logging_enabled {
        dispatch.chain(std::io::stdout())
    } else {
        dispatch
    }
}

pub fn middleware(console_logging_enabled: bool) -> LoggerMiddleware {
    LoggerMiddleware::new(console_logging_enabled)
}
