//! Logger setup.

use log::LevelFilter;

/// Environment variable that overrides the configured level.
pub const LOG_ENV: &str = "ORBITVIEW_LOG";

/// Parses a level name, falling back to `info` for anything unrecognised.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs a stderr logger with local timestamps.
pub fn init_logging(configured: &str) -> Result<(), log::SetLoggerError> {
    let level = std::env::var(LOG_ENV)
        .map(|env| parse_level(&env))
        .unwrap_or_else(|_| parse_level(configured));

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
