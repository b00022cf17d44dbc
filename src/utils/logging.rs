use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

pub const ENV_VAR: &str = "GOBARBER_ENV";

pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn init_logging() -> Result<(), SetLoggerError> {
    let log_level = parse_level(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();

        match record.level() {
            Level::Info => writeln!(
                buf,
                "{} [INFO] [{}]: {}",
                timestamp,
                target,
                record.args()
            ),
            level => writeln!(
                buf,
                "{} [{}] [{}:{}] {}: {}",
                timestamp,
                level,
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                target,
                record.args()
            ),
        }
    });

    if env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("reqwest", LevelFilter::Warn);
        builder.filter_module("hyper", LevelFilter::Warn);
    }

    builder
        .filter_level(log_level)
        .target(Target::Stderr)
        .try_init()
}

pub fn log_request_failure(operation: &str, error: &dyn std::error::Error) {
    log::warn!("[API] {} failed: {}", operation, error);

    let mut source = error.source();
    while let Some(err) = source {
        log::warn!("  Caused by: {}", err);
        source = err.source();
    }
}

pub fn log_fetch(resource: &str, count: usize, duration_ms: u128) {
    log::info!("[API] Fetched {} {} in {}ms", count, resource, duration_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_level("ERROR"), LevelFilter::Error);
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
