use crate::logger::severity::LogSeverity;
use crate::logger::time::now;
use once_cell::sync::OnceCell;
use std::env;

static MIN_SEVERITY: OnceCell<LogSeverity> = OnceCell::new();

/// Sets the minimum severity that gets printed. Only the first call wins; returns `false` if
/// the threshold was already fixed (by an earlier `init` or by a log line).
pub fn init(min_severity: LogSeverity) -> bool {
    MIN_SEVERITY.set(min_severity).is_ok()
}

/// Current minimum severity. Falls back to `BEDROCK_CODEC_LOG`, then to `Warning`.
pub fn min_severity() -> LogSeverity {
    *MIN_SEVERITY.get_or_init(|| {
        env::var("BEDROCK_CODEC_LOG")
            .ok()
            .and_then(|name| LogSeverity::parse(&name))
            .unwrap_or_default()
    })
}

pub fn enabled(log_severity: LogSeverity) -> bool {
    log_severity >= min_severity()
}

pub fn log(msg: String, log_severity: LogSeverity) {
    if enabled(log_severity) {
        eprintln!("[{}] {} {}", log_severity, now(), msg);
    }
}
