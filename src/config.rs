use crate::error::{CodecError, Result};
use crate::logger::LogSeverity;
use serde::Deserialize;

/// Maximum number of sub-chunks in one chunk column.
pub const MAX_SUB_CHUNKS: usize = 16;

/// Protocol-level switches shared by a `BinaryData` and every nested buffer it spawns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Whether item stacks carry a network stack id.
    pub has_stack_ids: bool,
    /// Upper bound on sub-chunks in a chunk column, enforced on write and on read.
    pub max_sub_chunks: usize,
    /// Minimum severity for log lines, applied by `CodecConfig::install_logger`.
    pub log_level: LogSeverity,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            has_stack_ids: true,
            max_sub_chunks: MAX_SUB_CHUNKS,
            log_level: LogSeverity::default(),
        }
    }
}

impl CodecConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CodecConfig = serde_json::from_str(json)
            .map_err(|e| CodecError::invalid_data(format!("Bad codec config: {}", e)))?;
        if config.max_sub_chunks == 0 || config.max_sub_chunks > MAX_SUB_CHUNKS {
            return Err(CodecError::invalid_data(format!(
                "max_sub_chunks must be within 1..={}, got {}",
                MAX_SUB_CHUNKS, config.max_sub_chunks
            )));
        }
        Ok(config)
    }

    /// Hands `log_level` to the process-wide logger. No-op if the logger was already set up.
    pub fn install_logger(&self) -> bool {
        crate::logger::init(self.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert!(config.has_stack_ids);
        assert_eq!(config.max_sub_chunks, 16);
        assert_eq!(config.log_level, LogSeverity::Warning);
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = CodecConfig::from_json(r#"{ "has_stack_ids": false }"#).unwrap();
        assert!(!config.has_stack_ids);
        assert_eq!(config.max_sub_chunks, 16);

        let config = CodecConfig::from_json(r#"{ "log_level": "debug" }"#).unwrap();
        assert_eq!(config.log_level, LogSeverity::Debug);
    }

    #[test]
    fn test_install_logger_only_once() {
        let config = CodecConfig::from_json(r#"{ "log_level": "error" }"#).unwrap();
        // The threshold may already be fixed by an earlier log line in this process
        config.install_logger();
        assert!(!config.install_logger());
        assert!(crate::logger::enabled(LogSeverity::Fatal));
    }

    #[test]
    fn test_config_from_json_rejects_bad_values() {
        assert_matches!(
            CodecConfig::from_json(r#"{ "max_sub_chunks": 17 }"#),
            Err(CodecError::InvalidData(_))
        );
        assert_matches!(
            CodecConfig::from_json("not json"),
            Err(CodecError::InvalidData(_))
        );
    }
}
