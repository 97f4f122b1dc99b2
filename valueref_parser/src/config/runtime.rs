// RUNTIME PREFERENCES (User Experience)
//
// Resource limits are compile-time only; nothing here can loosen them.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect keyword/identifier/punctuation counts
    pub collect_metrics: bool,

    /// Whether to show line/column information in lexer error messages
    pub include_position_in_errors: bool,

    /// Whether to log a summary line after every tokenization
    pub log_token_summary: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_metrics: env_flag(env_vars::LEXICAL_COLLECT_METRICS, true),
            include_position_in_errors: env_flag(env_vars::LEXICAL_INCLUDE_POSITIONS, true),
            log_token_summary: env_flag(env_vars::LEXICAL_LOG_TOKEN_SUMMARY, false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Whether rule entry, exit and backtracking are traced at debug level
    pub trace_rules: bool,

    /// Whether failed parses are kept in the parser's error history
    pub record_error_history: bool,

    /// Whether diagnostics include the active rule context chain
    pub include_rule_context: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            trace_rules: env_flag(env_vars::PARSER_TRACE_RULES, false),
            record_error_history: env_flag(env_vars::PARSER_RECORD_ERROR_HISTORY, true),
            include_rule_context: env_flag(env_vars::PARSER_INCLUDE_RULE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether console logging is enabled
    pub enable_console_logging: bool,

    /// Minimum level that is emitted
    pub min_log_level: LogLevel,

    /// Whether grammar construction and registry events are logged
    pub log_registry_events: bool,

    /// Whether the current source name is attached to log events
    pub include_source_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_registry_events: env_flag(env_vars::LOGGING_LOG_REGISTRY, true),
            include_source_context: env_flag(env_vars::LOGGING_INCLUDE_SOURCE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to the event-level enum used by the logging service
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors raised while loading runtime preferences
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize runtime configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from TOML text; missing sections and fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, RuntimeConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load preferences from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, RuntimeConfigError> {
        Ok(toml::to_string(self)?)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_COLLECT_METRICS: &str = "VREF_LEXICAL_COLLECT_METRICS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "VREF_LEXICAL_INCLUDE_POSITIONS";
    pub const LEXICAL_LOG_TOKEN_SUMMARY: &str = "VREF_LEXICAL_LOG_TOKEN_SUMMARY";

    // Parser
    pub const PARSER_TRACE_RULES: &str = "VREF_PARSER_TRACE_RULES";
    pub const PARSER_RECORD_ERROR_HISTORY: &str = "VREF_PARSER_RECORD_ERROR_HISTORY";
    pub const PARSER_INCLUDE_RULE_CONTEXT: &str = "VREF_PARSER_INCLUDE_RULE_CONTEXT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "VREF_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "VREF_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "VREF_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_REGISTRY: &str = "VREF_LOGGING_LOG_REGISTRY";
    pub const LOGGING_INCLUDE_SOURCE_CONTEXT: &str = "VREF_LOGGING_INCLUDE_SOURCE_CONTEXT";
}
