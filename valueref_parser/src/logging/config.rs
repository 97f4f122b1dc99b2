//! Configuration module for logging - using compile-time constants
//!
//! Buffer sizes and message limits come from the build profile and cannot be changed at
//! runtime. Verbosity and output format are user preferences.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;
type RuntimeLogLevel = crate::config::runtime::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (user preference, never quieter than the build's floor)
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_floor_log_level())
}

/// The quietest level a build profile allows
pub fn get_floor_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if grammar construction events should be logged
pub fn log_registry_events() -> bool {
    get_runtime_preferences().log_registry_events
}

/// Check if the source name should be attached to events
pub fn include_source_context() -> bool {
    get_runtime_preferences().include_source_context
}

pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_events_per_source() -> usize {
    MAX_LOG_EVENTS_PER_SOURCE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Cut a message to the compile-time length limit on a char boundary
pub fn truncate_message(message: &str) -> String {
    let limit = get_max_log_message_length();
    match message.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}...", &message[..byte_index]),
        None => message.to_string(),
    }
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 1_000_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_SOURCE > LOG_BUFFER_SIZE {
        return Err("Max log events per source exceeds total buffer size".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("Max log message length must be non-zero".to_string());
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Limits (Compile-time) ===\n\
         - Log buffer size: {}\n\
         - Max events per source: {}\n\
         - Max message length: {}\n\
         - Minimum level floor: {}\n\
         === User Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Registry events: {}\n\
         - Include source context: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_SOURCE,
        MAX_LOG_MESSAGE_LENGTH,
        get_floor_log_level().as_str(),
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.log_registry_events,
        preferences.include_source_context,
    )
}

/// Recommended preferences while authoring content scripts
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: false,
        enable_console_logging: true,
        min_log_level: RuntimeLogLevel::Debug,
        log_registry_events: true,
        include_source_context: true,
    }
}

/// Recommended preferences for shipped builds
pub fn get_production_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: true,
        enable_console_logging: false,
        min_log_level: RuntimeLogLevel::Warning,
        log_registry_events: false,
        include_source_context: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_floor_is_never_below_warning() {
        assert!(SECURITY_MIN_LOG_LEVEL <= 2);
        assert!(get_min_log_level() >= get_floor_log_level());
    }

    #[test]
    fn test_truncate_message() {
        let short = "Expected ')'";
        assert_eq!(truncate_message(short), short);

        let long: String = "é".repeat(get_max_log_message_length() + 10);
        let truncated = truncate_message(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(
            truncated.chars().count(),
            get_max_log_message_length() + 3
        );
    }

    #[test]
    fn test_preset_preferences() {
        let dev = get_development_preferences();
        let prod = get_production_preferences();

        assert_eq!(dev.min_log_level, RuntimeLogLevel::Debug);
        assert!(prod.use_structured_logging);
        assert!(prod.min_log_level < dev.min_log_level);
    }

    #[test]
    fn test_summary_lists_limits() {
        let summary = get_config_summary();
        assert!(summary.contains("Log buffer size"));
        assert!(summary.contains("Include source context"));
    }
}
