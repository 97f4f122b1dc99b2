//! Global logging module for the value-reference parser
//!
//! Provides thread-safe global logging, a per-thread source context naming the content
//! script being parsed, and the `log_*!` macro interface used throughout the crate.

#[macro_use]
pub mod macros;
pub mod codes;
pub mod config;
pub mod events;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, FileLogger, Logger, LoggingService, MemoryLogger, StructuredLogger,
};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Name of the script being parsed and how many events it has produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub name: String,
    pub events_logged: usize,
}

thread_local! {
    static SOURCE_CONTEXT: RefCell<Option<SourceContext>> = const { RefCell::new(None) };
    static SCOPED_LOGGER: RefCell<Option<Arc<LoggingService>>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    let required = [
        codes::syntax::NO_VIABLE_ALTERNATIVE,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::grammar::AMBIGUOUS_LITERAL,
        codes::lexical::INVALID_CHARACTER,
    ];
    for code in required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Route this thread's events to `service` for the duration of `f`
///
/// Takes precedence over the global logger. Used to capture diagnostics from a single
/// parse without touching process-wide state.
pub fn with_scoped_logger<F, R>(service: Arc<LoggingService>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = SCOPED_LOGGER.with(|slot| slot.borrow_mut().replace(service));
    let result = f();
    SCOPED_LOGGER.with(|slot| *slot.borrow_mut() = previous);
    result
}

// ============================================================================
// SOURCE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_source_context(name: &str) {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(SourceContext {
            name: name.to_string(),
            events_logged: 0,
        });
    });
}

pub fn clear_source_context() {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with the given script name attached to every event it logs
pub fn with_source_context<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = SOURCE_CONTEXT.with(|ctx| ctx.borrow_mut().take());
    set_source_context(name);
    let result = f();
    SOURCE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

pub fn get_current_source_context() -> Option<SourceContext> {
    SOURCE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Attach source context, enforce per-source limits, and hand the event to a logger
pub fn dispatch_event(mut event: LogEvent) {
    event.message = config::truncate_message(&event.message);

    let admitted = SOURCE_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        let Some(source) = ctx.as_mut() else {
            return true;
        };

        // Errors always pass; chatter stops once a script hits its quota
        if !event.is_error() && source.events_logged >= config::get_max_log_events_per_source()
        {
            return false;
        }
        source.events_logged += 1;

        if config::include_source_context() {
            event.context.insert("source".to_string(), source.name.clone());
        }
        true
    });

    if !admitted {
        return;
    }

    let scoped = SCOPED_LOGGER.with(|slot| slot.borrow().clone());
    if let Some(service) = scoped {
        service.log_event(event);
    } else if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

fn with_pairs(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = with_pairs(LogEvent::error(code, message), context);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch_event(event);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(with_pairs(LogEvent::success(code, message), context));
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(with_pairs(LogEvent::info(message), context));
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(with_pairs(LogEvent::warning(message), context));
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(with_pairs(LogEvent::debug(message), context));
}

/// Whether a debug event would reach any logger on this thread
pub fn debug_enabled() -> bool {
    let scoped = SCOPED_LOGGER.with(|slot| slot.borrow().as_ref().map(|s| s.min_level()));
    match scoped {
        Some(level) => level >= LogLevel::Debug,
        None => config::get_min_log_level() >= LogLevel::Debug && is_initialized(),
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));

    if let Some(source) = get_current_source_context() {
        diagnostics.push_str(&format!(
            "Current source: {} ({} events)\n",
            source.name, source.events_logged
        ));
    }

    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Arc<MemoryLogger>, Arc<LoggingService>) {
        let memory = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Debug));
        (memory, service)
    }

    #[test]
    fn test_source_context_management() {
        assert!(get_current_source_context().is_none());

        set_source_context("buildings/BLD_GAS_GIANT_GEN.focs.txt");
        let context = get_current_source_context();
        assert_eq!(
            context.map(|c| c.name),
            Some("buildings/BLD_GAS_GIANT_GEN.focs.txt".to_string())
        );

        clear_source_context();
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_with_source_context_restores_previous() {
        let result = with_source_context("outer.txt", || {
            let inner = with_source_context("inner.txt", || {
                get_current_source_context().map(|c| c.name)
            });
            assert_eq!(inner, Some("inner.txt".to_string()));
            get_current_source_context().map(|c| c.name)
        });

        assert_eq!(result, Some("outer.txt".to_string()));
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_scoped_logger_captures_macro_events() {
        let (memory, service) = capture();

        with_scoped_logger(service, || {
            with_source_context("techs.inf", || {
                log_error!(codes::syntax::UNEXPECTED_TOKEN, "Expected ')'",
                    "rule" => "StarType function",
                    "position" => 4
                );
                log_success!(codes::success::VALUE_REF_PARSED, "Parsed");
            });
        });

        assert_eq!(memory.event_count(), 2);
        let errors = memory.get_errors();
        assert_eq!(errors[0].code, codes::syntax::UNEXPECTED_TOKEN);
        assert_eq!(errors[0].context.get("position"), Some(&"4".to_string()));
        assert_eq!(errors[0].context.get("source"), Some(&"techs.inf".to_string()));
    }

    #[test]
    fn test_per_source_quota_keeps_errors() {
        let (memory, service) = capture();
        let quota = config::get_max_log_events_per_source();

        with_scoped_logger(service, || {
            with_source_context("noisy.txt", || {
                for _ in 0..quota + 5 {
                    log_info!("chatter");
                }
                log_error!(codes::syntax::TRAILING_INPUT, "Trailing input");
            });
        });

        assert_eq!(memory.event_count(), quota + 1);
        assert!(memory.has_error_with_code(codes::syntax::TRAILING_INPUT));
    }

    #[test]
    fn test_macros_without_logger_do_not_panic() {
        log_error!(codes::system::INTERNAL_ERROR, "nobody listening");
        log_warning!("nobody listening", "k" => 1);
        log_debug!("nobody listening");
        safe_log_error(codes::system::INTERNAL_ERROR, "fallback");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = with_source_context("species.txt", get_system_diagnostics);
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Current source: species.txt"));
    }
}
