//! Lexical analysis module
//!
//! Tokenizes value-reference script text under compile-time limits and reports through
//! the global logging system. The diagnostic source name comes from the current
//! logging source context when one is set.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenStream};

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize script text with default preferences
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize_named(&current_source_name(), source)
}

/// Tokenize with custom runtime preferences (limits remain compile-time)
pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize_named(&current_source_name(), source)
}

/// Tokenize with an explicit name for diagnostics
pub fn tokenize_named(name: &str, source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize_named(name, source)
}

pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

fn current_source_name() -> String {
    crate::logging::get_current_source_context()
        .map(|context| context.name)
        .unwrap_or_else(|| "<input>".to_string())
}

// ============================================================================
// MODULE VALIDATION
// ============================================================================

/// Check that lexical error codes are registered and limits are sane
pub fn validate_tokenization() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::INVALID_CHARACTER,
        crate::logging::codes::lexical::UNTERMINATED_COMMENT,
        crate::logging::codes::lexical::IDENTIFIER_TOO_LONG,
        crate::logging::codes::lexical::SOURCE_TOO_LARGE,
        crate::logging::codes::lexical::COMMENT_TOO_LONG,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_SOURCE_SIZE == 0 {
        return Err("MAX_SOURCE_SIZE cannot be zero".to_string());
    }
    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_COMMENT_LENGTH == 0 {
        return Err("MAX_COMMENT_LENGTH cannot be zero".to_string());
    }

    log_debug!("Lexical limits validated",
        "max_source_size" => MAX_SOURCE_SIZE,
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_comment_length" => MAX_COMMENT_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

/// Current compile-time lexical limits, for reporting
pub fn get_lexical_limits() -> LexicalLimits {
    LexicalLimits {
        max_source_size: MAX_SOURCE_SIZE,
        max_identifier_length: MAX_IDENTIFIER_LENGTH,
        max_comment_length: MAX_COMMENT_LENGTH,
        max_token_count: MAX_TOKEN_COUNT,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalLimits {
    pub max_source_size: usize,
    pub max_identifier_length: usize,
    pub max_comment_length: usize,
    pub max_token_count: usize,
}

// ============================================================================
// ANALYSIS HELPERS
// ============================================================================

/// Token distribution over a whole stream, trivia included
pub fn get_token_counts(token_stream: &TokenStream) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in token_stream.all_tokens() {
        counts.total += 1;
        match &token.value {
            Token::Keyword(_) => counts.keywords += 1,
            Token::Identifier(_) => counts.identifiers += 1,
            Token::Comment(_) => counts.comments += 1,
            Token::Space | Token::Tab | Token::Newline => counts.whitespace += 1,
            Token::Eof => counts.eof += 1,
            _ => counts.punctuation += 1,
        }
    }

    counts
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub punctuation: usize,
    pub comments: usize,
    pub whitespace: usize,
    pub eof: usize,
}

impl TokenCounts {
    /// Everything except whitespace and comments
    pub fn significant_tokens(&self) -> usize {
        self.total - self.whitespace - self.comments
    }

    pub fn has_content(&self) -> bool {
        self.keywords > 0 || self.identifiers > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{codes, with_scoped_logger, LogLevel, LoggingService, MemoryLogger};
    use std::sync::Arc;

    #[test]
    fn test_validate_tokenization() {
        assert!(validate_tokenization().is_ok());
        let limits = get_lexical_limits();
        assert!(limits.max_identifier_length > 0);
        assert!(limits.max_source_size >= limits.max_comment_length);
    }

    #[test]
    fn test_create_analyzer_with_preferences() {
        let preferences = LexicalPreferences {
            collect_metrics: false,
            ..Default::default()
        };
        let analyzer = create_analyzer_with_preferences(preferences);
        assert!(!analyzer.preferences().collect_metrics);
        assert!(create_analyzer().preferences().include_position_in_errors);
    }

    #[test]
    fn test_token_counts() {
        let stream = tokenize("Star type = [Blue, Red] // hot").unwrap();
        let counts = get_token_counts(&stream);

        assert_eq!(counts.keywords, 2);
        assert_eq!(counts.identifiers, 2);
        assert_eq!(counts.punctuation, 4);
        assert_eq!(counts.comments, 1);
        assert_eq!(counts.eof, 1);
        assert_eq!(counts.significant_tokens(), stream.len());
        assert!(counts.has_content());
    }

    #[test]
    fn test_source_context_names_diagnostics() {
        let stream = crate::logging::with_source_context("stars.focs.txt", || {
            tokenize("Mode").unwrap()
        });
        assert_eq!(stream.source_map().map(|map| map.name.as_str()), Some("stars.focs.txt"));

        let anonymous = tokenize("Mode").unwrap();
        assert_eq!(anonymous.source_map().map(|map| map.name.as_str()), Some("<input>"));
    }

    #[test]
    fn test_failures_are_logged_with_lexical_codes() {
        let memory = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Info));

        let result = with_scoped_logger(service, || tokenize("Blue ; Red"));

        assert!(result.is_err());
        assert!(memory.has_error_with_code(codes::lexical::INVALID_CHARACTER));
    }

    #[test]
    fn test_success_is_logged() {
        let memory = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Info));

        let preferences = LexicalPreferences {
            log_token_summary: true,
            ..Default::default()
        };

        with_scoped_logger(service, || {
            tokenize_with_preferences("Capital", preferences).unwrap()
        });

        assert!(memory.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
    }
}
