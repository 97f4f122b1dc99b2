//! Syntax errors with error code mapping
//!
//! A rule that simply does not match reports `Ok(None)` and never becomes one of these.
//! Every variant here is either a committed failure, a top-level failure, or a
//! resource limit, and carries the token position and span where it happened.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    /// Mismatch after a rule committed to an alternative
    #[error("Unexpected token: expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
        span: Span,
    },

    /// The entry rule did not match at all
    #[error("No viable alternative: expected {expected}, found {found} at {span}")]
    NoViableAlternative {
        expected: String,
        found: String,
        position: usize,
        span: Span,
    },

    /// The entry rule matched but significant tokens remain
    #[error("Trailing input after {parsed}: found {found} at {span}")]
    TrailingInput {
        parsed: String,
        found: String,
        position: usize,
        span: Span,
    },

    #[error("Too many operands in {construct}: limit is {limit} at {span}")]
    TooManyOperands {
        construct: String,
        limit: usize,
        span: Span,
    },

    #[error("Maximum recursion depth {depth} exceeded at {span}")]
    MaxRecursionDepth { depth: usize, span: Span },

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },
}

impl SyntaxError {
    pub fn unexpected_token(expected: &str, found: &str, position: usize, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            position,
            span,
        }
    }

    pub fn no_viable_alternative(expected: &str, found: &str, position: usize, span: Span) -> Self {
        Self::NoViableAlternative {
            expected: expected.to_string(),
            found: found.to_string(),
            position,
            span,
        }
    }

    pub fn trailing_input(parsed: &str, found: &str, position: usize, span: Span) -> Self {
        Self::TrailingInput {
            parsed: parsed.to_string(),
            found: found.to_string(),
            position,
            span,
        }
    }

    pub fn too_many_operands(construct: &str, limit: usize, span: Span) -> Self {
        Self::TooManyOperands {
            construct: construct.to_string(),
            limit,
            span,
        }
    }

    pub fn max_recursion_depth(depth: usize, span: Span) -> Self {
        Self::MaxRecursionDepth { depth, span }
    }

    pub fn internal_parser_error(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::NoViableAlternative { .. } => codes::syntax::NO_VIABLE_ALTERNATIVE,
            Self::TrailingInput { .. } => codes::syntax::TRAILING_INPUT,
            Self::TooManyOperands { .. } => codes::syntax::TOO_MANY_OPERANDS,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::NoViableAlternative { span, .. }
            | Self::TrailingInput { span, .. }
            | Self::TooManyOperands { span, .. }
            | Self::MaxRecursionDepth { span, .. } => Some(*span),
            Self::InternalParserError { .. } => None,
        }
    }

    /// Significant-token index where the failure was detected
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::NoViableAlternative { position, .. }
            | Self::TrailingInput { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Name of the construct the parser wanted, when there is one
    pub fn expected(&self) -> Option<&str> {
        match self {
            Self::UnexpectedToken { expected, .. } | Self::NoViableAlternative { expected, .. } => {
                Some(expected)
            }
            Self::TrailingInput { .. } => Some("end of input"),
            _ => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        matches!(
            self,
            Self::InternalParserError { .. } | Self::MaxRecursionDepth { .. }
        )
    }

    pub fn is_recoverable(&self) -> bool {
        !self.requires_halt()
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    /// One-line message with the recommended action appended
    pub fn enhanced_message(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected, found, ..
            }
            | Self::NoViableAlternative {
                expected, found, ..
            } => format!(
                "Expected {} but found {}. {}",
                expected,
                found,
                self.recommended_action()
            ),
            Self::TrailingInput { parsed, found, .. } => format!(
                "Unexpected {} after complete {}. {}",
                found,
                parsed,
                self.recommended_action()
            ),
            _ => format!("{} ({})", self, self.recommended_action()),
        }
    }
}

/// Parser state captured alongside an error
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub parsing_context: Vec<String>,
    pub surrounding_tokens: Vec<String>,
    /// line, column
    pub file_position: Option<(u32, u32)>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(mut self, context: String) -> Self {
        self.parsing_context.push(context);
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.surrounding_tokens = tokens;
        self
    }

    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.file_position = Some((line, column));
        self
    }

    pub fn format_context(&self) -> String {
        let mut context = String::new();

        let chain: Vec<&str> = self
            .parsing_context
            .iter()
            .map(String::as_str)
            .filter(|entry| !entry.is_empty())
            .collect();
        if !chain.is_empty() {
            context.push_str(&format!("Context: {}\n", chain.join(" -> ")));
        }

        if !self.surrounding_tokens.is_empty() {
            context.push_str(&format!("Near: {}\n", self.surrounding_tokens.join(" ")));
        }

        if let Some((line, column)) = self.file_position {
            context.push_str(&format!("Position: line {}, column {}\n", line, column));
        }

        context
    }
}

#[derive(Debug, Clone)]
pub struct ContextualSyntaxError {
    pub error: SyntaxError,
    pub context: ErrorContext,
}

impl ContextualSyntaxError {
    pub fn new(error: SyntaxError) -> Self {
        Self {
            error,
            context: ErrorContext::new(),
        }
    }

    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn format_full_error(&self) -> String {
        format!(
            "{}\n{}Help: {} (Severity: {})",
            self.error.enhanced_message(),
            self.context.format_context(),
            self.error.recommended_action(),
            self.error.severity()
        )
    }
}

impl std::fmt::Display for ContextualSyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_full_error())
    }
}

impl std::error::Error for ContextualSyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
