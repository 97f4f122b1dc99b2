//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! Code constants live next to their behavioral metadata so every error type in the crate
//! can answer severity and recoverability questions from one table.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E021");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E024");
    pub const COMMENT_TOO_LONG: Code = Code::new("E026");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const TRAILING_INPUT: Code = Code::new("E040");
    pub const NO_VIABLE_ALTERNATIVE: Code = Code::new("E043");
    pub const TOO_MANY_OPERANDS: Code = Code::new("E045");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E086");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Grammar definition error codes
pub mod grammar {
    use super::Code;

    pub const INVALID_RULE_NAME: Code = Code::new("E060");
    pub const DUPLICATE_RULE_NAME: Code = Code::new("E061");
    pub const EMPTY_VARIABLE_NAMES: Code = Code::new("E062");
    pub const AMBIGUOUS_LITERAL: Code = Code::new("E063");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // Lexical
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Syntax
    pub const VALUE_REF_PARSED: Code = Code::new("I040");
    pub const CONDITION_PARSED: Code = Code::new("I041");

    // Grammar registry
    pub const GRAMMAR_CONSTRUCTED: Code = Code::new("I060");
    pub const GRAMMAR_VALIDATION_PASSED: Code = Code::new("I061");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn register(registry: &mut HashMap<&'static str, ErrorMetadata>, metadata: ErrorMetadata) {
    registry.insert(metadata.code, metadata);
}

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing script text",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Logging or registry initialization failure",
                "Check runtime configuration and initialization order",
            ),
        );

        // Lexical analysis errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Invalid character found in script text",
                "Remove the character or check the file encoding",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Block comment not terminated before end of input",
                "Close the comment with */",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Identifier exceeds maximum allowed length",
                "Shorten the identifier",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E024",
                "Lexical",
                Severity::High,
                false,
                true,
                "Script text exceeds maximum source size",
                "Split the content into smaller scripts",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E026",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Comment exceeds maximum allowed length",
                "Shorten the comment",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E027",
                "Lexical",
                Severity::High,
                false,
                true,
                "Token count exceeds compile-time limit",
                "Simplify the expression or raise max_token_count in the build profile",
            ),
        );

        // Syntax errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Input remains after a complete value reference",
                "Remove the extra tokens or use the expression entry point",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "No grammar alternative matched the input",
                "Check the value reference against the expected form",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::High,
                false,
                true,
                "Function or condition operand list exceeds limit",
                "Reduce the number of operands",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Unexpected token after the parser committed to a construct",
                "Complete the construct named in the error message",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E086",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Internal parser state error",
                "File a bug report with the failing script text",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::High,
                false,
                true,
                "Maximum parse recursion depth exceeded",
                "Reduce nesting of functions and conditions",
            ),
        );

        // Grammar definition errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E060",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Grammar rule has an empty or oversized debug name",
                "Give every rule a short non-empty debug name",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E061",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Two grammar rules share a debug name",
                "Make rule debug names unique within a value type",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E062",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Value type declares no bound-variable names",
                "Declare at least one variable name keyword for the type",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E063",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Literal spelling is empty, duplicated or collides with a keyword",
                "Rename the literal so the constant rule can match it",
            ),
        );

        // Success codes
        register(
            &mut registry,
            ErrorMetadata::new(
                "I001",
                "Success",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "No action required",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "I004",
                "Success",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "No action required",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed",
                "Continue to parsing",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "I040",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Value reference parsed",
                "No action required",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "I041",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Condition parsed",
                "No action required",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "I060",
                "Grammar",
                Severity::Low,
                true,
                false,
                "Value type grammar constructed and published",
                "No action required",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "I061",
                "Grammar",
                Severity::Low,
                true,
                false,
                "Grammar definition passed validation",
                "No action required",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexical::INVALID_CHARACTER,
            lexical::UNTERMINATED_COMMENT,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::SOURCE_TOO_LARGE,
            lexical::COMMENT_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            syntax::TRAILING_INPUT,
            syntax::NO_VIABLE_ALTERNATIVE,
            syntax::TOO_MANY_OPERANDS,
            syntax::UNEXPECTED_TOKEN,
            syntax::INTERNAL_PARSER_ERROR,
            syntax::MAX_RECURSION_DEPTH,
            grammar::INVALID_RULE_NAME,
            grammar::DUPLICATE_RULE_NAME,
            grammar::EMPTY_VARIABLE_NAMES,
            grammar::AMBIGUOUS_LITERAL,
            success::TOKENIZATION_COMPLETE,
            success::VALUE_REF_PARSED,
            success::CONDITION_PARSED,
            success::GRAMMAR_CONSTRUCTED,
            success::GRAMMAR_VALIDATION_PASSED,
        ];

        for code in codes {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert_eq!(metadata.map(|m| m.code), Some(code.as_str()));
        }
    }

    #[test]
    fn test_classification() {
        assert!(requires_halt(syntax::MAX_RECURSION_DEPTH.as_str()));
        assert!(!requires_halt(syntax::UNEXPECTED_TOKEN.as_str()));
        assert!(is_recoverable(syntax::NO_VIABLE_ALTERNATIVE.as_str()));
        assert_eq!(get_category(grammar::AMBIGUOUS_LITERAL.as_str()), "Grammar");
        assert_eq!(
            get_severity(grammar::DUPLICATE_RULE_NAME.as_str()),
            Severity::Critical
        );
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
    }

    #[test]
    fn test_severity_round_trip() {
        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ] {
            assert_eq!(Severity::from_str(severity.as_str()), Some(severity));
        }
    }
}
