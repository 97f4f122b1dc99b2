//! Grammar construction errors
//!
//! Raised once, when a value type's grammar is composed. The registry caches the
//! failure so every later lookup reports the same defect.

use crate::logging::{codes, Code};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarDefinitionError {
    #[error("{type_name} grammar: invalid rule name '{name}'")]
    InvalidRuleName { type_name: String, name: String },

    #[error("{type_name} grammar: duplicate rule name '{name}'")]
    DuplicateRuleName { type_name: String, name: String },

    #[error("{type_name} grammar: no variable names defined")]
    EmptyVariableNames { type_name: String },

    #[error("{type_name} grammar: ambiguous literal '{literal}': {reason}")]
    AmbiguousLiteral {
        type_name: String,
        literal: String,
        reason: String,
    },
}

impl GrammarDefinitionError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::InvalidRuleName { .. } => codes::grammar::INVALID_RULE_NAME,
            Self::DuplicateRuleName { .. } => codes::grammar::DUPLICATE_RULE_NAME,
            Self::EmptyVariableNames { .. } => codes::grammar::EMPTY_VARIABLE_NAMES,
            Self::AmbiguousLiteral { .. } => codes::grammar::AMBIGUOUS_LITERAL,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::InvalidRuleName { type_name, .. }
            | Self::DuplicateRuleName { type_name, .. }
            | Self::EmptyVariableNames { type_name }
            | Self::AmbiguousLiteral { type_name, .. } => type_name,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let error = GrammarDefinitionError::AmbiguousLiteral {
            type_name: "StarType".to_string(),
            literal: "Mode".to_string(),
            reason: "collides with keyword".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E063");
        assert_eq!(error.type_name(), "StarType");
        assert_eq!(
            error.to_string(),
            "StarType grammar: ambiguous literal 'Mode': collides with keyword"
        );

        let empty = GrammarDefinitionError::EmptyVariableNames {
            type_name: "Empty".to_string(),
        };
        assert_eq!(empty.error_code(), codes::grammar::EMPTY_VARIABLE_NAMES);
    }
}
