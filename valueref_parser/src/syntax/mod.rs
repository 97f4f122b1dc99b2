//! Syntax analysis module - TokenStream to value-reference tree
//!
//! The grammar rules live in `crate::grammar`; this module owns the backtracking driver
//! they run on and the errors a parse can surface.

mod error;
mod parser;

pub use error::{ContextualSyntaxError, ErrorContext, SyntaxError, SyntaxResult};
pub use parser::{create_parser, ParserCheckpoint, ValueRefParser};

use crate::config::runtime::ParserPreferences;
use crate::grammar::ast::{Condition, ValueRef};
use crate::grammar::builders::parse_condition;
use crate::grammar::composition::ValueRefGrammar;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::value_types::ValueType;

/// Parse a complete value reference with the grammar's public entry rule
pub fn parse_value_ref_tokens<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    tokens: TokenStream,
    preferences: ParserPreferences,
) -> SyntaxResult<ValueRef<T>> {
    let mut parser = ValueRefParser::with_preferences(tokens, preferences);
    let entry = grammar.entry_rule();
    parser.parse_rule_to_end(entry.name(), |p| entry.apply(grammar, p))
}

/// Parse a complete value reference, function forms included
pub fn parse_expression_tokens<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    tokens: TokenStream,
    preferences: ParserPreferences,
) -> SyntaxResult<ValueRef<T>> {
    let mut parser = ValueRefParser::with_preferences(tokens, preferences);
    let rule = grammar.expression_rule();
    parser.parse_rule_to_end(rule.name(), |p| rule.apply(grammar, p))
}

pub fn parse_condition_tokens(
    tokens: TokenStream,
    preferences: ParserPreferences,
) -> SyntaxResult<Condition> {
    let mut parser = ValueRefParser::with_preferences(tokens, preferences);
    parser.parse_rule_to_end("condition", parse_condition)
}

/// Check that every syntax error code has registered metadata
pub fn validate_syntax_codes() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::TRAILING_INPUT,
        codes::syntax::NO_VIABLE_ALTERNATIVE,
        codes::syntax::TOO_MANY_OPERANDS,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::INTERNAL_PARSER_ERROR,
        codes::syntax::MAX_RECURSION_DEPTH,
    ];

    for code in &syntax_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code
            ));
        }
    }

    log_debug!("Syntax error codes validated", "count" => syntax_codes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::registry::get_parser_rule;
    use crate::lexical::tokenize;
    use crate::value_types::StarType;
    use assert_matches::assert_matches;

    #[test]
    fn test_entry_rule_and_expression_rule_differ() {
        let grammar = get_parser_rule::<StarType>().unwrap();

        let entry = parse_value_ref_tokens(
            grammar,
            tokenize("OneOf(Blue, Red)").unwrap(),
            ParserPreferences::default(),
        );
        assert_matches!(
            entry,
            Err(SyntaxError::NoViableAlternative { ref expected, position: 0, .. })
                if expected == "StarType expression"
        );

        let expression = parse_expression_tokens(
            grammar,
            tokenize("OneOf(Blue, Red)").unwrap(),
            ParserPreferences::default(),
        );
        assert_matches!(expression, Ok(ValueRef::Operation { .. }));
    }

    #[test]
    fn test_condition_tokens() {
        let condition = parse_condition_tokens(
            tokenize("Or [ Source Target ]").unwrap(),
            ParserPreferences::default(),
        )
        .unwrap();
        assert_eq!(condition, Condition::Or(vec![Condition::Source, Condition::Target]));
    }

    #[test]
    fn test_syntax_codes_registered() {
        assert!(validate_syntax_codes().is_ok());
    }
}
