//! Atomic builders: enum constants and single-keyword selectors
//!
//! Everything here looks at one significant token. Only a match consumes it.

use crate::grammar::ast::{ContainerType, ObjectType, OpType, ReferenceScope, ValueRef};
use crate::grammar::composition::ValueRefGrammar;
use crate::grammar::rules::RuleResult;
use crate::syntax::ValueRefParser;
use crate::tokens::Token;
use crate::value_types::ValueType;

/// constant ::= <literal spelling of T>
///
/// Lookup is exact and case-sensitive. Keywords never reach here because they lex
/// as keywords, which is why grammar validation rejects keyword-shaped literals.
pub fn parse_constant<T: ValueType>(
    _grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    let value = match parser.current_token() {
        Some(Token::Identifier(text)) => T::from_literal(text),
        _ => None,
    };

    Ok(value.map(|value| ValueRef::Constant {
        value,
        span: parser.advance(),
    }))
}

pub fn parse_reference_scope(parser: &mut ValueRefParser) -> Option<ReferenceScope> {
    let scope = parser
        .current_token()
        .and_then(Token::as_keyword)
        .and_then(ReferenceScope::from_keyword)?;
    parser.advance();
    Some(scope)
}

pub fn parse_container_type(parser: &mut ValueRefParser) -> Option<ContainerType> {
    let container = parser
        .current_token()
        .and_then(Token::as_keyword)
        .and_then(ContainerType::from_keyword)?;
    parser.advance();
    Some(container)
}

pub fn parse_op_type(parser: &mut ValueRefParser) -> Option<OpType> {
    let op = parser
        .current_token()
        .and_then(Token::as_keyword)
        .and_then(OpType::from_keyword)?;
    parser.advance();
    Some(op)
}

pub fn parse_object_type(parser: &mut ValueRefParser) -> Option<ObjectType> {
    let object_type = parser
        .current_token()
        .and_then(Token::as_keyword)
        .and_then(ObjectType::from_keyword)?;
    parser.advance();
    Some(object_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::registry::get_parser_rule;
    use crate::lexical::tokenize;
    use crate::value_types::{PlanetEnvironment, StarType};
    use assert_matches::assert_matches;

    fn parser_for(source: &str) -> ValueRefParser {
        ValueRefParser::new(tokenize(source).unwrap())
    }

    #[test]
    fn test_constant_matches_literal() {
        let grammar = get_parser_rule::<StarType>().unwrap();
        let mut parser = parser_for("BlackHole");

        let node = parse_constant(grammar, &mut parser).unwrap();
        assert_matches!(node, Some(ValueRef::Constant { value: StarType::BlackHole, .. }));
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_constant_is_case_sensitive() {
        let grammar = get_parser_rule::<StarType>().unwrap();
        let mut parser = parser_for("blue");

        assert_matches!(parse_constant(grammar, &mut parser), Ok(None));
        assert_eq!(parser.position(), 0);
    }

    #[test]
    fn test_constant_rejects_other_type_literal() {
        let grammar = get_parser_rule::<PlanetEnvironment>().unwrap();
        let mut parser = parser_for("Blue");

        assert_matches!(parse_constant(grammar, &mut parser), Ok(None));
    }

    #[test]
    fn test_selector_keywords() {
        let mut parser = parser_for("Source Planet Min Building Blue");

        assert_eq!(parse_reference_scope(&mut parser), Some(ReferenceScope::Source));
        assert_eq!(parse_reference_scope(&mut parser), None);
        assert_eq!(parse_container_type(&mut parser), Some(ContainerType::Planet));
        assert_eq!(parse_op_type(&mut parser), Some(OpType::Minimum));
        assert_eq!(parse_container_type(&mut parser), None);
        assert_eq!(parse_object_type(&mut parser), Some(ObjectType::Building));
        assert_eq!(parse_object_type(&mut parser), None);
        assert_eq!(parser.position(), 4);
    }
}
