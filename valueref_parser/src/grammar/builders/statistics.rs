//! Statistic builders
//!
//! statistic ::= 'Mode' 'value' '=' statistic_sub_value_ref 'condition' '=' condition
//!
//! The aggregated quantity is restricted to constants and bound variables, so a
//! statistic of a statistic can never parse.

use crate::grammar::ast::{StatisticType, ValueRef};
use crate::grammar::builders::conditions::parse_condition;
use crate::grammar::composition::ValueRefGrammar;
use crate::grammar::keywords::Keyword;
use crate::grammar::rules::RuleResult;
use crate::syntax::ValueRefParser;
use crate::tokens::Token;
use crate::value_types::ValueType;

pub fn parse_statistic_sub_value_ref<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    parser.first_of(grammar, &[&grammar.constant, &grammar.bound_variable])
}

pub fn parse_statistic<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    let start = parser.position();
    if parser.match_keyword(Keyword::Mode).is_none() {
        return Ok(None);
    }

    parser.expect_keyword(Keyword::Value)?;
    parser.expect_token(&Token::Equals)?;
    let value = grammar
        .statistic_sub_value_ref
        .apply(grammar, parser)?;
    let value = parser.required(value, grammar.statistic_sub_value_ref.name())?;

    parser.expect_keyword(Keyword::Condition)?;
    parser.expect_token(&Token::Equals)?;
    let condition = parse_condition(parser)?;
    let condition = parser.required(condition, "condition")?;

    Ok(Some(ValueRef::Statistic {
        kind: StatisticType::Mode,
        value: Box::new(value),
        condition: Box::new(condition),
        span: parser.span_since(start),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::{Condition, Qualifier, ReferenceScope};
    use crate::grammar::registry::get_parser_rule;
    use crate::lexical::tokenize;
    use crate::syntax::SyntaxError;
    use crate::value_types::StarType;
    use assert_matches::assert_matches;

    fn statistic(source: &str) -> RuleResult<ValueRef<StarType>> {
        let grammar = get_parser_rule::<StarType>().unwrap();
        let mut parser = ValueRefParser::new(tokenize(source).unwrap());
        grammar.statistic_rule().apply(grammar, &mut parser)
    }

    #[test]
    fn test_statistic_of_variable() {
        let node = statistic("Mode value = StarType condition = All")
            .unwrap()
            .unwrap();

        let ValueRef::Statistic { kind, value, condition, .. } = node else {
            panic!("expected a statistic");
        };
        assert_eq!(kind, StatisticType::Mode);
        assert_matches!(*value, ValueRef::Variable { name: Keyword::StarType, .. });
        assert_eq!(*condition, Condition::All);
    }

    #[test]
    fn test_statistic_of_qualified_variable() {
        let node = statistic("Mode value = Source.StarType condition = And [ Star type = Blue Capital ]")
            .unwrap()
            .unwrap();

        let ValueRef::Statistic { value, condition, .. } = node else {
            panic!("expected a statistic");
        };
        assert_matches!(
            *value,
            ValueRef::Variable { ref qualifiers, .. }
                if qualifiers == &[Qualifier::Scope(ReferenceScope::Source)]
        );
        assert_matches!(*condition, Condition::And(ref operands) if operands.len() == 2);
    }

    #[test]
    fn test_nested_statistic_is_rejected() {
        let result = statistic("Mode value = Mode value = StarType condition = All condition = All");

        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { ref expected, position: 3, .. })
                if expected == "StarType statistic value"
        );
    }

    #[test]
    fn test_committed_after_mode() {
        assert_matches!(
            statistic("Mode Blue"),
            Err(SyntaxError::UnexpectedToken { ref expected, .. }) if expected == "keyword 'value'"
        );
        assert_matches!(
            statistic("Mode value = Blue condition ="),
            Err(SyntaxError::UnexpectedToken { ref expected, .. }) if expected == "condition"
        );
        assert_matches!(
            statistic("Mode value = Blue"),
            Err(SyntaxError::UnexpectedToken { ref found, .. }) if found == "end of input"
        );
    }

    #[test]
    fn test_without_mode_is_no_match() {
        assert_matches!(statistic("Blue"), Ok(None));
    }
}
