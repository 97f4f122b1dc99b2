//! Condition builders
//!
//! condition ::= 'And' '[' condition { condition } ']'
//!             | 'Or' '[' condition { condition } ']'
//!             | 'Not' condition
//!             | 'Star' 'type' '=' value_list<StarType>
//!             | 'Planet' 'environment' '=' value_list<PlanetEnvironment>
//!             | 'All' | 'Source' | 'Target' | 'Capital'
//!             | object_type
//!
//! Star and planet environment tests parse their values with the `expr` rule of the
//! registry's grammar for that type, so function forms are accepted there.

use crate::config::compile_time::grammar::MAX_CONDITION_OPERANDS;
use crate::grammar::ast::{Condition, ValueRef};
use crate::grammar::builders::atomic::parse_object_type;
use crate::grammar::keywords::Keyword;
use crate::grammar::registry::get_parser_rule;
use crate::grammar::rules::RuleResult;
use crate::syntax::{SyntaxError, ValueRefParser};
use crate::tokens::Token;
use crate::value_types::{PlanetEnvironment, StarType, ValueType};

pub fn parse_condition(parser: &mut ValueRefParser) -> RuleResult<Condition> {
    parser.try_rule("condition", parse_condition_body)
}

fn parse_condition_body(parser: &mut ValueRefParser) -> RuleResult<Condition> {
    let Some(keyword) = parser.current_token().and_then(Token::as_keyword) else {
        return Ok(None);
    };

    match keyword {
        Keyword::And | Keyword::Or => {
            parser.advance();
            let operands = parse_operand_block(parser, keyword)?;
            Ok(Some(if keyword == Keyword::And {
                Condition::And(operands)
            } else {
                Condition::Or(operands)
            }))
        }
        Keyword::Not => {
            parser.advance();
            let operand = parse_condition(parser)?;
            let operand = parser.required(operand, "condition")?;
            Ok(Some(Condition::Not(Box::new(operand))))
        }
        Keyword::Star => {
            parser.advance();
            parser.expect_keyword(Keyword::Type)?;
            parser.expect_token(&Token::Equals)?;
            Ok(Some(Condition::StarType(parse_value_list::<StarType>(parser)?)))
        }
        Keyword::Planet if parser.peek_keyword(1, Keyword::Environment) => {
            parser.advance();
            parser.advance();
            parser.expect_token(&Token::Equals)?;
            Ok(Some(Condition::PlanetEnvironment(
                parse_value_list::<PlanetEnvironment>(parser)?,
            )))
        }
        Keyword::All => leaf(parser, Condition::All),
        Keyword::Source => leaf(parser, Condition::Source),
        Keyword::Target => leaf(parser, Condition::Target),
        Keyword::Capital => leaf(parser, Condition::Capital),
        _ => Ok(parse_object_type(parser).map(Condition::ObjectType)),
    }
}

fn leaf(parser: &mut ValueRefParser, condition: Condition) -> RuleResult<Condition> {
    parser.advance();
    Ok(Some(condition))
}

/// '[' condition { condition } ']'
fn parse_operand_block(
    parser: &mut ValueRefParser,
    keyword: Keyword,
) -> Result<Vec<Condition>, SyntaxError> {
    parser.expect_token(&Token::LeftBracket)?;

    let first = parse_condition(parser)?;
    let mut operands = vec![parser.required(first, "condition")?];

    while parser.match_token(&Token::RightBracket).is_none() {
        if operands.len() >= MAX_CONDITION_OPERANDS {
            return Err(SyntaxError::too_many_operands(
                keyword.as_str(),
                MAX_CONDITION_OPERANDS,
                parser.current_span(),
            ));
        }
        let operand = parse_condition(parser)?;
        operands.push(parser.required(operand, "condition or ']'")?);
    }

    Ok(operands)
}

/// value_list ::= expr | '[' expr { expr } ']'
fn parse_value_list<T: ValueType>(
    parser: &mut ValueRefParser,
) -> Result<Vec<ValueRef<T>>, SyntaxError> {
    let grammar = get_parser_rule::<T>().map_err(|error| {
        SyntaxError::internal_parser_error(&format!("{} grammar unavailable: {}", T::TAG, error))
    })?;
    let expected = grammar.expression_rule().name();

    if parser.match_token(&Token::LeftBracket).is_none() {
        let value = grammar.parse_expression(parser)?;
        return Ok(vec![parser.required(value, expected)?]);
    }

    let first = grammar.parse_expression(parser)?;
    let mut values = vec![parser.required(first, expected)?];

    while parser.match_token(&Token::RightBracket).is_none() {
        if values.len() >= MAX_CONDITION_OPERANDS {
            return Err(SyntaxError::too_many_operands(
                T::TYPE_NAME,
                MAX_CONDITION_OPERANDS,
                parser.current_span(),
            ));
        }
        let value = grammar.parse_expression(parser)?;
        values.push(parser.required(value, expected)?);
    }

    Ok(values)
}
