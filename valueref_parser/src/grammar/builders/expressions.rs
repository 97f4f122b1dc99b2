//! Nonnumeric expression builders
//!
//! function_expr ::= ( 'OneOf' | 'Min' | 'Max' ) '(' expr { ',' expr } ')' | primary_expr
//! operated_expr ::= function_expr
//! expr          ::= operated_expr
//! primary_expr  ::= constant | bound_variable | statistic
//!
//! Enumerations have no meaningful infix operators, so `operated_expr` is a plain
//! pass-through level. Recursion into `expr` only happens after a function keyword
//! and its `(` have been consumed.

use crate::config::compile_time::grammar::MAX_FUNCTION_OPERANDS;
use crate::grammar::ast::ValueRef;
use crate::grammar::builders::atomic::parse_op_type;
use crate::grammar::composition::ValueRefGrammar;
use crate::grammar::rules::RuleResult;
use crate::syntax::{SyntaxError, ValueRefParser};
use crate::tokens::Token;
use crate::value_types::ValueType;

pub fn parse_function_expr<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    let start = parser.position();
    let checkpoint = parser.save_checkpoint();

    let Some(op) = parse_op_type(parser) else {
        return grammar.primary_expr.apply(grammar, parser);
    };
    if parser.match_token(&Token::LeftParen).is_none() {
        parser.restore_checkpoint(checkpoint);
        return grammar.primary_expr.apply(grammar, parser);
    }

    // Committed from here on
    let mut operands = Vec::new();
    loop {
        if operands.len() >= MAX_FUNCTION_OPERANDS {
            return Err(SyntaxError::too_many_operands(
                op.keyword().as_str(),
                MAX_FUNCTION_OPERANDS,
                parser.current_span(),
            ));
        }

        let operand = grammar.expr.apply(grammar, parser)?;
        operands.push(parser.required(operand, grammar.expr.name())?);

        if parser.match_token(&Token::Comma).is_none() {
            break;
        }
    }
    parser.expect_token(&Token::RightParen)?;

    Ok(Some(ValueRef::Operation {
        op,
        operands,
        span: parser.span_since(start),
    }))
}

pub fn parse_operated_expr<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    grammar.function_expr.apply(grammar, parser)
}

pub fn parse_expr<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    grammar.operated_expr.apply(grammar, parser)
}

/// First match wins, in declared order
pub fn parse_primary_expr<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    parser.first_of(
        grammar,
        &[&grammar.constant, &grammar.bound_variable, &grammar.statistic],
    )
}
