//! Bound-variable builders
//!
//! bound_variable ::= [ scope '.' [ container '.' ] ] variable_name

use crate::grammar::ast::{Qualifier, ValueRef};
use crate::grammar::builders::atomic::{parse_container_type, parse_reference_scope};
use crate::grammar::composition::ValueRefGrammar;
use crate::grammar::rules::RuleResult;
use crate::syntax::{SyntaxError, ValueRefParser};
use crate::tokens::Token;
use crate::value_types::ValueType;

/// variable_name ::= one of `T::VARIABLE_NAMES`
pub fn parse_variable_name<T: ValueType>(
    _grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    let name = parser
        .current_token()
        .and_then(Token::as_keyword)
        .filter(|keyword| T::VARIABLE_NAMES.contains(keyword));

    Ok(name.map(|name| ValueRef::Variable {
        name,
        qualifiers: Vec::new(),
        span: parser.advance(),
    }))
}

pub fn parse_bound_variable<T: ValueType>(
    grammar: &ValueRefGrammar<T>,
    parser: &mut ValueRefParser,
) -> RuleResult<ValueRef<T>> {
    let start = parser.position();
    let qualifiers = parse_qualifiers(parser);

    let Some(node) = grammar.variable_name.apply(grammar, parser)? else {
        return Ok(None);
    };

    match node {
        ValueRef::Variable { name, .. } => Ok(Some(ValueRef::Variable {
            name,
            qualifiers,
            span: parser.span_since(start),
        })),
        other => Err(SyntaxError::internal_parser_error(&format!(
            "{} produced a {} node",
            grammar.variable_name.name(),
            other.node_kind()
        ))),
    }
}

/// Optional `scope '.' [ container '.' ]` prefix
///
/// A selector without its trailing dot is not part of the prefix and is left unconsumed.
fn parse_qualifiers(parser: &mut ValueRefParser) -> Vec<Qualifier> {
    let mut qualifiers = Vec::new();

    let checkpoint = parser.save_checkpoint();
    let Some(scope) = parse_reference_scope(parser) else {
        return qualifiers;
    };
    if parser.match_token(&Token::Dot).is_none() {
        parser.restore_checkpoint(checkpoint);
        return qualifiers;
    }
    qualifiers.push(Qualifier::Scope(scope));

    let checkpoint = parser.save_checkpoint();
    if let Some(container) = parse_container_type(parser) {
        if parser.match_token(&Token::Dot).is_some() {
            qualifiers.push(Qualifier::Container(container));
        } else {
            parser.restore_checkpoint(checkpoint);
        }
    }

    qualifiers
}
