//! Per-type grammar composition
//!
//! Wires the generic builders into the full rule set for one value type and validates
//! the result before it can be published through the registry.

use crate::config::compile_time::grammar::MAX_RULE_NAME_LENGTH;
use crate::grammar::ast::ValueRef;
use crate::grammar::builders::{atomic, expressions, statistics, variables};
use crate::grammar::error::GrammarDefinitionError;
use crate::grammar::keywords::is_reserved_keyword;
use crate::grammar::rules::{Rule, RuleResult};
use crate::syntax::ValueRefParser;
use crate::value_types::ValueType;
use std::collections::HashSet;

/// The composed value-reference grammar of one value type
///
/// Immutable once built. The public entry rule is `primary_expr`; function forms are
/// only reachable through [`ValueRefGrammar::expression_rule`].
#[derive(Debug)]
pub struct ValueRefGrammar<T: ValueType> {
    pub(crate) variable_name: Rule<T>,
    pub(crate) constant: Rule<T>,
    pub(crate) bound_variable: Rule<T>,
    pub(crate) statistic_sub_value_ref: Rule<T>,
    pub(crate) function_expr: Rule<T>,
    pub(crate) operated_expr: Rule<T>,
    pub(crate) expr: Rule<T>,
    pub(crate) statistic: Rule<T>,
    pub(crate) primary_expr: Rule<T>,
}

impl<T: ValueType> ValueRefGrammar<T> {
    /// Build and validate every rule of `T`'s grammar
    pub fn compose() -> Result<Self, GrammarDefinitionError> {
        let type_name = T::TYPE_NAME;
        let example = T::VARIABLE_NAMES
            .first()
            .map(|keyword| keyword.as_str())
            .unwrap_or_default();

        let grammar = Self {
            variable_name: Rule::new(
                format!("{} variable name (e.g., {})", type_name, example),
                variables::parse_variable_name::<T>,
            ),
            constant: Rule::new(type_name, atomic::parse_constant::<T>),
            bound_variable: Rule::new(
                format!("{} variable", type_name),
                variables::parse_bound_variable::<T>,
            ),
            statistic_sub_value_ref: Rule::new(
                format!("{} statistic value", type_name),
                statistics::parse_statistic_sub_value_ref::<T>,
            ),
            function_expr: Rule::new(
                format!("{} function", type_name),
                expressions::parse_function_expr::<T>,
            ),
            operated_expr: Rule::new(
                format!("{} operated expression", type_name),
                expressions::parse_operated_expr::<T>,
            ),
            expr: Rule::new(format!("{} value", type_name), expressions::parse_expr::<T>),
            statistic: Rule::new(
                format!("{} statistic", type_name),
                statistics::parse_statistic::<T>,
            ),
            primary_expr: Rule::new(
                format!("{} expression", type_name),
                expressions::parse_primary_expr::<T>,
            ),
        };

        if let Err(error) = grammar.validate() {
            log_error!(error.error_code(), "Grammar validation failed",
                "value_type" => type_name,
                "error" => &error
            );
            return Err(error);
        }

        log_debug!("Grammar validated",
            "value_type" => type_name,
            "rules" => grammar.rules().len(),
            "literals" => T::all().len()
        );

        Ok(grammar)
    }

    /// Match the public entry rule at the parser's cursor
    pub fn parse(&self, parser: &mut ValueRefParser) -> RuleResult<ValueRef<T>> {
        self.primary_expr.apply(self, parser)
    }

    /// Match a full expression, function forms included
    pub fn parse_expression(&self, parser: &mut ValueRefParser) -> RuleResult<ValueRef<T>> {
        self.expr.apply(self, parser)
    }

    pub fn entry_rule(&self) -> &Rule<T> {
        &self.primary_expr
    }

    pub fn expression_rule(&self) -> &Rule<T> {
        &self.expr
    }

    pub fn constant_rule(&self) -> &Rule<T> {
        &self.constant
    }

    pub fn bound_variable_rule(&self) -> &Rule<T> {
        &self.bound_variable
    }

    pub fn statistic_rule(&self) -> &Rule<T> {
        &self.statistic
    }

    /// Every rule, in composition order
    pub fn rules(&self) -> [&Rule<T>; 9] {
        [
            &self.variable_name,
            &self.constant,
            &self.bound_variable,
            &self.statistic_sub_value_ref,
            &self.function_expr,
            &self.operated_expr,
            &self.expr,
            &self.statistic,
            &self.primary_expr,
        ]
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules().iter().map(|rule| rule.name()).collect()
    }

    pub fn rule(&self, name: &str) -> Option<&Rule<T>> {
        self.rules().into_iter().find(|rule| rule.name() == name)
    }

    fn validate(&self) -> Result<(), GrammarDefinitionError> {
        let type_name = T::TYPE_NAME.to_string();

        let mut names = HashSet::new();
        for name in self.rule_names() {
            if name.trim().is_empty() || name.len() > MAX_RULE_NAME_LENGTH {
                return Err(GrammarDefinitionError::InvalidRuleName {
                    type_name,
                    name: name.to_string(),
                });
            }
            if !names.insert(name) {
                return Err(GrammarDefinitionError::DuplicateRuleName {
                    type_name,
                    name: name.to_string(),
                });
            }
        }

        if T::VARIABLE_NAMES.is_empty() {
            return Err(GrammarDefinitionError::EmptyVariableNames { type_name });
        }

        let mut literals = HashSet::new();
        for value in T::all() {
            let literal = value.as_literal();
            let reason = if literal.is_empty() {
                Some("empty spelling")
            } else if !is_identifier(literal) {
                Some("does not lex as a single identifier")
            } else if is_reserved_keyword(literal) {
                Some("collides with a reserved keyword")
            } else if !literals.insert(literal) {
                Some("spelled the same as another value")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(GrammarDefinitionError::AmbiguousLiteral {
                    type_name,
                    literal: literal.to_string(),
                    reason: reason.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;
    use crate::grammar::registry::GrammarSlot;
    use crate::value_types::{PlanetEnvironment, StarType};
    use assert_matches::assert_matches;
    use std::sync::OnceLock;

    macro_rules! test_value_type {
        ($name:ident, $variables:expr, [$($variant:ident => $literal:expr),+ $(,)?]) => {
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            enum $name {
                $($variant),+
            }

            impl ValueType for $name {
                const TYPE_NAME: &'static str = stringify!($name);
                const VARIABLE_NAMES: &'static [Keyword] = $variables;

                fn all() -> &'static [Self] {
                    &[$($name::$variant),+]
                }

                fn as_literal(self) -> &'static str {
                    match self {
                        $($name::$variant => $literal),+
                    }
                }

                fn registry_slot() -> &'static GrammarSlot<Self> {
                    static SLOT: GrammarSlot<$name> = OnceLock::new();
                    &SLOT
                }
            }
        };
    }

    test_value_type!(Clashing, &[Keyword::StarType], [Calm => "Calm", Stormy => "Mode"]);
    test_value_type!(Twins, &[Keyword::StarType], [First => "Same", Second => "Same"]);
    test_value_type!(Spaced, &[Keyword::StarType], [Wide => "Black Hole"]);
    test_value_type!(Unnamed, &[], [Only => "Only"]);

    #[test]
    fn test_star_type_rule_names() {
        let grammar = ValueRefGrammar::<StarType>::compose().unwrap();
        assert_eq!(
            grammar.rule_names(),
            vec![
                "StarType variable name (e.g., StarType)",
                "StarType",
                "StarType variable",
                "StarType statistic value",
                "StarType function",
                "StarType operated expression",
                "StarType value",
                "StarType statistic",
                "StarType expression",
            ]
        );
        assert_eq!(grammar.entry_rule().name(), "StarType expression");
        assert_eq!(grammar.expression_rule().name(), "StarType value");
        assert!(grammar.rule("StarType statistic").is_some());
        assert!(grammar.rule("PlanetEnvironment statistic").is_none());
    }

    #[test]
    fn test_builtin_grammars_validate() {
        assert!(ValueRefGrammar::<StarType>::compose().is_ok());
        assert!(ValueRefGrammar::<PlanetEnvironment>::compose().is_ok());
    }

    #[test]
    fn test_keyword_literal_is_rejected() {
        let error = ValueRefGrammar::<Clashing>::compose().unwrap_err();
        assert_matches!(
            error,
            GrammarDefinitionError::AmbiguousLiteral { ref literal, ref reason, .. }
                if literal == "Mode" && reason.contains("keyword")
        );
        assert_eq!(error.error_code().as_str(), "E063");
    }

    #[test]
    fn test_duplicate_literal_is_rejected() {
        assert_matches!(
            ValueRefGrammar::<Twins>::compose(),
            Err(GrammarDefinitionError::AmbiguousLiteral { ref literal, .. }) if literal == "Same"
        );
    }

    #[test]
    fn test_multi_word_literal_is_rejected() {
        assert_matches!(
            ValueRefGrammar::<Spaced>::compose(),
            Err(GrammarDefinitionError::AmbiguousLiteral { .. })
        );
    }

    #[test]
    fn test_empty_variable_names_are_rejected() {
        assert_matches!(
            ValueRefGrammar::<Unnamed>::compose(),
            Err(GrammarDefinitionError::EmptyVariableNames { ref type_name }) if type_name == "Unnamed"
        );
    }

    #[test]
    fn test_grammar_is_shareable() {
        fn assert_send_sync<G: Send + Sync>() {}
        assert_send_sync::<ValueRefGrammar<StarType>>();
        assert_send_sync::<ValueRefGrammar<PlanetEnvironment>>();
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_identifier("BlackHole"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("Black Hole"));
        assert!(!is_identifier(""));
    }
}
