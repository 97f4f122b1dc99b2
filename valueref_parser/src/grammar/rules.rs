//! Named grammar rules
//!
//! A rule is a debug name plus a plain function. Rules reach their siblings through the
//! grammar they are handed, so mutually recursive rules need no shared ownership.

use crate::grammar::ast::ValueRef;
use crate::grammar::composition::ValueRefGrammar;
use crate::syntax::{SyntaxError, ValueRefParser};
use crate::value_types::ValueType;
use std::fmt;

/// `Ok(Some)` matched, `Ok(None)` did not match with the cursor restored, `Err` is fatal
pub type RuleResult<N> = Result<Option<N>, SyntaxError>;

pub type RuleFn<T> = fn(&ValueRefGrammar<T>, &mut ValueRefParser) -> RuleResult<ValueRef<T>>;

pub struct Rule<T: ValueType> {
    name: String,
    parse_fn: RuleFn<T>,
}

impl<T: ValueType> Rule<T> {
    pub fn new(name: impl Into<String>, parse_fn: RuleFn<T>) -> Self {
        Self {
            name: name.into(),
            parse_fn,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the rule with backtracking, depth accounting and context tracking
    pub fn apply(
        &self,
        grammar: &ValueRefGrammar<T>,
        parser: &mut ValueRefParser,
    ) -> RuleResult<ValueRef<T>> {
        let parse_fn = self.parse_fn;
        parser.try_rule(&self.name, |parser| parse_fn(grammar, parser))
    }
}

impl<T: ValueType> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            parse_fn: self.parse_fn,
        }
    }
}

impl<T: ValueType> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}
