//! Value-reference grammar: keywords, AST, rules and the per-type registry

pub mod ast;
pub mod builders;
pub mod composition;
pub mod error;
pub mod keywords;
pub mod registry;
pub mod rules;

pub use ast::{
    Condition, ContainerType, ObjectType, OpType, Qualifier, ReferenceScope, StatisticType,
    ValueRef,
};
pub use composition::ValueRefGrammar;
pub use error::GrammarDefinitionError;
pub use keywords::{is_reserved_keyword, Keyword};
pub use registry::{
    get_parser_rule, initialize_builtin_grammars, is_registered, registered_value_types,
    GrammarSlot,
};
pub use rules::{Rule, RuleFn, RuleResult};
