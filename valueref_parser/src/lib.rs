//! Typed value-reference expression parser
//!
//! Parses content-script value references such as `Blue`, `Source.Planet.StarType` or
//! `Mode value = StarType condition = Star type = [Blue White]` into expression trees
//! parameterized by an enumerated value type. Each value type gets its own grammar,
//! composed once and shared process-wide through the registry in [`grammar::registry`].

// Logging macros must be in textual scope for every module below
#[macro_use]
pub mod logging;

pub mod config;
pub mod grammar;
pub mod lexical;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;
pub mod value_types;

// Re-export key types for library consumers
pub use grammar::{
    get_parser_rule, registered_value_types, Condition, GrammarDefinitionError, ValueRef,
    ValueRefGrammar,
};
pub use lexical::{tokenize, LexerError};
pub use pipeline::{
    format_diagnostic, parse_condition, parse_value_ref, parse_value_ref_expression,
    PipelineError, PipelineResult,
};
pub use syntax::SyntaxError;
pub use value_types::{PlanetEnvironment, StarType, ValueType, ValueTypeTag};
