//! Builder functions for value-reference grammar productions
//!
//! Each builder is generic over the value type and reaches sibling rules through the
//! grammar it is handed. `conditions` is the exception: conditions are not typed, and
//! they borrow the registry's grammars for the values they test.

pub mod atomic;
pub mod conditions;
pub mod expressions;
pub mod statistics;
pub mod variables;

pub use atomic::{
    parse_constant, parse_container_type, parse_object_type, parse_op_type, parse_reference_scope,
};
pub use conditions::parse_condition;
pub use expressions::{parse_expr, parse_function_expr, parse_operated_expr, parse_primary_expr};
pub use statistics::{parse_statistic, parse_statistic_sub_value_ref};
pub use variables::{parse_bound_variable, parse_variable_name};
