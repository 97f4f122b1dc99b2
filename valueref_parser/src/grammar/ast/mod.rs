//! Parsed expression and condition trees

pub mod conditions;
pub mod nodes;

pub use conditions::{Condition, ObjectType};
pub use nodes::{ContainerType, OpType, Qualifier, ReferenceScope, StatisticType, ValueRef};
