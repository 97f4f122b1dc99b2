//! Value-reference expression tree
//!
//! `ValueRef<T>` is the parsed form of a typed value reference: a constant, a bound
//! variable, a statistic or a function call. Composite nodes own their children, every
//! node carries the span it was parsed from, and `Display` renders canonical script text.

use crate::grammar::ast::conditions::Condition;
use crate::grammar::keywords::Keyword;
use crate::utils::Span;
use crate::value_types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

// === QUALIFIERS ===

/// Object a bound variable is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceScope {
    Source,
    Target,
    LocalCandidate,
    RootCandidate,
}

impl ReferenceScope {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Source => Some(Self::Source),
            Keyword::Target => Some(Self::Target),
            Keyword::LocalCandidate => Some(Self::LocalCandidate),
            Keyword::RootCandidate => Some(Self::RootCandidate),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Source => Keyword::Source,
            Self::Target => Keyword::Target,
            Self::LocalCandidate => Keyword::LocalCandidate,
            Self::RootCandidate => Keyword::RootCandidate,
        }
    }
}

/// Container object between a scope and the variable name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerType {
    Planet,
    System,
    Fleet,
}

impl ContainerType {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Planet => Some(Self::Planet),
            Keyword::System => Some(Self::System),
            Keyword::Fleet => Some(Self::Fleet),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Planet => Keyword::Planet,
            Self::System => Keyword::System,
            Self::Fleet => Keyword::Fleet,
        }
    }
}

/// One segment of a dotted variable path, in source order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualifier {
    Scope(ReferenceScope),
    Container(ContainerType),
}

impl Qualifier {
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Scope(scope) => scope.keyword(),
            Self::Container(container) => container.keyword(),
        }
    }
}

// === STATISTICS AND OPERATIONS ===

/// Aggregation kinds; non-numeric types only support the most common value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatisticType {
    Mode,
}

impl StatisticType {
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Mode => Keyword::Mode,
        }
    }
}

/// Function operations available to non-numeric value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpType {
    /// `OneOf`
    RandomPick,
    /// `Min`
    Minimum,
    /// `Max`
    Maximum,
}

impl OpType {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::OneOf => Some(Self::RandomPick),
            Keyword::Min => Some(Self::Minimum),
            Keyword::Max => Some(Self::Maximum),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Self::RandomPick => Keyword::OneOf,
            Self::Minimum => Keyword::Min,
            Self::Maximum => Keyword::Max,
        }
    }
}

// === EXPRESSION NODE ===

/// Typed value-reference expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueRef<T> {
    /// Literal of the value type
    Constant { value: T, span: Span },

    /// Named game-state variable, optionally qualified (`Source.Planet.StarType`)
    Variable {
        name: Keyword,
        qualifiers: Vec<Qualifier>,
        span: Span,
    },

    /// Aggregate of `value` over the objects matching `condition`
    Statistic {
        kind: StatisticType,
        value: Box<ValueRef<T>>,
        condition: Box<Condition>,
        span: Span,
    },

    /// Function call; operands are ordered and never empty
    Operation {
        op: OpType,
        operands: Vec<ValueRef<T>>,
        span: Span,
    },
}

impl<T> ValueRef<T> {
    pub fn span(&self) -> Span {
        match self {
            Self::Constant { span, .. }
            | Self::Variable { span, .. }
            | Self::Statistic { span, .. }
            | Self::Operation { span, .. } => *span,
        }
    }

    pub fn node_kind(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Variable { .. } => "variable",
            Self::Statistic { .. } => "statistic",
            Self::Operation { .. } => "operation",
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant { .. })
    }

    pub fn constant_value(&self) -> Option<&T> {
        match self {
            Self::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// True when no variable or statistic appears anywhere in the tree
    pub fn is_constant_expression(&self) -> bool {
        match self {
            Self::Constant { .. } => true,
            Self::Variable { .. } | Self::Statistic { .. } => false,
            Self::Operation { operands, .. } => operands.iter().all(Self::is_constant_expression),
        }
    }

    /// Number of nodes in this tree, conditions excluded
    pub fn node_count(&self) -> usize {
        match self {
            Self::Constant { .. } | Self::Variable { .. } => 1,
            Self::Statistic { value, .. } => 1 + value.node_count(),
            Self::Operation { operands, .. } => {
                1 + operands.iter().map(Self::node_count).sum::<usize>()
            }
        }
    }
}

impl<T: ValueType> fmt::Display for ValueRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value, .. } => write!(f, "{}", value.as_literal()),
            Self::Variable {
                name, qualifiers, ..
            } => {
                for qualifier in qualifiers {
                    write!(f, "{}.", qualifier.keyword())?;
                }
                write!(f, "{}", name)
            }
            Self::Statistic {
                kind,
                value,
                condition,
                ..
            } => write!(
                f,
                "{} {} = {} {} = {}",
                kind.keyword(),
                Keyword::Value,
                value,
                Keyword::Condition,
                condition
            ),
            Self::Operation { op, operands, .. } => {
                write!(f, "{}(", op.keyword())?;
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", operand)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for ReferenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_types::StarType;

    fn constant(value: StarType) -> ValueRef<StarType> {
        ValueRef::Constant {
            value,
            span: Span::dummy(),
        }
    }

    #[test]
    fn test_display_variable_path() {
        let variable: ValueRef<StarType> = ValueRef::Variable {
            name: Keyword::StarType,
            qualifiers: vec![
                Qualifier::Scope(ReferenceScope::Source),
                Qualifier::Container(ContainerType::Planet),
            ],
            span: Span::dummy(),
        };
        assert_eq!(variable.to_string(), "Source.Planet.StarType");
    }

    #[test]
    fn test_display_operation_and_statistic() {
        let operation = ValueRef::Operation {
            op: OpType::RandomPick,
            operands: vec![constant(StarType::Blue), constant(StarType::BlackHole)],
            span: Span::dummy(),
        };
        assert_eq!(operation.to_string(), "OneOf(Blue, BlackHole)");

        let statistic: ValueRef<StarType> = ValueRef::Statistic {
            kind: StatisticType::Mode,
            value: Box::new(ValueRef::Variable {
                name: Keyword::StarType,
                qualifiers: vec![],
                span: Span::dummy(),
            }),
            condition: Box::new(Condition::All),
            span: Span::dummy(),
        };
        assert_eq!(
            statistic.to_string(),
            "Mode value = StarType condition = All"
        );
    }

    #[test]
    fn test_tree_queries() {
        let operation = ValueRef::Operation {
            op: OpType::Maximum,
            operands: vec![constant(StarType::Red), constant(StarType::White)],
            span: Span::dummy(),
        };
        assert_eq!(operation.node_count(), 3);
        assert!(operation.is_constant_expression());
        assert!(!operation.is_constant());
        assert_eq!(operation.node_kind(), "operation");
        assert_eq!(constant(StarType::Red).constant_value(), Some(&StarType::Red));
    }

    #[test]
    fn test_keyword_mappings() {
        for op in [OpType::RandomPick, OpType::Minimum, OpType::Maximum] {
            assert_eq!(OpType::from_keyword(op.keyword()), Some(op));
        }
        assert_eq!(ReferenceScope::from_keyword(Keyword::Planet), None);
        assert_eq!(ContainerType::from_keyword(Keyword::Ship), None);
        assert_eq!(
            Qualifier::Scope(ReferenceScope::RootCandidate).keyword(),
            Keyword::RootCandidate
        );
    }

    #[test]
    fn test_serde_json_shape() {
        let json = serde_json::to_value(constant(StarType::Neutron)).unwrap();
        assert_eq!(json["Constant"]["value"], "Neutron");

        let back: ValueRef<StarType> = serde_json::from_value(json).unwrap();
        assert_eq!(back, constant(StarType::Neutron));
    }
}
