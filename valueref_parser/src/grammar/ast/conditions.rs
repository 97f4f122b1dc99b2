//! Object-selection conditions
//!
//! A condition picks the objects a statistic aggregates over. Star and planet
//! environment tests embed expressions of those value types.

use crate::grammar::ast::nodes::ValueRef;
use crate::grammar::keywords::Keyword;
use crate::value_types::{PlanetEnvironment, StarType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Universe object kinds a condition can match by type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Planet,
    System,
    Fleet,
    Ship,
    Building,
}

impl ObjectType {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Planet => Some(Self::Planet),
            Keyword::System => Some(Self::System),
            Keyword::Fleet => Some(Self::Fleet),
            Keyword::Ship => Some(Self::Ship),
            Keyword::Building => Some(Self::Building),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Planet => Keyword::Planet,
            Self::System => Keyword::System,
            Self::Fleet => Keyword::Fleet,
            Self::Ship => Keyword::Ship,
            Self::Building => Keyword::Building,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    All,
    Source,
    Target,
    Capital,
    ObjectType(ObjectType),
    /// Star colour matches any of the listed expressions
    StarType(Vec<ValueRef<StarType>>),
    /// Planet environment matches any of the listed expressions
    PlanetEnvironment(Vec<ValueRef<PlanetEnvironment>>),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Source => "Source",
            Self::Target => "Target",
            Self::Capital => "Capital",
            Self::ObjectType(_) => "ObjectType",
            Self::StarType(_) => "StarType",
            Self::PlanetEnvironment(_) => "PlanetEnvironment",
            Self::And(_) => "And",
            Self::Or(_) => "Or",
            Self::Not(_) => "Not",
        }
    }

    /// Nesting depth; leaves are depth 1
    pub fn depth(&self) -> usize {
        match self {
            Self::And(operands) | Self::Or(operands) => {
                1 + operands.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Not(operand) => 1 + operand.depth(),
            _ => 1,
        }
    }
}

fn write_bracketed<V: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[V]) -> fmt::Result {
    write!(f, "[")?;
    for item in items {
        write!(f, " {}", item)?;
    }
    write!(f, " ]")
}

/// A single value is written bare, several are bracketed
fn write_value_list<V: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[V]) -> fmt::Result {
    match items {
        [single] => write!(f, "{}", single),
        _ => write_bracketed(f, items),
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", Keyword::All),
            Self::Source => write!(f, "{}", Keyword::Source),
            Self::Target => write!(f, "{}", Keyword::Target),
            Self::Capital => write!(f, "{}", Keyword::Capital),
            Self::ObjectType(object_type) => write!(f, "{}", object_type.keyword()),
            Self::StarType(values) => {
                write!(f, "{} {} = ", Keyword::Star, Keyword::Type)?;
                write_value_list(f, values)
            }
            Self::PlanetEnvironment(values) => {
                write!(f, "{} {} = ", Keyword::Planet, Keyword::Environment)?;
                write_value_list(f, values)
            }
            Self::And(operands) => {
                write!(f, "{} ", Keyword::And)?;
                write_bracketed(f, operands)
            }
            Self::Or(operands) => {
                write!(f, "{} ", Keyword::Or)?;
                write_bracketed(f, operands)
            }
            Self::Not(operand) => write!(f, "{} {}", Keyword::Not, operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Span;

    fn star(value: StarType) -> ValueRef<StarType> {
        ValueRef::Constant {
            value,
            span: Span::dummy(),
        }
    }

    #[test]
    fn test_display() {
        let condition = Condition::And(vec![
            Condition::ObjectType(ObjectType::Planet),
            Condition::Not(Box::new(Condition::Capital)),
            Condition::StarType(vec![star(StarType::Blue), star(StarType::Red)]),
        ]);
        assert_eq!(
            condition.to_string(),
            "And [ Planet Not Capital Star type = [ Blue Red ] ]"
        );

        let single = Condition::StarType(vec![star(StarType::Yellow)]);
        assert_eq!(single.to_string(), "Star type = Yellow");
    }

    #[test]
    fn test_depth_and_kind() {
        let nested = Condition::Or(vec![
            Condition::All,
            Condition::Not(Box::new(Condition::Not(Box::new(Condition::Source)))),
        ]);
        assert_eq!(nested.depth(), 4);
        assert_eq!(nested.kind(), "Or");
        assert_eq!(Condition::Target.depth(), 1);
    }

    #[test]
    fn test_object_type_keywords() {
        for keyword in [Keyword::Planet, Keyword::Ship, Keyword::Building] {
            let object_type = ObjectType::from_keyword(keyword).unwrap();
            assert_eq!(object_type.keyword(), keyword);
        }
        assert_eq!(ObjectType::from_keyword(Keyword::Capital), None);
    }
}
