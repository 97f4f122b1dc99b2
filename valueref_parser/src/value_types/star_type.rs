//! Star colours

use crate::grammar::keywords::Keyword;
use crate::grammar::registry::GrammarSlot;
use crate::value_types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StarType {
    Blue,
    White,
    Yellow,
    Orange,
    Red,
    Neutron,
    BlackHole,
    NoStar,
}

impl StarType {
    pub const ALL: [StarType; 8] = [
        StarType::Blue,
        StarType::White,
        StarType::Yellow,
        StarType::Orange,
        StarType::Red,
        StarType::Neutron,
        StarType::BlackHole,
        StarType::NoStar,
    ];
}

impl ValueType for StarType {
    const TYPE_NAME: &'static str = "StarType";

    const VARIABLE_NAMES: &'static [Keyword] = &[
        Keyword::StarType,
        Keyword::NextOlderStarType,
        Keyword::NextYoungerStarType,
    ];

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_literal(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::White => "White",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Red => "Red",
            Self::Neutron => "Neutron",
            Self::BlackHole => "BlackHole",
            Self::NoStar => "NoStar",
        }
    }

    fn registry_slot() -> &'static GrammarSlot<Self> {
        static SLOT: GrammarSlot<StarType> = OnceLock::new();
        &SLOT
    }
}

impl fmt::Display for StarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ast::{ContainerType, Qualifier, ReferenceScope, ValueRef};
    use crate::pipeline::parse_value_ref;
    use assert_matches::assert_matches;

    #[test]
    fn test_every_literal_parses_to_constant() {
        for star in StarType::ALL {
            let parsed = parse_value_ref::<StarType>(star.as_literal()).unwrap();
            assert_matches!(parsed, ValueRef::Constant { value, .. } if value == star);
            assert_eq!(parsed.span().len(), star.as_literal().len());
        }
    }

    #[test]
    fn test_variable_names_parse_unqualified() {
        for &name in StarType::VARIABLE_NAMES {
            let parsed = parse_value_ref::<StarType>(name.as_str()).unwrap();
            assert_matches!(
                parsed,
                ValueRef::Variable { name: parsed_name, ref qualifiers, .. }
                    if parsed_name == name && qualifiers.is_empty()
            );
        }
    }

    #[test]
    fn test_qualified_variables() {
        let scoped = parse_value_ref::<StarType>("Source.StarType").unwrap();
        assert_matches!(
            scoped,
            ValueRef::Variable { ref qualifiers, .. }
                if qualifiers == &vec![Qualifier::Scope(ReferenceScope::Source)]
        );

        let contained = parse_value_ref::<StarType>("Target.System.NextOlderStarType").unwrap();
        assert_matches!(
            contained,
            ValueRef::Variable { name: Keyword::NextOlderStarType, ref qualifiers, .. }
                if qualifiers == &vec![
                    Qualifier::Scope(ReferenceScope::Target),
                    Qualifier::Container(ContainerType::System),
                ]
        );
    }

    #[test]
    fn test_foreign_variable_is_rejected() {
        assert!(parse_value_ref::<StarType>("PlanetEnvironment").is_err());
        assert!(parse_value_ref::<StarType>("Hostile").is_err());
    }

    #[test]
    fn test_display_is_literal() {
        assert_eq!(StarType::BlackHole.to_string(), "BlackHole");
        assert_eq!(StarType::ALL.len(), StarType::all().len());
    }
}
