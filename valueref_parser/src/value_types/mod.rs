//! Enumerated value types with their own value-reference grammars
//!
//! A [`ValueType`] supplies everything the generic grammar needs to know about one
//! enumeration: its literal spellings, the variable keywords that yield it, and the
//! registry slot holding its composed grammar.

pub mod planet_environment;
pub mod star_type;

pub use planet_environment::PlanetEnvironment;
pub use star_type::StarType;

use crate::grammar::keywords::Keyword;
use crate::grammar::registry::GrammarSlot;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// Identifies a value-type instantiation in the grammar registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ValueTypeTag(&'static str);

impl ValueTypeTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ValueTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An enumeration that can be parsed as a value reference
pub trait ValueType: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Prefix of every rule name in this type's grammar
    const TYPE_NAME: &'static str;

    const TAG: ValueTypeTag = ValueTypeTag::new(Self::TYPE_NAME);

    /// Bound-variable keywords that evaluate to this type
    const VARIABLE_NAMES: &'static [Keyword];

    /// Every value, in literal-table order
    fn all() -> &'static [Self];

    /// Script spelling of the value
    fn as_literal(self) -> &'static str;

    /// Exact, case-sensitive literal lookup
    fn from_literal(text: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|value| value.as_literal() == text)
    }

    /// Process-wide cell for this type's composed grammar
    fn registry_slot() -> &'static GrammarSlot<Self>;
}

/// Tags of every value type this crate instantiates
pub fn builtin_value_types() -> [ValueTypeTag; 2] {
    [StarType::TAG, PlanetEnvironment::TAG]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_follow_type_names() {
        assert_eq!(StarType::TAG.as_str(), "StarType");
        assert_eq!(PlanetEnvironment::TAG.to_string(), "PlanetEnvironment");
        assert!(builtin_value_types().contains(&StarType::TAG));
    }

    #[test]
    fn test_default_literal_lookup() {
        assert_eq!(StarType::from_literal("BlackHole"), Some(StarType::BlackHole));
        assert_eq!(StarType::from_literal("blackhole"), None);
        assert_eq!(PlanetEnvironment::from_literal("Hostile"), Some(PlanetEnvironment::Hostile));
        assert_eq!(PlanetEnvironment::from_literal("Blue"), None);
    }
}
