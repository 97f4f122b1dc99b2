//! Reserved words of the value-reference language
//!
//! Keywords are case-sensitive and must match exactly. Enum literal spellings such as
//! `Blue` or `Hostile` are deliberately absent: they lex as identifiers and each value
//! type matches them against its own literal table.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Keyword {
    // === BOUND VARIABLE NAMES ===
    StarType,
    NextOlderStarType,
    NextYoungerStarType,
    PlanetEnvironment,

    // === REFERENCE SCOPES ===
    Source,
    Target,
    LocalCandidate,
    RootCandidate,

    // === CONTAINER / OBJECT TYPES ===
    Planet,
    System,
    Fleet,
    Ship,
    Building,

    // === STATISTICS ===
    Mode,

    // === FUNCTIONS ===
    OneOf,
    Min,
    Max,

    // === LABELS (LOWERCASE) ===
    Value,
    Condition,
    Type,
    Environment,

    // === CONDITIONS ===
    All,
    Capital,
    Star,
    And,
    Or,
    Not,
}

impl Keyword {
    /// Every keyword, in declaration order
    pub const ALL: &'static [Keyword] = &[
        Keyword::StarType,
        Keyword::NextOlderStarType,
        Keyword::NextYoungerStarType,
        Keyword::PlanetEnvironment,
        Keyword::Source,
        Keyword::Target,
        Keyword::LocalCandidate,
        Keyword::RootCandidate,
        Keyword::Planet,
        Keyword::System,
        Keyword::Fleet,
        Keyword::Ship,
        Keyword::Building,
        Keyword::Mode,
        Keyword::OneOf,
        Keyword::Min,
        Keyword::Max,
        Keyword::Value,
        Keyword::Condition,
        Keyword::Type,
        Keyword::Environment,
        Keyword::All,
        Keyword::Capital,
        Keyword::Star,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
    ];

    /// Script spelling of the keyword
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StarType => "StarType",
            Self::NextOlderStarType => "NextOlderStarType",
            Self::NextYoungerStarType => "NextYoungerStarType",
            Self::PlanetEnvironment => "PlanetEnvironment",

            Self::Source => "Source",
            Self::Target => "Target",
            Self::LocalCandidate => "LocalCandidate",
            Self::RootCandidate => "RootCandidate",

            Self::Planet => "Planet",
            Self::System => "System",
            Self::Fleet => "Fleet",
            Self::Ship => "Ship",
            Self::Building => "Building",

            Self::Mode => "Mode",

            Self::OneOf => "OneOf",
            Self::Min => "Min",
            Self::Max => "Max",

            Self::Value => "value",
            Self::Condition => "condition",
            Self::Type => "type",
            Self::Environment => "environment",

            Self::All => "All",
            Self::Capital => "Capital",
            Self::Star => "Star",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|keyword| keyword.as_str() == s)
    }

    pub const fn is_variable_name(self) -> bool {
        matches!(
            self,
            Self::StarType
                | Self::NextOlderStarType
                | Self::NextYoungerStarType
                | Self::PlanetEnvironment
        )
    }

    pub const fn is_reference_scope(self) -> bool {
        matches!(
            self,
            Self::Source | Self::Target | Self::LocalCandidate | Self::RootCandidate
        )
    }

    pub const fn is_container_type(self) -> bool {
        matches!(self, Self::Planet | Self::System | Self::Fleet)
    }

    pub const fn is_function(self) -> bool {
        matches!(self, Self::OneOf | Self::Min | Self::Max)
    }

    pub const fn is_label(self) -> bool {
        matches!(
            self,
            Self::Value | Self::Condition | Self::Type | Self::Environment
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check if a string is a reserved keyword
pub fn is_reserved_keyword(s: &str) -> bool {
    Keyword::from_str(s).is_some()
}

/// All reserved spellings, for diagnostics and grammar validation
pub fn reserved_keywords() -> Vec<&'static str> {
    Keyword::ALL.iter().map(|keyword| keyword.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_round_trip_every_keyword() {
        for &keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_spellings_are_unique() {
        let spellings: HashSet<&str> = reserved_keywords().into_iter().collect();
        assert_eq!(spellings.len(), Keyword::ALL.len());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Keyword::from_str("Mode"), Some(Keyword::Mode));
        assert_eq!(Keyword::from_str("mode"), None);
        assert_eq!(Keyword::from_str("value"), Some(Keyword::Value));
        assert_eq!(Keyword::from_str("Value"), None);
        assert_eq!(Keyword::from_str("startype"), None);
    }

    #[test]
    fn test_enum_literals_are_not_keywords() {
        for literal in ["Blue", "BlackHole", "NoStar", "Hostile", "Good"] {
            assert!(!is_reserved_keyword(literal), "{} must lex as identifier", literal);
        }
    }

    #[test]
    fn test_classification() {
        assert!(Keyword::NextOlderStarType.is_variable_name());
        assert!(Keyword::RootCandidate.is_reference_scope());
        assert!(Keyword::Fleet.is_container_type());
        assert!(!Keyword::Ship.is_container_type());
        assert!(Keyword::OneOf.is_function());
        assert!(Keyword::Environment.is_label());
    }
}
