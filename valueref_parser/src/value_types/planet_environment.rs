//! Planet habitability for a species

use crate::grammar::keywords::Keyword;
use crate::grammar::registry::GrammarSlot;
use crate::value_types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanetEnvironment {
    Uninhabitable,
    Hostile,
    Poor,
    Adequate,
    Good,
}

impl PlanetEnvironment {
    pub const ALL: [PlanetEnvironment; 5] = [
        PlanetEnvironment::Uninhabitable,
        PlanetEnvironment::Hostile,
        PlanetEnvironment::Poor,
        PlanetEnvironment::Adequate,
        PlanetEnvironment::Good,
    ];
}

impl ValueType for PlanetEnvironment {
    const TYPE_NAME: &'static str = "PlanetEnvironment";

    const VARIABLE_NAMES: &'static [Keyword] = &[Keyword::PlanetEnvironment];

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn as_literal(self) -> &'static str {
        match self {
            Self::Uninhabitable => "Uninhabitable",
            Self::Hostile => "Hostile",
            Self::Poor => "Poor",
            Self::Adequate => "Adequate",
            Self::Good => "Good",
        }
    }

    fn registry_slot() -> &'static GrammarSlot<Self> {
        static SLOT: GrammarSlot<PlanetEnvironment> = OnceLock::new();
        &SLOT
    }
}

impl fmt::Display for PlanetEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}
