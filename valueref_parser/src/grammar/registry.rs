//! Process-wide grammar registry
//!
//! Each value type owns one slot. The first lookup composes the grammar; every later
//! lookup, from any thread, returns the same instance or the same cached failure.

use crate::grammar::composition::ValueRefGrammar;
use crate::grammar::error::GrammarDefinitionError;
use crate::logging::codes;
use crate::value_types::{PlanetEnvironment, StarType, ValueType, ValueTypeTag};
use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Storage for one value type's composed grammar
pub type GrammarSlot<T> = OnceLock<Result<ValueRefGrammar<T>, GrammarDefinitionError>>;

/// Tags of the grammars built successfully so far
static CONSTRUCTED: Mutex<BTreeSet<ValueTypeTag>> = Mutex::new(BTreeSet::new());

/// The grammar for `T`, built on first use
///
/// Concurrent first calls block until a single construction finishes. A definition
/// error is cached and returned by every call.
pub fn get_parser_rule<T: ValueType>() -> Result<&'static ValueRefGrammar<T>, GrammarDefinitionError> {
    T::registry_slot()
        .get_or_init(build_grammar::<T>)
        .as_ref()
        .map_err(Clone::clone)
}

fn build_grammar<T: ValueType>() -> Result<ValueRefGrammar<T>, GrammarDefinitionError> {
    let result = ValueRefGrammar::<T>::compose();

    match &result {
        Ok(grammar) => {
            CONSTRUCTED
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(T::TAG);

            if crate::logging::config::log_registry_events() {
                log_success!(codes::success::GRAMMAR_CONSTRUCTED, "Value-reference grammar constructed",
                    "value_type" => T::TAG,
                    "entry_rule" => grammar.entry_rule().name()
                );
            }
        }
        Err(error) => {
            log_error!(error.error_code(), "Value-reference grammar construction failed",
                "value_type" => T::TAG,
                "error" => error
            );
        }
    }

    result
}

/// Value types whose grammar has been constructed, in tag order
pub fn registered_value_types() -> Vec<ValueTypeTag> {
    CONSTRUCTED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .copied()
        .collect()
}

pub fn is_registered<T: ValueType>() -> bool {
    matches!(T::registry_slot().get(), Some(Ok(_)))
}

/// Eagerly construct every built-in grammar
pub fn initialize_builtin_grammars() -> Result<(), GrammarDefinitionError> {
    get_parser_rule::<StarType>()?;
    get_parser_rule::<PlanetEnvironment>()?;

    log_success!(codes::success::GRAMMAR_VALIDATION_PASSED, "Built-in value-reference grammars ready",
        "count" => registered_value_types().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;
    use std::thread;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Broken {
        Calm,
    }

    impl ValueType for Broken {
        const TYPE_NAME: &'static str = "Broken";
        const VARIABLE_NAMES: &'static [Keyword] = &[Keyword::StarType];

        fn all() -> &'static [Self] {
            &[Broken::Calm]
        }

        fn as_literal(self) -> &'static str {
            "All"
        }

        fn registry_slot() -> &'static GrammarSlot<Self> {
            static SLOT: GrammarSlot<Broken> = OnceLock::new();
            &SLOT
        }
    }

    #[test]
    fn test_same_instance_on_every_lookup() {
        let first = get_parser_rule::<StarType>().unwrap();
        let second = get_parser_rule::<StarType>().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(is_registered::<StarType>());
        assert!(registered_value_types().contains(&StarType::TAG));
    }

    #[test]
    fn test_concurrent_first_use_yields_one_instance() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    get_parser_rule::<PlanetEnvironment>().unwrap() as *const _ as usize
                })
            })
            .collect();

        let addresses: BTreeSet<usize> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(addresses.len(), 1);
    }

    #[test]
    fn test_definition_error_is_cached() {
        let first = get_parser_rule::<Broken>().unwrap_err();
        let second = get_parser_rule::<Broken>().unwrap_err();

        assert_eq!(first, second);
        assert_eq!(first.type_name(), "Broken");
        assert!(!is_registered::<Broken>());
        assert!(!registered_value_types().contains(&Broken::TAG));
    }

    #[test]
    fn test_initialize_builtin_grammars() {
        initialize_builtin_grammars().unwrap();
        assert!(is_registered::<StarType>());
        assert!(is_registered::<PlanetEnvironment>());
    }
}
