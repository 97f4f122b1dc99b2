//! Source text to parsed tree: lexical analysis, grammar lookup, syntax analysis
//!
//! Every entry point runs inside a logging source context, so lexer and parser events
//! and the rendered diagnostics carry the source name.

mod error;
mod result;

pub use error::PipelineError;
pub use result::PipelineResult;

use crate::config::runtime::{ParserPreferences, RuntimeConfig};
use crate::grammar::ast::{Condition, ValueRef};
use crate::grammar::registry::get_parser_rule;
use crate::lexical::LexicalAnalyzer;
use crate::logging::{self, codes, Code};
use crate::syntax::{self, SyntaxResult};
use crate::tokens::TokenStream;
use crate::utils::SourceMap;
use crate::value_types::ValueType;
use std::time::Instant;

const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Parse a value reference with `T`'s public entry rule
pub fn parse_value_ref<T: ValueType>(source: &str) -> Result<ValueRef<T>, PipelineError> {
    parse_value_ref_named::<T>(DEFAULT_SOURCE_NAME, source)
}

/// Parse a value reference; `name` appears in diagnostics and log events
pub fn parse_value_ref_named<T: ValueType>(
    name: &str,
    source: &str,
) -> Result<ValueRef<T>, PipelineError> {
    parse_value_ref_with_config::<T>(name, source, &RuntimeConfig::default())
        .map(PipelineResult::into_value)
}

pub fn parse_value_ref_with_config<T: ValueType>(
    name: &str,
    source: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult<ValueRef<T>>, PipelineError> {
    let grammar = get_parser_rule::<T>()?;
    run(
        name,
        source,
        config,
        grammar.entry_rule().name(),
        codes::success::VALUE_REF_PARSED,
        |tokens, preferences| syntax::parse_value_ref_tokens(grammar, tokens, preferences),
    )
}

/// Parse a value reference with the `expr` rule, so function forms are accepted
pub fn parse_value_ref_expression<T: ValueType>(
    source: &str,
) -> Result<ValueRef<T>, PipelineError> {
    let grammar = get_parser_rule::<T>()?;
    run(
        DEFAULT_SOURCE_NAME,
        source,
        &RuntimeConfig::default(),
        grammar.expression_rule().name(),
        codes::success::VALUE_REF_PARSED,
        |tokens, preferences| syntax::parse_expression_tokens(grammar, tokens, preferences),
    )
    .map(PipelineResult::into_value)
}

pub fn parse_condition(source: &str) -> Result<Condition, PipelineError> {
    parse_condition_with_config(DEFAULT_SOURCE_NAME, source, &RuntimeConfig::default())
        .map(PipelineResult::into_value)
}

pub fn parse_condition_with_config(
    name: &str,
    source: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult<Condition>, PipelineError> {
    run(
        name,
        source,
        config,
        "condition",
        codes::success::CONDITION_PARSED,
        syntax::parse_condition_tokens,
    )
}

fn run<N, F>(
    name: &str,
    source: &str,
    config: &RuntimeConfig,
    entry: &str,
    success_code: Code,
    parse: F,
) -> Result<PipelineResult<N>, PipelineError>
where
    F: FnOnce(TokenStream, ParserPreferences) -> SyntaxResult<N>,
{
    logging::with_source_context(name, || -> Result<PipelineResult<N>, PipelineError> {
        let start_time = Instant::now();

        let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
        let tokens = analyzer.tokenize_named(name, source)?;
        let lexical_metrics = analyzer.metrics().clone();

        let value = parse(tokens, config.parser.clone())?;

        let result = PipelineResult::new(value, name, lexical_metrics, start_time.elapsed());
        result.log_success(success_code, entry);
        Ok(result)
    })
}

/// Cargo-style rendering of a pipeline failure against its source
pub fn format_diagnostic(source_name: &str, source: &str, error: &PipelineError) -> String {
    let source_map = SourceMap::new(source_name, source);
    let code = error.error_code();

    match error.span_in(&source_map) {
        Some(span) => source_map.format_error(code.as_str(), &span, &error.to_string()),
        None => format!("error[{}]: {}\n  --> {}\n", code, error, source_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;
    use crate::logging::{with_scoped_logger, LogLevel, LoggingService, MemoryLogger};
    use crate::syntax::SyntaxError;
    use crate::value_types::{PlanetEnvironment, StarType};
    use assert_matches::assert_matches;
    use std::sync::Arc;

    #[test]
    fn test_unknown_token_fails_at_start() {
        let error = parse_value_ref::<StarType>("Foo").unwrap_err();
        assert_matches!(
            error,
            PipelineError::SyntaxAnalysis(SyntaxError::NoViableAlternative {
                ref expected, ref found, position: 0, ..
            }) if expected == "StarType expression" && found == "'Foo'"
        );

        let again = parse_value_ref::<StarType>("Foo").unwrap_err();
        assert_eq!(error, again);
    }

    #[test]
    fn test_empty_input_fails() {
        for source in ["", "   // nothing here\n"] {
            assert_matches!(
                parse_value_ref::<StarType>(source),
                Err(PipelineError::SyntaxAnalysis(SyntaxError::NoViableAlternative {
                    ref found, position: 0, ..
                })) if found == "end of input"
            );
        }
    }

    #[test]
    fn test_statistic_nesting() {
        let node = parse_value_ref::<StarType>("Mode value = StarType condition = All").unwrap();
        assert_matches!(node, ValueRef::Statistic { .. });

        let nested = parse_value_ref::<StarType>(
            "Mode value = Mode value = StarType condition = All condition = All",
        );
        assert_matches!(
            nested,
            Err(PipelineError::SyntaxAnalysis(SyntaxError::UnexpectedToken { .. }))
        );
    }

    #[test]
    fn test_function_forms_need_expression_entry() {
        assert_matches!(
            parse_value_ref::<StarType>("OneOf(Blue, Red)"),
            Err(PipelineError::SyntaxAnalysis(SyntaxError::NoViableAlternative { .. }))
        );

        let node = parse_value_ref_expression::<StarType>("OneOf(Blue, Red)").unwrap();
        assert_eq!(node.to_string(), "OneOf(Blue, Red)");

        assert_matches!(
            parse_value_ref_expression::<StarType>("Min(Blue,"),
            Err(PipelineError::SyntaxAnalysis(SyntaxError::UnexpectedToken { .. }))
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_matches!(
            parse_value_ref::<StarType>("Blue Red"),
            Err(PipelineError::SyntaxAnalysis(SyntaxError::TrailingInput { position: 1, .. }))
        );
    }

    #[test]
    fn test_lexical_errors_surface() {
        let error = parse_value_ref::<StarType>("Blue;").unwrap_err();
        assert_matches!(
            error,
            PipelineError::LexicalAnalysis(crate::lexical::LexerError::InvalidCharacter {
                character: ';',
                ..
            })
        );

        let rendered = format_diagnostic("stars.txt", "Blue;", &error);
        assert!(rendered.starts_with("error[E020]"));
        assert!(rendered.contains("--> stars.txt:1:5"));
    }

    #[test]
    fn test_conditions_embed_typed_values() {
        let condition = parse_condition(
            "And [ Star type = [Blue Red] Planet environment = Good Not Capital ]",
        )
        .unwrap();

        let Condition::And(operands) = condition else {
            panic!("expected a conjunction");
        };
        assert_eq!(operands.len(), 3);
        assert_matches!(operands[0], Condition::StarType(ref values) if values.len() == 2);
        assert_matches!(
            operands[1],
            Condition::PlanetEnvironment(ref values)
                if values[0].constant_value() == Some(&PlanetEnvironment::Good)
        );
    }

    #[test]
    fn test_condition_values_accept_function_forms() {
        let condition = parse_condition("Star type = OneOf(Blue, Red)").unwrap();

        let Condition::StarType(ref values) = condition else {
            panic!("expected a star type condition");
        };
        assert_eq!(values.len(), 1);
        assert_matches!(values[0], ValueRef::Operation { ref operands, .. } if operands.len() == 2);

        let reparsed = parse_condition(&condition.to_string()).unwrap();
        assert_eq!(condition, reparsed);
    }

    #[test]
    fn test_condition_display_reparses() {
        let source = "Or [ Star type = [ Blue NextOlderStarType ] Not Ship ]";
        let condition = parse_condition(source).unwrap();

        let reparsed = parse_condition(&condition.to_string()).unwrap();
        assert_eq!(condition, reparsed);
    }

    #[test]
    fn test_named_source_in_diagnostics() {
        let source = "Mode value = Blue\ncondition = Star type = Good";
        let error = parse_value_ref_named::<StarType>("content/stars.txt", source).unwrap_err();

        let rendered = format_diagnostic("content/stars.txt", source, &error);
        assert!(rendered.starts_with("error[E050]"));
        assert!(rendered.contains("--> content/stars.txt:2:25"));
        assert!(rendered.contains("^^^^"));
    }

    #[test]
    fn test_with_config_reports_metrics() {
        let result = parse_value_ref_with_config::<StarType>(
            "<config>",
            "Source.Planet.StarType // qualified",
            &RuntimeConfig::default(),
        )
        .unwrap();

        assert_eq!(result.token_count, 5);
        assert_eq!(result.lexical_metrics.comment_count, 1);
        assert_eq!(result.source_name, "<config>");
        assert_matches!(
            result.value,
            ValueRef::Variable { name: Keyword::StarType, ref qualifiers, .. } if qualifiers.len() == 2
        );
    }

    #[test]
    fn test_events_are_logged() {
        let memory = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Info));

        with_scoped_logger(service, || {
            assert!(parse_value_ref::<StarType>("[Foo]").is_err());
            assert!(parse_value_ref::<StarType>("NextYoungerStarType").is_ok());
            assert!(parse_condition("Capital").is_ok());
        });

        assert!(memory.has_error_with_code(codes::syntax::NO_VIABLE_ALTERNATIVE));
        assert!(memory.has_success_with_code(codes::success::VALUE_REF_PARSED));
        assert!(memory.has_success_with_code(codes::success::CONDITION_PARSED));
    }
}
