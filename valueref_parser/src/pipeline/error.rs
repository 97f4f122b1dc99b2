use crate::grammar::error::GrammarDefinitionError;
use crate::lexical::LexerError;
use crate::logging::Code;
use crate::syntax::SyntaxError;
use crate::utils::{SourceMap, Span};

/// Pipeline processing errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Grammar unavailable: {0}")]
    GrammarDefinition(#[from] GrammarDefinitionError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::LexicalAnalysis(error) => error.error_code(),
            Self::SyntaxAnalysis(error) => error.error_code(),
            Self::GrammarDefinition(error) => error.error_code(),
        }
    }

    /// Where in `source_map` the failure happened, when it is known
    pub fn span_in(&self, source_map: &SourceMap) -> Option<Span> {
        match self {
            Self::SyntaxAnalysis(error) => error.span(),
            Self::LexicalAnalysis(
                LexerError::InvalidCharacter { line, column, .. }
                | LexerError::UnterminatedComment { line, column },
            ) => Some(Span::point(source_map.position_of(*line, *column))),
            _ => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        match self {
            Self::LexicalAnalysis(error) => error.requires_halt(),
            Self::SyntaxAnalysis(error) => error.requires_halt(),
            Self::GrammarDefinition(error) => error.requires_halt(),
        }
    }
}
