//! Token system for value-reference scripts
//!
//! The lexer produces a [`TokenStream`] of spanned [`Token`]s. Whitespace and comments
//! are kept with their spans for diagnostics, but the parser only navigates significant
//! tokens: keywords, identifiers, punctuation and the final EOF.
//!
//! ## Key Components
//!
//! - **[`Token`]** - keywords, identifiers, punctuation, trivia and EOF
//! - **[`TokenStream`]** - filtered navigation with checkpoints for backtracking
//! - **[`TokenStreamBuilder`]** - builds streams with computed spans, mainly for tests

pub mod token;
pub mod token_stream;

pub use token::{classify_punctuation, classify_word, Token, TokenClass};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder};

pub use crate::utils::{Position, SourceMap, Span, Spanned};
