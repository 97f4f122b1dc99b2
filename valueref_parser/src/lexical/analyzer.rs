//! Core lexical analyzer
//!
//! Turns script text into spanned tokens under the compile-time lexical limits and
//! reports through the global logging macros.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{classify_punctuation, classify_word, Token, TokenStream};
use crate::utils::{Position, SourceMap, Span, Spanned};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character: '{character}' at line {line}, column {column}")]
    InvalidCharacter {
        character: char,
        line: u32,
        column: u32,
    },

    #[error("Unterminated block comment starting at line {line}, column {column}")]
    UnterminatedComment { line: u32, column: u32 },

    #[error("Identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH})")]
    IdentifierTooLong { length: usize },

    #[error("Source too large: {size} bytes (max {MAX_SOURCE_SIZE})")]
    SourceTooLarge { size: usize },

    #[error("Comment too long: {length} characters (max {MAX_COMMENT_LENGTH})")]
    CommentTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::UnterminatedComment { .. } => codes::lexical::UNTERMINATED_COMMENT,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::SourceTooLarge { .. } => codes::lexical::SOURCE_TOO_LARGE,
            LexerError::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// Token distribution for one tokenization
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub punctuation_tokens: usize,
    pub whitespace_tokens: usize,
    pub comment_count: usize,
    pub max_comment_length: usize,
    pub max_identifier_length: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token {
            Token::Keyword(_) => self.keyword_tokens += 1,
            Token::Identifier(name) => {
                self.identifier_tokens += 1;
                self.max_identifier_length = self.max_identifier_length.max(name.len());
            }
            Token::Space | Token::Tab | Token::Newline => self.whitespace_tokens += 1,
            Token::Comment(text) => {
                self.comment_count += 1;
                self.max_comment_length = self.max_comment_length.max(text.chars().count());
            }
            Token::Eof => {}
            _ => self.punctuation_tokens += 1,
        }
    }

    /// Tokens the parser will see, EOF excluded
    pub fn significant_tokens(&self) -> usize {
        self.keyword_tokens + self.identifier_tokens + self.punctuation_tokens
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Lexical analyzer with per-run metrics and runtime preferences
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize anonymous script text
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.tokenize_named("<input>", source)
    }

    /// Tokenize script text; `name` appears in diagnostics
    pub fn tokenize_named(&mut self, name: &str, source: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        if source.len() > MAX_SOURCE_SIZE {
            let error = LexerError::SourceTooLarge { size: source.len() };
            log_error!(error.error_code(), "Script exceeds maximum source size",
                "source" => name,
                "size" => source.len(),
                "limit" => MAX_SOURCE_SIZE
            );
            return Err(error);
        }

        log_debug!("Starting lexical analysis",
            "source" => name,
            "size_bytes" => source.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut tokens = Vec::new();
        let mut chars = source.char_indices().peekable();
        let mut current_pos = Position::start();

        while let Some(&(byte_offset, ch)) = chars.peek() {
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len(),
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = Span::point(current_pos),
                    "token_count" => tokens.len(),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let result = match ch {
                ' ' => Ok(self.single(&mut chars, Token::Space)),
                '\t' => Ok(self.single(&mut chars, Token::Tab)),
                '\n' => Ok(self.single(&mut chars, Token::Newline)),
                '\r' => {
                    chars.next();
                    if chars.peek().map(|(_, c)| *c) == Some('\n') {
                        chars.next();
                    }
                    Ok(Token::Newline)
                }
                '/' => self.lex_comment(source, byte_offset, current_pos, &mut chars),
                'a'..='z' | 'A'..='Z' | '_' => self.lex_word(source, byte_offset, &mut chars),
                _ => match classify_punctuation(ch) {
                    Some(token) => Ok(self.single(&mut chars, token)),
                    None => Err(LexerError::InvalidCharacter {
                        character: ch,
                        line: current_pos.line,
                        column: current_pos.column,
                    }),
                },
            };

            let token = match result {
                Ok(token) => token,
                Err(error) => {
                    let error_message = if self.preferences.include_position_in_errors {
                        format!(
                            "Lexical analysis failed at line {}, column {}",
                            current_pos.line, current_pos.column
                        )
                    } else {
                        "Lexical analysis failed".to_string()
                    };
                    log_error!(error.error_code(), &error_message,
                        span = Span::point(current_pos),
                        "character" => ch.escape_debug(),
                        "tokens_processed" => tokens.len()
                    );
                    return Err(error);
                }
            };

            let end_offset = chars.peek().map_or(source.len(), |&(offset, _)| offset);
            let end_pos = if token == Token::Newline {
                Position::new(end_offset, current_pos.line + 1, 1)
            } else {
                current_pos.advance_str(&source[byte_offset..end_offset])
            };

            if self.preferences.collect_metrics {
                self.metrics.record_token(&token);
            }
            tokens.push(Spanned::new(token, Span::new(current_pos, end_pos)));
            current_pos = end_pos;
        }

        tokens.push(Spanned::new(Token::Eof, Span::point(current_pos)));
        let token_stream = TokenStream::with_source_map(tokens, SourceMap::new(name, source));

        if self.preferences.log_token_summary {
            log_success!(codes::success::TOKENIZATION_COMPLETE,
                "Lexical analysis completed successfully",
                "source" => name,
                "significant_tokens" => token_stream.len(),
                "keywords" => self.metrics.keyword_tokens,
                "identifiers" => self.metrics.identifier_tokens,
                "punctuation" => self.metrics.punctuation_tokens,
                "comments" => self.metrics.comment_count
            );
        }

        Ok(token_stream)
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    // ========================================================================
    // Private scanning methods
    // ========================================================================

    fn single(&self, chars: &mut Chars<'_>, token: Token) -> Token {
        chars.next();
        token
    }

    fn lex_word(
        &self,
        source: &str,
        start: usize,
        chars: &mut Chars<'_>,
    ) -> Result<Token, LexerError> {
        chars.next();
        while let Some(&(_, ch)) = chars.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                chars.next();
            } else {
                break;
            }
        }

        let end = chars.peek().map_or(source.len(), |&(offset, _)| offset);
        let word = &source[start..end];

        if word.len() > MAX_IDENTIFIER_LENGTH {
            return Err(LexerError::IdentifierTooLong { length: word.len() });
        }

        Ok(classify_word(word))
    }

    fn lex_comment(
        &self,
        source: &str,
        start: usize,
        start_pos: Position,
        chars: &mut Chars<'_>,
    ) -> Result<Token, LexerError> {
        let invalid = LexerError::InvalidCharacter {
            character: '/',
            line: start_pos.line,
            column: start_pos.column,
        };

        chars.next();
        match chars.peek().map(|&(_, c)| c) {
            Some('/') => {
                while let Some(&(_, ch)) = chars.peek() {
                    if ch == '\n' || ch == '\r' {
                        break;
                    }
                    chars.next();
                }
            }
            Some('*') => {
                chars.next();
                let mut previous = '\0';
                let mut closed = false;
                for (_, ch) in chars.by_ref() {
                    if previous == '*' && ch == '/' {
                        closed = true;
                        break;
                    }
                    previous = ch;
                }
                if !closed {
                    return Err(LexerError::UnterminatedComment {
                        line: start_pos.line,
                        column: start_pos.column,
                    });
                }
            }
            _ => return Err(invalid),
        }

        let end = chars.peek().map_or(source.len(), |&(offset, _)| offset);
        let text = &source[start..end];
        let length = text.chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(LexerError::CommentTooLong { length });
        }

        Ok(Token::Comment(text.to_string()))
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;
    use assert_matches::assert_matches;

    fn significant(source: &str) -> Vec<Token> {
        LexicalAnalyzer::new()
            .tokenize(source)
            .unwrap()
            .iter_significant()
            .map(|spanned| spanned.value.clone())
            .collect()
    }

    #[test]
    fn test_qualified_variable() {
        assert_eq!(
            significant("Source.Planet.StarType"),
            vec![
                Token::Keyword(Keyword::Source),
                Token::Dot,
                Token::Keyword(Keyword::Planet),
                Token::Dot,
                Token::Keyword(Keyword::StarType),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_literals_are_identifiers() {
        assert_eq!(
            significant("OneOf(Blue, BlackHole)"),
            vec![
                Token::Keyword(Keyword::OneOf),
                Token::LeftParen,
                Token::Identifier("Blue".into()),
                Token::Comma,
                Token::Identifier("BlackHole".into()),
                Token::RightParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_and_whitespace_are_kept_but_insignificant() {
        let source = "Mode // aggregate\n\tvalue /* label */ = StarType";
        let stream = LexicalAnalyzer::new().tokenize(source).unwrap();

        let comments: Vec<&Token> = stream
            .all_tokens()
            .iter()
            .map(|spanned| &spanned.value)
            .filter(|token| matches!(token, Token::Comment(_)))
            .collect();
        assert_eq!(
            comments,
            vec![
                &Token::Comment("// aggregate".into()),
                &Token::Comment("/* label */".into())
            ]
        );
        assert_eq!(stream.len(), 5);
    }

    #[test]
    fn test_spans_track_lines_and_columns() {
        let stream = LexicalAnalyzer::new().tokenize("Star\r\n  type").unwrap();
        let type_token = stream
            .iter_significant()
            .find(|spanned| spanned.value.is_keyword(Keyword::Type))
            .unwrap();

        assert_eq!(type_token.span.start.line, 2);
        assert_eq!(type_token.span.start.column, 3);
        assert_eq!(type_token.span.start.offset, 8);
        assert!(crate::tokens::token_stream::validation::validate_token_stream(&stream).is_ok());
    }

    #[test]
    fn test_empty_input_is_only_eof() {
        assert_eq!(significant(""), vec![Token::Eof]);
        assert_eq!(significant("  \n// nothing"), vec![Token::Eof]);
    }

    #[test]
    fn test_invalid_character() {
        let result = LexicalAnalyzer::new().tokenize("StarType + Blue");
        assert_matches!(
            result,
            Err(LexerError::InvalidCharacter {
                character: '+',
                line: 1,
                column: 10
            })
        );

        let lone_slash = LexicalAnalyzer::new().tokenize("Blue / Red");
        assert_matches!(lone_slash, Err(LexerError::InvalidCharacter { character: '/', .. }));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let result = LexicalAnalyzer::new().tokenize("Blue /* never closed");
        assert_matches!(
            result,
            Err(LexerError::UnterminatedComment { line: 1, column: 6 })
        );
    }

    #[test]
    fn test_identifier_too_long() {
        let word = "X".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let result = LexicalAnalyzer::new().tokenize(&word);
        assert_matches!(result, Err(LexerError::IdentifierTooLong { length }) if length == word.len());
    }

    #[test]
    fn test_metrics_follow_preferences() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("Not Capital // c").unwrap();
        let metrics = analyzer.metrics().clone();
        assert_eq!(metrics.keyword_tokens, 2);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.significant_tokens(), 2);

        let mut quiet = LexicalAnalyzer::with_preferences(LexicalPreferences {
            collect_metrics: false,
            ..Default::default()
        });
        quiet.tokenize("Not Capital").unwrap();
        assert_eq!(quiet.metrics().total_tokens, 0);
    }

    #[test]
    fn test_error_codes() {
        let error = LexerError::TooManyTokens { count: 1 };
        assert_eq!(error.error_code(), codes::lexical::TOO_MANY_TOKENS);
        assert!(error.requires_halt());
        assert_eq!(
            LexerError::UnterminatedComment { line: 1, column: 1 }.error_code(),
            codes::lexical::UNTERMINATED_COMMENT
        );
    }
}
