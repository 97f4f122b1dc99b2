//! Span-accurate token stream
//!
//! Keeps every token (whitespace and comments included) with its original span, and
//! navigates only the significant ones. Positions handed out by `save_position` are
//! indices into the significant sequence, so restoring one is a plain assignment.

use crate::{
    tokens::token::*,
    utils::{Position, SourceMap, Span, Spanned},
};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
    source_map: Option<SourceMap>,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, spanned)| spanned.value.is_significant())
            .map(|(index, _)| index)
            .collect();

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
            source_map: None,
        }
    }

    /// Attach the source text for diagnostics
    pub fn with_source_map(tokens: Vec<SpannedToken>, source_map: SourceMap) -> Self {
        let mut stream = Self::new(tokens);
        stream.source_map = Some(source_map);
        stream
    }

    // === CORE NAVIGATION ===

    pub fn current(&self) -> Option<&SpannedToken> {
        self.peek_ahead(0)
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Significant token `n` positions ahead of the cursor
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Move past the current token; never moves past the end
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// True at EOF or past the last significant token
    pub fn is_at_end(&self) -> bool {
        self.current_token().map_or(true, Token::is_eof)
    }

    /// Number of significant tokens, EOF included
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len().saturating_sub(self.position)
    }

    // === CHECKPOINTS ===

    pub fn save_position(&self) -> usize {
        self.position
    }

    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    /// Consume the current token if it satisfies `predicate`
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<SpannedToken>
    where
        F: FnOnce(&Token) -> bool,
    {
        let matched = self.current().filter(|spanned| predicate(&spanned.value)).cloned();
        if matched.is_some() {
            self.advance();
        }
        matched
    }

    // === SPANS ===

    pub fn span_at_position(&self, position: usize) -> Option<Span> {
        self.significant_indices
            .get(position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
            .map(|spanned| spanned.span)
    }

    /// Span of the tokens consumed since `start_position`
    ///
    /// Zero-width at the current token when nothing was consumed.
    pub fn span_since(&self, start_position: usize) -> Span {
        let here = self
            .current_span()
            .map(|span| Span::point(span.start))
            .unwrap_or_else(|| self.end_span());

        if self.position <= start_position {
            return here;
        }

        match (
            self.span_at_position(start_position),
            self.span_at_position(self.position - 1),
        ) {
            (Some(first), Some(last)) => first.to(last),
            _ => here,
        }
    }

    /// Zero-width span at the end of input
    pub fn end_span(&self) -> Span {
        self.all_tokens
            .last()
            .map(|spanned| Span::point(spanned.span.end))
            .unwrap_or_else(|| Span::point(Position::start()))
    }

    // === DIAGNOSTICS ===

    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    /// Render a diagnostic against the source text when it is available
    pub fn format_error(&self, code: &str, span: Span, message: &str) -> String {
        match &self.source_map {
            Some(source_map) => source_map.format_error(code, &span, message),
            None => format!("error[{}]: {} at {}", code, message, span),
        }
    }

    /// Human-readable description of the current token
    pub fn describe_current(&self) -> String {
        self.current_token()
            .map(Token::describe)
            .unwrap_or_else(|| "end of input".to_string())
    }

    /// Significant tokens around the cursor, for error context
    pub fn context_snippet(&self, radius: usize) -> Vec<&SpannedToken> {
        let start = self.position.saturating_sub(radius);
        let end = (self.position + radius + 1).min(self.significant_indices.len());

        self.significant_indices[start..end]
            .iter()
            .filter_map(|&idx| self.all_tokens.get(idx))
            .collect()
    }

    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .filter_map(|&i| self.all_tokens.get(i))
    }

    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    pub fn has_eof(&self) -> bool {
        self.iter_significant()
            .last()
            .is_some_and(|spanned| spanned.value.is_eof())
    }

    pub fn diagnostic(&self) -> String {
        let current_info = match self.current() {
            Some(current) => format!("{} at {}", current.value.describe(), current.span),
            None => "<EOF>".to_string(),
        };

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.significant_indices.len(),
            current_info
        )
    }
}

/// Builds token streams from known text pieces, computing spans as it goes
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token whose source text is `text`
    pub fn push_token(mut self, token: Token, text: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(text);

        self.tokens.push(SpannedToken::new(token, Span::new(start, end)));
        self.current_position = end;
        self
    }

    pub fn push_token_with_span(mut self, token: Token, span: Span) -> Self {
        self.tokens.push(SpannedToken::new(token, span));
        self.current_position = span.end;
        self
    }

    /// Finish with an EOF token and build the stream
    pub fn build(mut self) -> TokenStream {
        self.tokens.push(SpannedToken::new(
            Token::Eof,
            Span::point(self.current_position),
        ));
        TokenStream::new(self.tokens)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Span integrity checks
pub mod validation {
    use super::*;

    /// Spans must not overlap or go backwards
    pub fn validate_span_order(tokens: &[SpannedToken]) -> Result<(), String> {
        for window in tokens.windows(2) {
            let current = window[0].span;
            let next = window[1].span;

            if current.end.offset > next.start.offset {
                return Err(format!(
                    "Span order violation: token ending at {} overlaps token starting at {}",
                    current.end.offset, next.start.offset
                ));
            }
        }
        Ok(())
    }

    /// Stream must end in exactly one EOF with ordered spans
    pub fn validate_token_stream(stream: &TokenStream) -> Result<(), String> {
        validate_span_order(stream.all_tokens())?;

        let eof_count = stream
            .all_tokens()
            .iter()
            .filter(|spanned| spanned.value.is_eof())
            .count();
        if eof_count != 1 || !stream.has_eof() {
            return Err(format!(
                "Token stream must end with a single EOF, found {}",
                eof_count
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::keywords::Keyword;

    fn source_star_type() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(Token::Keyword(Keyword::Source), "Source")
            .push_token(Token::Dot, ".")
            .push_token(Token::Space, " ")
            .push_token(Token::Comment("/* x */".into()), "/* x */")
            .push_token(Token::Keyword(Keyword::StarType), "StarType")
            .build()
    }

    #[test]
    fn test_filters_insignificant_tokens() {
        let stream = source_star_type();
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.all_tokens().len(), 6);
        assert!(stream.has_eof());
        assert!(validation::validate_token_stream(&stream).is_ok());
    }

    #[test]
    fn test_navigation_and_checkpoints() {
        let mut stream = source_star_type();
        let checkpoint = stream.save_position();

        assert!(stream
            .consume_if(|t| t.is_keyword(Keyword::Source))
            .is_some());
        assert!(stream.consume_if(|t| *t == Token::Equals).is_none());
        assert_eq!(stream.position(), 1);

        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::Keyword(Keyword::StarType)));

        stream.restore_position(checkpoint);
        assert_eq!(stream.position(), 0);
        assert!(!stream.is_at_end());
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut stream = TokenStreamBuilder::new().build();
        assert!(stream.is_at_end());
        assert_eq!(stream.describe_current(), "end of input");

        stream.advance();
        stream.advance();
        assert_eq!(stream.position(), 1);
        assert!(stream.is_at_end());
        assert_eq!(stream.describe_current(), "end of input");
    }

    #[test]
    fn test_span_since_covers_consumed_tokens() {
        let mut stream = source_star_type();
        stream.advance();
        stream.advance();
        stream.advance();

        let span = stream.span_since(0);
        assert_eq!(span.start.offset, 0);
        assert_eq!(span.end.offset, "Source. /* x */StarType".len());

        let empty = stream.span_since(3);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_context_snippet() {
        let mut stream = source_star_type();
        stream.advance();
        let snippet = stream.context_snippet(1);
        assert_eq!(snippet.len(), 3);
        assert_eq!(snippet[1].value, Token::Dot);
    }
}
