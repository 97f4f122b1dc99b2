//! Backtracking parse driver
//!
//! `ValueRefParser` owns the token cursor for one parse. Grammar rules drive it through
//! `try_rule`, which checkpoints the cursor, enforces the recursion limit, keeps the
//! named rule context for diagnostics, and restores the cursor whenever a rule does not
//! match.

use crate::config::compile_time::syntax::*;
use crate::config::runtime::ParserPreferences;
use crate::grammar::keywords::Keyword;
use crate::grammar::rules::{Rule, RuleResult};
use crate::grammar::ast::ValueRef;
use crate::grammar::composition::ValueRefGrammar;
use crate::syntax::error::{ContextualSyntaxError, ErrorContext, SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenStream};
use crate::utils::Span;
use crate::value_types::ValueType;
use std::collections::VecDeque;

/// Saved parser state for backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserCheckpoint {
    /// Significant-token index
    pub position: usize,
    /// Context stack height
    pub context_depth: usize,
}

pub struct ValueRefParser {
    tokens: TokenStream,
    context_stack: Vec<String>,
    /// Rule names entered past the context depth limit
    context_overflow: usize,
    error_history: VecDeque<SyntaxError>,
    parse_depth: usize,
    preferences: ParserPreferences,
}

impl ValueRefParser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, ParserPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: ParserPreferences) -> Self {
        log_debug!("Creating value-reference parser", "tokens" => tokens.len());

        Self {
            tokens,
            context_stack: Vec::new(),
            context_overflow: 0,
            error_history: VecDeque::new(),
            parse_depth: 0,
            preferences,
        }
    }

    // === CURSOR ===

    pub fn position(&self) -> usize {
        self.tokens.position()
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.current_token()
    }

    pub fn current_span(&self) -> Span {
        self.tokens
            .current_span()
            .unwrap_or_else(|| self.tokens.end_span())
    }

    /// Significant token `n` ahead, within the lookahead limit
    pub fn peek(&self, n: usize) -> Option<&Token> {
        if n >= MAX_LOOKAHEAD_TOKENS {
            return None;
        }
        self.tokens.peek_ahead(n).map(|spanned| &spanned.value)
    }

    pub fn peek_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.peek(n).is_some_and(|token| token.is_keyword(keyword))
    }

    /// Consume the current token, returning its span
    pub fn advance(&mut self) -> Span {
        let span = self.current_span();
        self.tokens.advance();
        span
    }

    pub fn is_at_end(&self) -> bool {
        self.tokens.is_at_end()
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Span of everything consumed since `start_position`
    pub fn span_since(&self, start_position: usize) -> Span {
        self.tokens.span_since(start_position)
    }

    // === BACKTRACKING SUPPORT ===

    pub fn save_checkpoint(&self) -> ParserCheckpoint {
        ParserCheckpoint {
            position: self.tokens.save_position(),
            context_depth: self.context_stack.len() + self.context_overflow,
        }
    }

    pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
        self.tokens.restore_position(checkpoint.position);
        if checkpoint.context_depth >= self.context_stack.len() {
            self.context_overflow = checkpoint.context_depth - self.context_stack.len();
        } else {
            self.context_stack.truncate(checkpoint.context_depth);
            self.context_overflow = 0;
        }
    }

    /// Run `rule` as a named rule
    ///
    /// The cursor is restored when the rule does not match or fails. Exceeding
    /// `MAX_PARSE_DEPTH` is a hard error.
    pub fn try_rule<N, F>(&mut self, name: &str, rule: F) -> RuleResult<N>
    where
        F: FnOnce(&mut Self) -> RuleResult<N>,
    {
        if self.parse_depth >= MAX_PARSE_DEPTH {
            return Err(SyntaxError::max_recursion_depth(
                self.parse_depth,
                self.current_span(),
            ));
        }

        let checkpoint = self.save_checkpoint();
        self.parse_depth += 1;
        self.push_context(name);

        if self.preferences.trace_rules {
            log_debug!("Entering rule",
                "rule" => name,
                "depth" => self.parse_depth,
                "position" => checkpoint.position
            );
        }

        let result = rule(self);

        self.parse_depth -= 1;
        self.pop_context();
        match &result {
            Ok(Some(_)) => {
                if self.preferences.trace_rules {
                    log_debug!("Rule matched",
                        "rule" => name,
                        "consumed" => self.position() - checkpoint.position
                    );
                }
            }
            Ok(None) => {
                self.tokens.restore_position(checkpoint.position);
                if self.preferences.trace_rules {
                    log_debug!("Rule did not match, backtracking",
                        "rule" => name,
                        "position" => checkpoint.position
                    );
                }
            }
            Err(error) => {
                self.tokens.restore_position(checkpoint.position);
                if self.preferences.trace_rules {
                    log_debug!("Rule failed",
                        "rule" => name,
                        "code" => error.error_code()
                    );
                }
            }
        }

        result
    }

    /// Ordered alternation: the first rule that matches wins
    pub fn first_of<T: ValueType>(
        &mut self,
        grammar: &ValueRefGrammar<T>,
        alternatives: &[&Rule<T>],
    ) -> RuleResult<ValueRef<T>> {
        for rule in alternatives {
            if let Some(node) = rule.apply(grammar, self)? {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    // === TOKEN MATCHING ===

    /// Consume `expected` if it is next
    pub fn match_token(&mut self, expected: &Token) -> Option<Span> {
        self.tokens
            .consume_if(|token| token == expected)
            .map(|spanned| spanned.span)
    }

    pub fn match_keyword(&mut self, keyword: Keyword) -> Option<Span> {
        self.tokens
            .consume_if(|token| token.is_keyword(keyword))
            .map(|spanned| spanned.span)
    }

    /// Committed match: anything else is an expectation failure
    pub fn expect_token(&mut self, expected: &Token) -> Result<Span, SyntaxError> {
        match self.match_token(expected) {
            Some(span) => Ok(span),
            None => Err(self.unexpected(&expected.describe())),
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, SyntaxError> {
        match self.match_keyword(keyword) {
            Some(span) => Ok(span),
            None => Err(self.unexpected(&Token::Keyword(keyword).describe())),
        }
    }

    /// Turn a committed sub-rule's no-match into an expectation failure
    pub fn required<N>(&self, matched: Option<N>, expected: &str) -> Result<N, SyntaxError> {
        matched.ok_or_else(|| self.unexpected(expected))
    }

    /// Expectation failure at the current token
    pub fn unexpected(&self, expected: &str) -> SyntaxError {
        SyntaxError::unexpected_token(
            expected,
            &self.tokens.describe_current(),
            self.position(),
            self.current_span(),
        )
    }

    // === CONTEXT TRACKING ===

    /// Push a rule name; past the depth limit names are counted but not kept
    pub fn push_context(&mut self, context: &str) {
        if self.context_stack.len() >= MAX_CONTEXT_STACK_DEPTH {
            self.context_overflow += 1;
            return;
        }
        self.context_stack.push(context.to_string());
    }

    pub fn pop_context(&mut self) {
        if self.context_overflow > 0 {
            self.context_overflow -= 1;
        } else {
            self.context_stack.pop();
        }
    }

    pub fn current_context(&self) -> String {
        self.context_stack.join(" -> ")
    }

    pub fn depth(&self) -> usize {
        self.parse_depth
    }

    // === TOP-LEVEL DRIVER ===

    /// Parse one complete construct covering all significant input
    ///
    /// A rule that does not match reports `NoViableAlternative` at the start position
    /// with the cursor left there. Leftover tokens after a match report `TrailingInput`.
    pub fn parse_rule_to_end<N, F>(&mut self, entry_name: &str, rule: F) -> SyntaxResult<N>
    where
        F: FnOnce(&mut Self) -> RuleResult<N>,
    {
        let start = self.save_checkpoint();

        let error = match rule(self) {
            Ok(Some(node)) if self.is_at_end() => {
                log_debug!("Entry rule consumed all input",
                    "rule" => entry_name,
                    "tokens" => self.position() - start.position
                );
                return Ok(node);
            }
            Ok(Some(_)) => SyntaxError::trailing_input(
                entry_name,
                &self.tokens.describe_current(),
                self.position(),
                self.current_span(),
            ),
            Ok(None) => {
                self.restore_checkpoint(start);
                SyntaxError::no_viable_alternative(
                    entry_name,
                    &self.tokens.describe_current(),
                    self.position(),
                    self.current_span(),
                )
            }
            Err(error) => {
                self.restore_checkpoint(start);
                error
            }
        };

        self.record_error(error.clone());

        log_error!(error.error_code(), "Value-reference parsing failed",
            span = error.span().unwrap_or_else(|| self.current_span()),
            "entry" => entry_name,
            "expected" => error.expected().unwrap_or("-"),
            "error" => &error
        );

        Err(error)
    }

    // === ERROR HISTORY AND DIAGNOSTICS ===

    fn record_error(&mut self, error: SyntaxError) {
        if !self.preferences.record_error_history {
            return;
        }
        if self.error_history.len() >= MAX_ERROR_HISTORY {
            self.error_history.pop_front();
        }
        self.error_history.push_back(error);
    }

    pub fn error_history(&self) -> Vec<&SyntaxError> {
        self.error_history.iter().collect()
    }

    /// Cargo-style rendering of `error` against the parsed source
    pub fn format_error(&self, error: &SyntaxError) -> String {
        let span = error.span().unwrap_or_else(|| self.current_span());
        self.tokens
            .format_error(error.error_code().as_str(), span, &error.to_string())
    }

    pub fn create_contextual_error(&self, error: SyntaxError) -> ContextualSyntaxError {
        let span = error.span().unwrap_or_else(|| self.current_span());
        let mut context = ErrorContext::new()
            .with_tokens(self.surrounding_tokens())
            .with_position(span.start.line, span.start.column);

        if self.preferences.include_rule_context {
            context = context.with_context(self.current_context());
        }

        ContextualSyntaxError::new(error).with_context(context)
    }

    fn surrounding_tokens(&self) -> Vec<String> {
        self.tokens
            .context_snippet(3)
            .iter()
            .map(|spanned| spanned.value.to_string())
            .collect()
    }

    pub fn diagnostic_info(&self) -> String {
        format!(
            "Parser State:\n{}\nContext: {}\nError History: {}\nParse Depth: {}/{}",
            self.tokens.diagnostic(),
            self.current_context(),
            self.error_history.len(),
            self.parse_depth,
            MAX_PARSE_DEPTH
        )
    }

    pub fn validate_state(&self) -> Result<(), String> {
        crate::tokens::token_stream::validation::validate_token_stream(&self.tokens)
            .map_err(|e| format!("Token stream validation failed: {}", e))?;

        if self.context_stack.len() > MAX_CONTEXT_STACK_DEPTH {
            return Err(format!(
                "Context stack depth {} exceeds maximum {}",
                self.context_stack.len(),
                MAX_CONTEXT_STACK_DEPTH
            ));
        }

        if self.parse_depth > MAX_PARSE_DEPTH {
            return Err(format!(
                "Parse depth {} exceeds maximum {}",
                self.parse_depth, MAX_PARSE_DEPTH
            ));
        }

        Ok(())
    }
}

pub fn create_parser(tokens: TokenStream) -> ValueRefParser {
    ValueRefParser::new(tokens)
}
