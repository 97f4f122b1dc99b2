//! Token vocabulary of the value-reference language
//!
//! Words are either keywords or identifiers; there are no literal tokens because enum
//! literal spellings are ordinary identifiers. Punctuation has dedicated symbol tokens.
use crate::grammar::keywords::Keyword;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// Reserved word, exact case
    Keyword(Keyword),

    /// Any other word, including enum literal spellings
    Identifier(String),

    // === PUNCTUATION ===
    Dot,          // .
    Equals,       // =
    Comma,        // ,
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]

    // === WHITESPACE AND STRUCTURE ===
    Space,
    Tab,
    Newline,
    /// Line (`// ...`) or block (`/* ... */`) comment, raw text including delimiters
    Comment(String),
    Eof,
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Space | Self::Tab | Self::Newline)
    }

    /// Tokens the parser never sees
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            Self::Space | Self::Tab | Self::Newline | Self::Comment(_)
        )
    }

    pub fn is_significant(&self) -> bool {
        !self.is_ignorable()
    }

    pub fn as_keyword(&self) -> Option<Keyword> {
        match self {
            Self::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(kw) if *kw == keyword)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// The token as it appears in script text
    pub fn as_source_string(&self) -> String {
        match self {
            Self::Keyword(kw) => kw.as_str().to_string(),
            Self::Identifier(id) => id.clone(),
            Self::Dot => ".".to_string(),
            Self::Equals => "=".to_string(),
            Self::Comma => ",".to_string(),
            Self::LeftParen => "(".to_string(),
            Self::RightParen => ")".to_string(),
            Self::LeftBracket => "[".to_string(),
            Self::RightBracket => "]".to_string(),
            Self::Space => " ".to_string(),
            Self::Tab => "\t".to_string(),
            Self::Newline => "\n".to_string(),
            Self::Comment(text) => text.clone(),
            Self::Eof => String::new(),
        }
    }

    /// Human-readable form used in "found ..." diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Eof => "end of input".to_string(),
            Self::Keyword(kw) => format!("keyword '{}'", kw),
            Self::Identifier(id) => format!("'{}'", id),
            other => format!("'{}'", other.as_source_string()),
        }
    }

    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Keyword(_) => TokenClass::Keyword,
            Self::Identifier(_) => TokenClass::Identifier,
            Self::Dot
            | Self::Equals
            | Self::Comma
            | Self::LeftParen
            | Self::RightParen
            | Self::LeftBracket
            | Self::RightBracket => TokenClass::Punctuation,
            Self::Space | Self::Tab | Self::Newline => TokenClass::Whitespace,
            Self::Comment(_) | Self::Eof => TokenClass::Special,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "<EOF>"),
            other => write!(f, "{}", other.as_source_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Identifier,
    Punctuation,
    Whitespace,
    /// Comments and end of input
    Special,
}

/// Classify a word as keyword or identifier
pub fn classify_word(word: &str) -> Token {
    match Keyword::from_str(word) {
        Some(keyword) => Token::Keyword(keyword),
        None => Token::Identifier(word.to_string()),
    }
}

/// Map a single punctuation character to its token
pub fn classify_punctuation(ch: char) -> Option<Token> {
    match ch {
        '.' => Some(Token::Dot),
        '=' => Some(Token::Equals),
        ',' => Some(Token::Comma),
        '(' => Some(Token::LeftParen),
        ')' => Some(Token::RightParen),
        '[' => Some(Token::LeftBracket),
        ']' => Some(Token::RightBracket),
        _ => None,
    }
}
