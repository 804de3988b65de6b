//! # JSON Token
//!
//! Defines the lexical tokens produced from scanning a JSON document, along
//! with the source position each token starts at.
use serde::Serialize;
use std::fmt::Display;

/// The kind of a lexical token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenKind {
    /* Reserved */
    /// Malformed input; the token literal pinpoints the offending text
    Illegal,

    /// End of input
    EndOfInput,

    /* Values */
    /// String content between double quotes
    String,

    /// Numeric value
    Number,

    /// The `true` keyword
    True,

    /// The `false` keyword
    False,

    /// The `null` keyword
    Null,

    /* Delimiters */
    /// Comma character
    Comma,

    /// Colon character
    Colon,

    /// Opening curly brace
    LeftBrace,

    /// Closing curly brace
    RightBrace,

    /// Opening square bracket
    LeftBracket,

    /// Closing square bracket
    RightBracket,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Illegal => write!(f, "ILLEGAL"),
            Self::EndOfInput => write!(f, "EOF"),
            Self::String => write!(f, "STRING"),
            Self::Number => write!(f, "NUMBER"),
            Self::True => write!(f, "TRUE"),
            Self::False => write!(f, "FALSE"),
            Self::Null => write!(f, "NULL"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
        }
    }
}

/// Location of a character in the input.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// 1-indexed line number
    pub line: usize,
    /// 1-indexed column number, counted in characters
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A single token scanned from the input.
///
/// The `literal` is the exact source text the token covers, except for
/// strings where the surrounding quotes are left out.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Token {
    /// What grammar category the token belongs to
    pub kind: TokenKind,
    /// Source text of the token
    pub literal: String,
    /// Where the token starts
    pub position: Position,
}

impl Token {
    /// Create a token from its parts.
    pub fn new<T: Into<String>>(
        kind: TokenKind,
        literal: T,
        position: Position,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    /// Whether this token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.literal.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.literal)
        }
    }
}
