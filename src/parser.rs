/*!
# Document Parser

Recursive-descent parser turning the token stream of a [`Lexer`] into a
[`Document`].

## Examples

The module exposes [`parse`] as the simplest entry point:

```rust
use jsonast::ast::Value;
use jsonast::parser;

let document = parser::parse("[ -3.146e7, null ]").expect("valid input");
let Some(Value::Array(array)) = document.value else { panic!("expected an array") };
let Value::Number(number) = &array.elements[0] else { panic!("expected a number") };
assert_eq!(number.numeric, -3.146e7);
```

## Errors

Parsing stops at the first problem, returned as a [`ParseError`]. Structural
errors name every token kind that would have been accepted:

```rust
use jsonast::parser::{self, ParseError};
use jsonast::tokenizer::TokenKind;

let result = parser::parse(r#"[ "fantastic""#);
let Err(ParseError::UnexpectedToken { expected, actual }) = result else {
    panic!("expected a structural error")
};
assert_eq!(expected, vec![TokenKind::Comma, TokenKind::RightBracket]);
assert_eq!(actual.kind, TokenKind::EndOfInput);
```

Lexical errors carry the illegal token:

```rust
use jsonast::parser::{self, ParseError};

let result = parser::parse("2.a34");
assert!(matches!(result, Err(ParseError::IllegalToken(ref token)) if token.literal == "a"));
```
*/
use log::debug;
use std::error::Error;
use std::fmt;
use std::num::ParseFloatError;

use crate::ast::{
    ArrayValue, BooleanValue, Document, NullValue, NumberValue, StringValue,
    Value,
};
use crate::tokenizer::{Lexer, Position, Token, TokenKind};

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack
/// overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Tokens that can start a value.
const VALUE_START: &[TokenKind] = &[
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::LeftBracket,
];

/// Tokens that can follow an opening `[`.
const ARRAY_START: &[TokenKind] = &[
    TokenKind::RightBracket,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::Number,
    TokenKind::String,
    TokenKind::LeftBracket,
];

/// Tokens that can follow an array element.
const ARRAY_SEPARATOR: &[TokenKind] =
    &[TokenKind::Comma, TokenKind::RightBracket];

/// Represents errors that can occur while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A well-formed token showed up where the grammar does not allow it.
    UnexpectedToken {
        /// Every token kind that would have been accepted
        expected: Vec<TokenKind>,
        /// The token that was found instead
        actual: Token,
    },
    /// The lexer could not make sense of the input.
    IllegalToken(Token),
    /// A number token whose literal is not a valid floating-point number.
    InvalidNumber {
        token: Token,
        source: ParseFloatError,
    },
    /// A number token too large in magnitude for a finite `f64`.
    NumberOutOfRange { token: Token },
    /// Arrays are nested deeper than the parser allows.
    DepthLimitExceeded {
        limit: usize,
        /// The opening bracket that went over the limit
        actual: Token,
    },
}

impl ParseError {
    /// The token the parser failed on.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::UnexpectedToken { actual: token, .. }
            | Self::IllegalToken(token)
            | Self::InvalidNumber { token, .. }
            | Self::NumberOutOfRange { token }
            | Self::DepthLimitExceeded { actual: token, .. } => token,
        }
    }

    /// Where in the input the parser failed.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.token().position
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, actual } => {
                write!(f, "expected")?;
                match expected.as_slice() {
                    [] => {}
                    [kind] => write!(f, " token {kind}")?,
                    kinds => {
                        let joined = kinds
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ");
                        write!(f, " one of tokens {joined}")?;
                    }
                }
                write!(f, " got {actual} instead")
            }
            Self::IllegalToken(token) => {
                write!(f, "illegal token {token}")
            }
            Self::InvalidNumber { token, source } => {
                write!(f, "invalid number {token}: {source}")
            }
            Self::NumberOutOfRange { token } => {
                write!(f, "number out of range {token}")
            }
            Self::DepthLimitExceeded { limit, .. } => {
                write!(f, "maximum nesting depth of {limit} exceeded")
            }
        }
    }
}

/// Knobs for a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// How many arrays may be nested inside each other
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A recursive-descent parser over a two token window: the token being
/// parsed and the one right after it.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Token under examination
    current: Token,
    /// Token after `current`
    peek: Token,
    options: ParserOptions,
    /// Number of arrays currently open
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser with default options.
    #[must_use]
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self::with_options(lexer, ParserOptions::default())
    }

    /// Create a parser with the given options.
    #[must_use]
    pub fn with_options(mut lexer: Lexer<'a>, options: ParserOptions) -> Self {
        // read two tokens, so current and peek are both set
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            options,
            depth: 0,
        }
    }

    /// Moves the window one token forward.
    fn next_token(&mut self) {
        self.current =
            std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Advances if the next token is one of `expected`, else fails naming
    /// all of them.
    fn expect_peek(&mut self, expected: &[TokenKind]) -> Result<(), ParseError> {
        if expected.contains(&self.peek.kind) {
            self.next_token();
            return Ok(());
        }

        let actual = self.peek.clone();
        debug!(
            "expected one of {expected:?}, got {:?} at {}",
            actual.kind, actual.position
        );
        if actual.is(TokenKind::Illegal) {
            Err(ParseError::IllegalToken(actual))
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_vec(),
                actual,
            })
        }
    }

    /// Parses the whole input.
    ///
    /// An input without any value yields an empty [`Document`]. A document
    /// holds a single value, anything after it is an error.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or structural [`ParseError`] encountered.
    pub fn parse_document(&mut self) -> Result<Document, ParseError> {
        if self.current.is(TokenKind::EndOfInput) {
            debug!("parsed empty document");
            return Ok(Document::default());
        }

        let value = self.parse_value()?;
        self.expect_peek(&[TokenKind::EndOfInput])?;

        debug!("parsed document with top-level {}", value.kind_name());
        Ok(Document { value: Some(value) })
    }

    /// Parses the value starting at the current token.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.current.clone();
        match token.kind {
            TokenKind::String => Ok(Value::String(StringValue { token })),
            TokenKind::True | TokenKind::False => {
                let value = token.is(TokenKind::True);
                Ok(Value::Boolean(BooleanValue { token, value }))
            }
            TokenKind::Null => Ok(Value::Null(NullValue { token })),
            TokenKind::Number => parse_number(token),
            TokenKind::LeftBracket => self.parse_array(token),
            TokenKind::Illegal => Err(ParseError::IllegalToken(token)),
            _ => Err(ParseError::UnexpectedToken {
                expected: VALUE_START.to_vec(),
                actual: token,
            }),
        }
    }

    fn parse_array(&mut self, token: Token) -> Result<Value, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.options.max_depth,
                actual: token,
            });
        }

        self.depth += 1;
        let elements = self.parse_elements();
        self.depth -= 1;

        Ok(Value::Array(ArrayValue {
            token,
            elements: elements?,
        }))
    }

    /// Parses array elements up to and including the closing `]`.
    fn parse_elements(&mut self) -> Result<Vec<Value>, ParseError> {
        let mut elements = vec![];

        // array should either be closed or contain a value
        self.expect_peek(ARRAY_START)?;
        while !self.current.is(TokenKind::RightBracket) {
            elements.push(self.parse_value()?);

            self.expect_peek(ARRAY_SEPARATOR)?;
            // if current is a comma, then peek should start a value
            if self.current.is(TokenKind::Comma) {
                self.expect_peek(VALUE_START)?;
            }
        }

        Ok(elements)
    }
}

fn parse_number(token: Token) -> Result<Value, ParseError> {
    match token.literal.parse::<f64>() {
        Ok(numeric) if numeric.is_finite() => {
            Ok(Value::Number(NumberValue { token, numeric }))
        }
        Ok(_) => Err(ParseError::NumberOutOfRange { token }),
        Err(source) => Err(ParseError::InvalidNumber { token, source }),
    }
}

/// Parse an input string into a [`Document`] using default options.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem in the input.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_with(input, ParserOptions::default())
}

/// Parse an input string into a [`Document`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem in the input.
pub fn parse_with(
    input: &str,
    options: ParserOptions,
) -> Result<Document, ParseError> {
    Parser::with_options(Lexer::new(input), options).parse_document()
}
