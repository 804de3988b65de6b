/*!
# Document AST

Defines the tree produced by the parser. Every node keeps the token it was
built from, so diagnostics can always point back at the exact source text.

# Examples

```
use jsonast::ast::{Document, Value};

let document: Document = r#"[ "fantastic", true, null ]"#.parse().expect("valid input");
let Some(Value::Array(array)) = &document.value else { panic!("expected an array") };
assert_eq!(array.elements.len(), 3);
assert_eq!(document.to_string(), r#"["fantastic",true,null]"#);
```
*/
use serde::Serialize;
use std::{fmt::Display, str::FromStr};

use crate::parser::{ParseError, parse};
use crate::tokenizer::{Position, Token};

/// A string value. The content is kept exactly as written, escape sequences
/// included.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct StringValue {
    /// The string token
    pub token: Token,
}

impl StringValue {
    /// The raw string content between the quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.token.literal
    }
}

/// A number value together with its IEEE-754 reading.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct NumberValue {
    /// The number token
    pub token: Token,
    /// The parsed value of the token literal
    pub numeric: f64,
}

/// A `true` or `false` value.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct BooleanValue {
    /// The keyword token
    pub token: Token,
    /// Whether the keyword was `true`
    pub value: bool,
}

/// The `null` value.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct NullValue {
    /// The keyword token
    pub token: Token,
}

/// An array of values, in source order.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ArrayValue {
    /// The opening `[` token
    pub token: Token,
    /// The parsed elements
    pub elements: Vec<Value>,
}

/// A node of the document tree.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Value {
    /// A quoted string
    String(StringValue),
    /// A number literal
    Number(NumberValue),
    /// `true` or `false`
    Boolean(BooleanValue),
    /// `null`
    Null(NullValue),
    /// A bracketed list of values
    Array(ArrayValue),
}

impl Value {
    /// The token the node was built from.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::String(node) => &node.token,
            Self::Number(node) => &node.token,
            Self::Boolean(node) => &node.token,
            Self::Null(node) => &node.token,
            Self::Array(node) => &node.token,
        }
    }

    /// The source text of the node's token.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.token().literal
    }

    /// Where the node starts in the input.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.token().position
    }

    /// Human readable name of the node kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null(_) => "null",
            Self::Array(_) => "array",
        }
    }

    /// Compute the nesting depth of the value.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(array) => {
                let inner_depth =
                    array.elements.iter().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::String(_)
            | Self::Number(_)
            | Self::Boolean(_)
            | Self::Null(_) => 1,
        }
    }
}

/// Renders the value as compact JSON text built from the source literals.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(node) => write!(f, "\"{}\"", node.value()),
            Self::Array(array) => {
                write!(f, "[")?;
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Self::Number(_) | Self::Boolean(_) | Self::Null(_) => {
                write!(f, "{}", self.literal())
            }
        }
    }
}

/// The result of parsing one input: zero or one top-level value.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct Document {
    /// The top-level value, `None` for an input without any value
    pub value: Option<Value>,
}

impl Document {
    /// Whether the input held no value at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// The literal of the top-level value, or an empty string.
    #[must_use]
    pub fn literal(&self) -> &str {
        self.value.as_ref().map_or("", Value::literal)
    }

    /// Nesting depth of the document; an empty document has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.value.as_ref().map_or(0, Value::depth)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        }
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
