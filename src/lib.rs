/*!
# `jsonast` Library

Tokenizes and parses a subset of JSON (strings, numbers, booleans, `null` and
arrays) into a typed syntax tree, with position-aware errors on malformed
input.

```
use jsonast::{ast::Value, parse};

let document = parse(r#"[ "fantastic", true, null, "carrot"]"#).expect("valid input");
assert_eq!(document.depth(), 2);
assert!(matches!(document.value, Some(Value::Array(_))));
```
*/

pub mod ast;
pub mod parser;
pub mod tokenizer;
pub mod utils;

// Re-exports
pub use ast::{Document, Value};
pub use parser::{ParseError, Parser, ParserOptions, parse, parse_with};
pub use tokenizer::{Lexer, Token, TokenKind, tokenize};
