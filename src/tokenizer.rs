//! # Tokenizer/ Lexer
//!
//! Scans the characters of a JSON document into a stream of typed tokens.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Lexer, tokenize};
pub use token::{Position, Token, TokenKind};
