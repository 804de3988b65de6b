//! # JSON Lexer
//!
//! Scans an input string from a JSON document into a sequence of tokens, one
//! token per call. Malformed input never aborts the lexer: it is reported as
//! an [`TokenKind::Illegal`] token whose literal is the smallest piece of text
//! that identifies the failure.
use log::trace;

use crate::tokenizer::{Position, Token, TokenKind};

/// A lexer that produces tokens lazily from an input string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input to tokenize
    input: &'a str,
    /// Current position (byte offset of the current char)
    position: usize,
    /// Current reading position (byte offset after the current char)
    read_position: usize,
    /// Current char under examination, `None` once the input is exhausted
    ch: Option<char>,
    /// Line of the current char
    line: usize,
    /// Column of the current char
    column: usize,
    /// Set once the iterator yielded its final token
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned on the first character of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: None,
            line: 1,
            column: 1,
            finished: false,
        };
        // put the lexer in an initial working state
        lexer.read_char();
        lexer
    }

    /// Reads and consumes the next char in the input.
    fn read_char(&mut self) {
        match self.ch {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        self.position = self.read_position;
        self.ch = self.input[self.read_position..].chars().next();
        if let Some(ch) = self.ch {
            self.read_position += ch.len_utf8();
        }
    }

    /// Returns the char after the current one without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.input[self.read_position..].chars().next()
    }

    /// Position of the current char.
    const fn location(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn slice(&self, from: usize, to: usize) -> &'a str {
        let input: &'a str = self.input;
        &input[from..to]
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_some_and(is_whitespace) {
            self.read_char();
        }
    }

    /// Returns the next token from the current position.
    ///
    /// Once the input is exhausted every further call returns
    /// [`TokenKind::EndOfInput`] with an empty literal.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            None => Token::new(TokenKind::EndOfInput, "", self.location()),
            Some(',') => self.read_delimiter(TokenKind::Comma),
            Some(':') => self.read_delimiter(TokenKind::Colon),
            Some('{') => self.read_delimiter(TokenKind::LeftBrace),
            Some('}') => self.read_delimiter(TokenKind::RightBrace),
            Some('[') => self.read_delimiter(TokenKind::LeftBracket),
            Some(']') => self.read_delimiter(TokenKind::RightBracket),
            Some('"') => self.read_string(),
            Some('-' | '0'..='9') => self.read_number(),
            Some('t') => self.read_keyword("true", TokenKind::True),
            Some('f') => self.read_keyword("false", TokenKind::False),
            Some('n') => self.read_keyword("null", TokenKind::Null),
            Some(ch) => self.illegal(ch),
        };

        trace!(
            "scanned {} {:?} at {}",
            token.kind, token.literal, token.position
        );
        token
    }

    /// Consumes the current char and reports it as illegal.
    fn illegal(&mut self, ch: char) -> Token {
        let position = self.location();
        self.read_char();
        Token::new(TokenKind::Illegal, ch.to_string(), position)
    }

    fn read_delimiter(&mut self, kind: TokenKind) -> Token {
        let start = self.location();
        self.read_char();
        Token::new(kind, self.slice(start.offset, self.position), start)
    }

    /// Reads a string and returns its content without the surrounding quotes.
    /// Escape sequences are kept as they appear in the input.
    fn read_string(&mut self) -> Token {
        let start = self.location();
        // skip opening quote
        self.read_char();
        let content_start = self.position;

        loop {
            match self.ch {
                // string not terminated, report what was scanned so far
                None => {
                    return Token::new(
                        TokenKind::Illegal,
                        self.slice(content_start, self.position),
                        start,
                    );
                }
                Some('"') => break,
                Some('\\') => {
                    // skip the escaped character to avoid premature
                    // termination with `\"`
                    self.read_char();
                    self.read_char();
                }
                Some(_) => self.read_char(),
            }
        }

        let literal = self.slice(content_start, self.position);
        // skip closing quote
        self.read_char();
        Token::new(TokenKind::String, literal, start)
    }

    /// Reads a number (int, frac, exp).
    ///
    /// The run of number characters is validated while it is consumed so the
    /// lexer can fail on the exact character that breaks the number.
    fn read_number(&mut self) -> Token {
        let start = self.location();

        while let Some(ch) = self.ch.filter(|&c| is_number_part(c)) {
            let peek = self.peek_char();

            // '.' needs to be preceded by a digit
            if peek == Some('.') && !ch.is_ascii_digit() {
                return self.illegal(ch);
            }

            // '.' needs to be followed by a digit
            if ch == '.' && !peek.is_some_and(|p| p.is_ascii_digit()) {
                self.read_char();
                return match peek {
                    Some(p) => self.illegal(p),
                    None => Token::new(
                        TokenKind::Illegal,
                        self.slice(start.offset, self.position),
                        start,
                    ),
                };
            }

            // signs are only allowed up front or right after the exponent
            if let Some(sign @ ('+' | '-')) = peek {
                if !matches!(ch, 'e' | 'E') {
                    self.read_char();
                    return self.illegal(sign);
                }
            }

            self.read_char();
        }

        Token::new(
            TokenKind::Number,
            self.slice(start.offset, self.position),
            start,
        )
    }

    /// Matches the input against `keyword` one char at a time.
    fn read_keyword(&mut self, keyword: &'static str, kind: TokenKind) -> Token {
        let start = self.location();

        for expected in keyword.chars() {
            match self.ch {
                Some(ch) if ch == expected => self.read_char(),
                Some(ch) if !is_whitespace(ch) && !is_delimiter(ch) => {
                    return self.illegal(ch);
                }
                // input ended or got interrupted before the keyword was
                // complete
                _ => {
                    return Token::new(
                        TokenKind::Illegal,
                        self.slice(start.offset, self.position),
                        start,
                    );
                }
            }
        }

        Token::new(kind, keyword, start)
    }
}

/// Yields every token up to and including the first
/// [`TokenKind::EndOfInput`] or [`TokenKind::Illegal`].
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished =
            matches!(token.kind, TokenKind::EndOfInput | TokenKind::Illegal);
        Some(token)
    }
}

const fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\u{8}' | '\r' | '\u{c}')
}

const fn is_delimiter(ch: char) -> bool {
    matches!(ch, ',' | ':' | '{' | '}' | '[' | ']' | '"')
}

const fn is_number_part(ch: char) -> bool {
    matches!(ch, '0'..='9' | '.' | '-' | '+' | 'e' | 'E')
}

/// Tokenize a JSON document, stopping after the end of input or the first
/// illegal token, whichever comes first.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_token(input: &str) -> Token {
        Lexer::new(input).next_token()
    }

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, String)> {
        tokenize(input)
            .into_iter()
            .map(|t| (t.kind, t.literal))
            .collect()
    }

    #[test]
    fn test_empty() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].literal, "");
    }

    #[test]
    fn end_of_input_is_idempotent() {
        let mut lexer = Lexer::new(" null \n");
        assert_eq!(lexer.next_token().kind, TokenKind::Null);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::EndOfInput);
            assert_eq!(token.literal, "");
            assert_eq!(token.position.offset, 7);
        }
    }

    #[test]
    fn test_complete_document() {
        let input = r#"{"cookies": 200, "ingredients": ["flour", "salt"], "fresh": true, "tasty": false, "gone": null}"#;
        let expected = [
            (TokenKind::LeftBrace, "{"),
            (TokenKind::String, "cookies"),
            (TokenKind::Colon, ":"),
            (TokenKind::Number, "200"),
            (TokenKind::Comma, ","),
            (TokenKind::String, "ingredients"),
            (TokenKind::Colon, ":"),
            (TokenKind::LeftBracket, "["),
            (TokenKind::String, "flour"),
            (TokenKind::Comma, ","),
            (TokenKind::String, "salt"),
            (TokenKind::RightBracket, "]"),
            (TokenKind::Comma, ","),
            (TokenKind::String, "fresh"),
            (TokenKind::Colon, ":"),
            (TokenKind::True, "true"),
            (TokenKind::Comma, ","),
            (TokenKind::String, "tasty"),
            (TokenKind::Colon, ":"),
            (TokenKind::False, "false"),
            (TokenKind::Comma, ","),
            (TokenKind::String, "gone"),
            (TokenKind::Colon, ":"),
            (TokenKind::Null, "null"),
            (TokenKind::RightBrace, "}"),
            (TokenKind::EndOfInput, ""),
        ];
        let expected: Vec<(TokenKind, String)> = expected
            .iter()
            .map(|(kind, literal)| (*kind, (*literal).to_string()))
            .collect();
        assert_eq!(kinds_and_literals(input), expected);
    }

    #[test]
    fn test_strings() {
        let cases = [
            (r#""fries""#, "fries"),
            (r#""french fries""#, "french fries"),
            (r#""french   fries""#, "french   fries"),
            (r#""french\nfries""#, r"french\nfries"),
            (r#""french\tfries\r\n""#, r"french\tfries\r\n"),
            (r#""french\"fries\"""#, r#"french\"fries\""#),
            (r#""\/french\\fries\b""#, r"\/french\\fries\b"),
            (r#""trailing backslash\\""#, r"trailing backslash\\"),
            (r#""""#, ""),
        ];
        for (input, expected) in cases {
            let token = first_token(input);
            assert_eq!(token.kind, TokenKind::String, "input {input}");
            assert_eq!(token.literal, expected, "input {input}");
        }
    }

    #[test]
    fn test_unterminated_strings() {
        let cases = [
            (r#""broccoli"#, "broccoli"),
            (r#""french\"fries\""#, r#"french\"fries\""#),
            (r#"""#, ""),
        ];
        for (input, expected) in cases {
            let token = first_token(input);
            assert_eq!(token.kind, TokenKind::Illegal, "input {input}");
            assert_eq!(token.literal, expected, "input {input}");
            assert_eq!(token.position.column, 1);
        }
    }

    #[test]
    fn test_number_variants() {
        let cases = [
            "0",
            "-0",
            "200",
            "200.3",
            "0.31",
            "-0.31",
            "-200.3",
            "-200.3e1",
            "-200.3e+1",
            "-200.3e-1",
            "-200.3E1",
            "-200.3E+12",
            "-200.3E-12",
            "0.31e100",
            "0.001e-10",
        ];
        for input in cases {
            let token = first_token(input);
            assert_eq!(token.kind, TokenKind::Number, "input {input}");
            assert_eq!(token.literal, input);
        }
    }

    #[test]
    fn test_number_followed_by_delimiter() {
        assert_eq!(
            kinds_and_literals("[-3.146e7,1]"),
            vec![
                (TokenKind::LeftBracket, "[".to_string()),
                (TokenKind::Number, "-3.146e7".to_string()),
                (TokenKind::Comma, ",".to_string()),
                (TokenKind::Number, "1".to_string()),
                (TokenKind::RightBracket, "]".to_string()),
                (TokenKind::EndOfInput, String::new()),
            ]
        );
    }

    #[test]
    fn test_invalid_numbers() {
        // (input, illegal literal, reason)
        let cases = [
            ("a200", "a", "number should only contain digits"),
            ("_200", "_", "number should only contain digits"),
            ("+200", "+", "number cannot be prefixed with +"),
            ("2-00", "-", "- only allowed up front or after exponent"),
            ("2+00", "+", "+ only allowed after exponent"),
            ("e200", "e", "exponent needs a preceding digit"),
            ("E200", "E", "exponent needs a preceding digit"),
            (".200", ".", "fraction needs a preceding digit"),
            ("-.200", "-", "fraction needs a preceding digit"),
            ("+.200", "+", "fraction needs a preceding digit"),
            ("1.", "1.", "fraction needs a following digit"),
            ("2.a34", "a", "fraction needs a following digit"),
            ("0.e+100", "e", "fraction needs a following digit"),
            ("0.e-100", "e", "fraction needs a following digit"),
            ("0.e100", "e", "fraction needs a following digit"),
            ("0.E+100", "E", "fraction needs a following digit"),
            ("0.E100", "E", "fraction needs a following digit"),
            ("0.200+e100", "+", "exponent cannot be preceded by sign"),
            ("0.200-e100", "-", "exponent cannot be preceded by sign"),
            ("0.200+E100", "+", "exponent cannot be preceded by sign"),
            ("0.200-E100", "-", "exponent cannot be preceded by sign"),
        ];
        for (input, expected, reason) in cases {
            let token = first_token(input);
            assert_eq!(token.kind, TokenKind::Illegal, "{input}: {reason}");
            assert_eq!(token.literal, expected, "{input}: {reason}");
        }
    }

    #[test]
    fn illegal_number_points_at_offending_char() {
        let token = first_token("  2.a34");
        assert_eq!(token.literal, "a");
        assert_eq!(
            token.position,
            Position {
                offset: 4,
                line: 1,
                column: 5
            }
        );
    }

    #[test]
    fn test_keywords() {
        let cases = [
            ("true,", "true", TokenKind::True),
            ("true]", "true", TokenKind::True),
            ("false]", "false", TokenKind::False),
            ("false ", "false", TokenKind::False),
            ("null;", "null", TokenKind::Null),
            ("null'", "null", TokenKind::Null),
            ("null\"", "null", TokenKind::Null),
            ("null[", "null", TokenKind::Null),
            ("null}", "null", TokenKind::Null),
            (" null\t ", "null", TokenKind::Null),
            (" null\n\t\t", "null", TokenKind::Null),
        ];
        for (input, literal, kind) in cases {
            let token = first_token(input);
            assert_eq!(token.kind, kind, "input {input:?}");
            assert_eq!(token.literal, literal, "input {input:?}");
        }
    }

    #[test]
    fn test_invalid_keywords() {
        let cases = [
            ("TRUE", "T"),
            ("tru", "tru"),
            ("tru,e", "tru"),
            ("tru e", "tru"),
            ("t", "t"),
            ("trux", "x"),
            ("FALSE", "F"),
            ("f", "f"),
            ("fals", "fals"),
            ("fals]", "fals"),
            ("faLse", "L"),
            ("NULL", "N"),
            ("nul", "nul"),
            ("nul,l", "nul"),
            ("n", "n"),
        ];
        for (input, expected) in cases {
            let token = first_token(input);
            assert_eq!(token.kind, TokenKind::Illegal, "input {input:?}");
            assert_eq!(token.literal, expected, "input {input:?}");
        }
    }

    #[test]
    fn skips_all_whitespace_kinds() {
        let input = " \t\n\u{8}\r\u{c}true";
        let token = first_token(input);
        assert_eq!(token.kind, TokenKind::True);
        assert_eq!(token.position.offset, 6);
        assert_eq!(token.position.line, 2);
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("[\n  true,\n  \"x\"]");
        let positions: Vec<(TokenKind, usize, usize, usize)> = tokens
            .iter()
            .map(|t| {
                (t.kind, t.position.offset, t.position.line, t.position.column)
            })
            .collect();
        assert_eq!(
            positions,
            vec![
                (TokenKind::LeftBracket, 0, 1, 1),
                (TokenKind::True, 4, 2, 3),
                (TokenKind::Comma, 8, 2, 7),
                (TokenKind::String, 12, 3, 3),
                (TokenKind::RightBracket, 15, 3, 6),
                (TokenKind::EndOfInput, 16, 3, 7),
            ]
        );
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let tokens = tokenize("\"héllo\" ü");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].literal, "héllo");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "ü");
        assert_eq!(tokens[1].position.offset, 9);
        assert_eq!(tokens[1].position.column, 9);
    }

    #[test]
    fn iterator_stops_at_illegal_token() {
        assert_eq!(
            kinds_and_literals("[1, tru] false"),
            vec![
                (TokenKind::LeftBracket, "[".to_string()),
                (TokenKind::Number, "1".to_string()),
                (TokenKind::Comma, ",".to_string()),
                (TokenKind::Illegal, "tru".to_string()),
            ]
        );
    }

    #[test]
    fn lexer_stays_usable_after_illegal_token() {
        let mut lexer = Lexer::new("tru] 7");
        assert_eq!(lexer.next_token().kind, TokenKind::Illegal);
        assert_eq!(lexer.next_token().kind, TokenKind::RightBracket);
        let number = lexer.next_token();
        assert_eq!(number.kind, TokenKind::Number);
        assert_eq!(number.literal, "7");
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfInput);
    }
}
