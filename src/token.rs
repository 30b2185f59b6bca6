//! Lexer for the textual expression grammar.
//!
//! The alphabet is small: the single-character operators `!`, `&`, `|`,
//! the parentheses, and identifiers made of `[a-zA-Z0-9_]`. Keywords
//! `true`/`false` are lexed as identifiers and recognized by the parser.

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Not,
    And,
    Or,
    LParen,
    RParen,
    Ident(String),
}

impl Token {
    pub fn is_ident_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Not => write!(f, "!"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Ident(name) => write!(f, "{}", name),
        }
    }
}

/// Splits the input into tokens, skipping whitespace.
///
/// Any character outside the grammar's alphabet is rejected with
/// [`Error::UnexpectedChar`].
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    debug!("tokenize(input = {:?})", input);

    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '!' => Token::Not,
            '&' => Token::And,
            '|' => Token::Or,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if Token::is_ident_char(c) => {
                let mut end = offset;
                while let Some(&(i, c)) = chars.peek() {
                    if !Token::is_ident_char(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Ident(input[offset..end].to_string()));
                continue;
            }
            ch => return Err(Error::UnexpectedChar { ch, offset }),
        };
        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}
