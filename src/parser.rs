//! Recursive-descent parser.
//!
//! ```text
//! Expr    := Or
//! Or      := And ('|' And)*
//! And     := Not ('&' Not)*
//! Not     := '!' Not | Primary
//! Primary := '(' Expr ')' | 'true' | 'false' | IDENT
//! ```
//!
//! Binary operators associate to the left.

use log::debug;

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::token::{tokenize, Token};

/// Maximum height of a parsed tree, counting nested `!` and parentheses.
///
/// Every tree walk in the crate recurses on the tree, so deeper input is
/// rejected up front with [`Error::TooDeep`].
pub const MAX_DEPTH: usize = 512;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, MAX_DEPTH)
    }

    pub fn with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(Error::ExpectedToken {
                expected,
                found: self.peek().cloned(),
            })
        }
    }

    /// Fails if a subtree of `height` below `depth` enclosing levels exceeds the limit.
    fn check_depth(&self, depth: usize, height: usize) -> Result<()> {
        if depth + height > self.max_depth {
            return Err(Error::TooDeep { limit: self.max_depth });
        }
        Ok(())
    }

    /// Parses a complete expression, failing if any tokens remain.
    pub fn parse(mut self) -> Result<Expr> {
        let (expr, _) = self.parse_or(0)?;
        if let Some(token) = self.advance() {
            return Err(Error::TrailingTokens(token));
        }
        Ok(expr)
    }

    // Each `parse_*` takes the number of enclosing levels and returns the
    // parsed subtree with its height.

    fn parse_or(&mut self, depth: usize) -> Result<(Expr, usize)> {
        let (mut lhs, mut height) = self.parse_and(depth)?;
        while self.eat(&Token::Or) {
            let (rhs, h) = self.parse_and(depth)?;
            height = height.max(h) + 1;
            self.check_depth(depth, height)?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok((lhs, height))
    }

    fn parse_and(&mut self, depth: usize) -> Result<(Expr, usize)> {
        let (mut lhs, mut height) = self.parse_not(depth)?;
        while self.eat(&Token::And) {
            let (rhs, h) = self.parse_not(depth)?;
            height = height.max(h) + 1;
            self.check_depth(depth, height)?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok((lhs, height))
    }

    fn parse_not(&mut self, depth: usize) -> Result<(Expr, usize)> {
        if self.eat(&Token::Not) {
            self.check_depth(depth + 1, 1)?;
            let (x, height) = self.parse_not(depth + 1)?;
            Ok((Expr::not(x), height + 1))
        } else {
            self.parse_primary(depth)
        }
    }

    fn parse_primary(&mut self, depth: usize) -> Result<(Expr, usize)> {
        match self.advance() {
            Some(Token::LParen) => {
                self.check_depth(depth + 1, 1)?;
                let (expr, height) = self.parse_or(depth + 1)?;
                self.expect(Token::RParen)?;
                Ok((expr, height))
            }
            Some(Token::Ident(name)) => {
                let leaf = match name.as_str() {
                    "true" => Expr::Literal(true),
                    "false" => Expr::Literal(false),
                    _ => Expr::Variable(name),
                };
                Ok((leaf, 1))
            }
            Some(token) => Err(Error::UnexpectedToken(token)),
            None => Err(Error::UnexpectedEnd),
        }
    }
}

/// Lexes and parses `input` into an unsimplified tree.
pub fn parse_expr(input: &str) -> Result<Expr> {
    debug!("parse_expr(input = {:?})", input);
    let tokens = tokenize(input)?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn v(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn test_parse_precedence() {
        let e = parse_expr("a | b & !c").unwrap();
        assert_eq!(e, v("a") | (v("b") & !v("c")));
    }

    #[test]
    fn test_parse_left_associative() {
        assert_eq!(parse_expr("a & b & c").unwrap(), (v("a") & v("b")) & v("c"));
        assert_eq!(parse_expr("a | b | c").unwrap(), (v("a") | v("b")) | v("c"));
    }

    #[test]
    fn test_parse_parentheses() {
        let e = parse_expr("(a | b) & c").unwrap();
        assert_eq!(e, (v("a") | v("b")) & v("c"));
        let e = parse_expr("!(a)").unwrap();
        assert_eq!(e, !v("a"));
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_expr("true").unwrap(), Expr::Literal(true));
        assert_eq!(parse_expr("!false").unwrap(), !Expr::Literal(false));
        assert_eq!(parse_expr("true_ish").unwrap(), v("true_ish"));
    }

    #[test]
    fn test_parse_nested_not() {
        assert_eq!(parse_expr("!!x").unwrap(), !!v("x"));
    }

    #[test]
    fn test_parse_missing_rparen() {
        let err = parse_expr("(a & b").unwrap_err();
        assert!(matches!(
            err,
            Error::ExpectedToken {
                expected: Token::RParen,
                found: None
            }
        ));
    }

    #[test]
    fn test_parse_unexpected_token() {
        let err = parse_expr("a & | b").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(Token::Or)));
        let err = parse_expr(")").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(Token::RParen)));
    }

    #[test]
    fn test_parse_unexpected_end() {
        assert!(matches!(parse_expr("").unwrap_err(), Error::UnexpectedEnd));
        assert!(matches!(parse_expr("a &").unwrap_err(), Error::UnexpectedEnd));
        assert!(matches!(parse_expr("!").unwrap_err(), Error::UnexpectedEnd));
    }

    #[test]
    fn test_parse_trailing_tokens() {
        let err = parse_expr("a b").unwrap_err();
        assert!(matches!(err, Error::TrailingTokens(Token::Ident(name)) if name == "b"));
        let err = parse_expr("(a))").unwrap_err();
        assert!(matches!(err, Error::TrailingTokens(Token::RParen)));
    }

    #[test]
    fn test_parse_long_chain_too_deep() {
        let input = vec!["a"; 4000].join(" & ");
        let err = parse_expr(&input).unwrap_err();
        assert!(matches!(err, Error::TooDeep { limit: MAX_DEPTH }));
        let input = vec!["a"; 4000].join(" | ");
        assert!(matches!(parse_expr(&input), Err(Error::TooDeep { .. })));
    }

    #[test]
    fn test_parse_nested_parentheses_too_deep() {
        let input = format!("{}x{}", "(".repeat(5000), ")".repeat(5000));
        assert!(matches!(parse_expr(&input), Err(Error::TooDeep { limit: MAX_DEPTH })));
    }

    #[test]
    fn test_parse_nested_not_too_deep() {
        let input = format!("{}x", "!".repeat(5000));
        assert!(matches!(parse_expr(&input), Err(Error::TooDeep { limit: MAX_DEPTH })));
    }

    #[test]
    fn test_parse_within_depth_limit() {
        let input = vec!["a"; MAX_DEPTH].join(" & ");
        assert_eq!(parse_expr(&input).unwrap().size(), 2 * MAX_DEPTH - 1);
        let input = vec!["a"; MAX_DEPTH + 1].join(" & ");
        assert!(matches!(parse_expr(&input), Err(Error::TooDeep { .. })));

        let input = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parse_expr(&input).unwrap(), v("x"));
    }

    #[test]
    fn test_parse_custom_depth_limit() {
        let parse = |s: &str| Parser::with_max_depth(tokenize(s).unwrap(), 3).parse();
        assert!(parse("a & b & c").is_ok());
        assert!(matches!(parse("a & b & c & d"), Err(Error::TooDeep { limit: 3 })));
        assert!(parse("!!a").is_ok());
        assert!(matches!(parse("!!!a"), Err(Error::TooDeep { limit: 3 })));
    }

    #[test]
    fn test_parse_lex_error() {
        let err = parse_expr("a => b").unwrap_err();
        assert!(matches!(err, Error::UnexpectedChar { ch: '=', offset: 2 }));
    }
}
