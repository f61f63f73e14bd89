// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splits regex source into tokens.
//!
//! The metacharacters are `(`, `)`, `|`, `*`, `+`, `?` and `.`. Any of them (and `\` itself) can
//! be escaped with a `\` to make a literal. Every other char is a literal.

use crate::error::{Error, LexErrorKind};
use logos::Logos;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Literal(char),
    /// `.`
    Any,
    Star,
    Plus,
    Question,
    Pipe,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the source.
    pub offset: usize,
}

#[derive(Clone, Copy, Debug, Eq, Logos, PartialEq)]
enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[regex(r"\\[()|*+?.\\]", |lex| lex.slice().chars().nth(1))]
    Escaped(char),
    #[regex(r"[^()|*+?.\\]", |lex| lex.slice().chars().next())]
    Literal(char),
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> TokenKind {
        match raw {
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Star => TokenKind::Star,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Question => TokenKind::Question,
            RawToken::Dot => TokenKind::Any,
            RawToken::Escaped(c) | RawToken::Literal(c) => TokenKind::Literal(c),
        }
    }
}

/// Tokenizes `source`, failing at the first bad escape.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut ret = Vec::with_capacity(source.len());
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let offset = lexer.span().start;
        match raw {
            Ok(raw) => ret.push(Token { kind: raw.into(), offset: offset }),
            Err(()) => return Err(lex_error(source, offset)),
        }
    }
    Ok(ret)
}

// The only thing the lexer can choke on is a backslash.
fn lex_error(source: &str, offset: usize) -> Error {
    let kind = match source[offset..].chars().nth(1) {
        None => LexErrorKind::TrailingBackslash,
        Some(c) => LexErrorKind::InvalidEscape(c),
    };
    Error::Lex { offset: offset, kind: kind }
}

#[cfg(test)]
mod tests {
    use super::TokenKind::*;
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        tokenize(s).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn literals_and_operators() {
        assert_eq!(kinds("a(b|c)*"),
                   vec![Literal('a'), LParen, Literal('b'), Pipe, Literal('c'), RParen, Star]);
        assert_eq!(kinds("x+y?."), vec![Literal('x'), Plus, Literal('y'), Question, Any]);
    }

    #[test]
    fn escapes() {
        assert_eq!(kinds(r"\*\(\\"), vec![Literal('*'), Literal('('), Literal('\\')]);
        assert_eq!(kinds(r"a\.b"), vec![Literal('a'), Literal('.'), Literal('b')]);
    }

    #[test]
    fn offsets() {
        let offsets: Vec<_> = tokenize(r"a\|é*").unwrap().into_iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 5]);
    }

    #[test]
    fn whitespace_is_literal() {
        assert_eq!(kinds("a b\n"), vec![Literal('a'), Literal(' '), Literal('b'), Literal('\n')]);
    }

    #[test]
    fn trailing_backslash() {
        assert_eq!(tokenize(r"ab\"),
                   Err(Error::Lex { offset: 2, kind: LexErrorKind::TrailingBackslash }));
    }

    #[test]
    fn invalid_escape() {
        assert_eq!(tokenize(r"a\q"),
                   Err(Error::Lex { offset: 1, kind: LexErrorKind::InvalidEscape('q') }));
    }

    #[test]
    fn restartable() {
        assert_eq!(tokenize("a|b"), tokenize("a|b"));
    }
}
