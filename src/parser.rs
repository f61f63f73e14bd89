// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A recursive-descent parser for the grammar
//!
//! ```text
//! Union  := Concat ('|' Concat)*
//! Concat := Repeat+
//! Repeat := Atom ('*' | '+' | '?')?
//! Atom   := Literal | '.' | '(' Union ')'
//! ```
//!
//! Concatenation has no operator of its own: it is just juxtaposition.
//!
//! Everything downstream of the parser walks the `Expr` recursively, so group nesting is capped at
//! `NEST_LIMIT`.

use crate::ast::{Expr, Repeater};
use crate::error::{Error, SyntaxErrorKind};
use crate::tokenizer::{Token, TokenKind};

/// The deepest that groups may be nested.
pub const NEST_LIMIT: usize = 250;

/// Parses a token sequence into an `Expr`.
///
/// An empty sequence parses to `Expr::Empty`. Error positions are token indices.
pub fn parse(tokens: &[Token]) -> Result<Expr, Error> {
    if tokens.is_empty() {
        return Ok(Expr::Empty);
    }

    let mut p = Parser {
        tokens: tokens,
        pos: 0,
        open_parens: Vec::new(),
    };
    let expr = p.parse_union()?;
    match p.peek() {
        None => Ok(expr),
        // `parse_union` only stops early at a `)`, and we aren't inside a group.
        Some(_) => Err(p.error(SyntaxErrorKind::UnmatchedCloseParen)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    // Token positions of the currently unclosed `(`s.
    open_parens: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn error(&self, kind: SyntaxErrorKind) -> Error {
        Error::Syntax { position: self.pos, kind: kind }
    }

    fn unclosed_error(&self) -> Error {
        // The innermost group is the one that ran out of input.
        let position = self.open_parens.last().cloned().unwrap_or(self.pos);
        Error::Syntax { position: position, kind: SyntaxErrorKind::UnmatchedOpenParen }
    }

    fn parse_union(&mut self) -> Result<Expr, Error> {
        let mut alts = vec![self.parse_concat()?];
        while self.peek() == Some(TokenKind::Pipe) {
            self.pos += 1;
            alts.push(self.parse_concat()?);
        }

        if alts.len() == 1 {
            Ok(alts.remove(0))
        } else {
            Ok(Expr::Alternate(alts))
        }
    }

    fn parse_concat(&mut self) -> Result<Expr, Error> {
        let mut es = Vec::new();
        loop {
            match self.peek() {
                None | Some(TokenKind::Pipe) | Some(TokenKind::RParen) => break,
                Some(_) => es.push(self.parse_repeat()?),
            }
        }

        match es.len() {
            0 => match self.peek() {
                None if !self.open_parens.is_empty() => Err(self.unclosed_error()),
                Some(TokenKind::RParen) if self.open_parens.is_empty() =>
                    Err(self.error(SyntaxErrorKind::UnmatchedCloseParen)),
                _ => Err(self.error(SyntaxErrorKind::EmptyAlternative)),
            },
            1 => Ok(es.remove(0)),
            _ => Ok(Expr::Concat(es)),
        }
    }

    fn parse_repeat(&mut self) -> Result<Expr, Error> {
        let atom = self.parse_atom()?;
        let rep = match self.peek() {
            Some(TokenKind::Star) => Repeater::ZeroOrMore,
            Some(TokenKind::Plus) => Repeater::OneOrMore,
            Some(TokenKind::Question) => Repeater::ZeroOrOne,
            _ => return Ok(atom),
        };
        self.pos += 1;
        Ok(Expr::Repeat { e: Box::new(atom), r: rep })
    }

    fn parse_atom(&mut self) -> Result<Expr, Error> {
        let kind = match self.peek() {
            Some(k) => k,
            None => return Err(self.error(SyntaxErrorKind::EmptyAlternative)),
        };

        match kind {
            TokenKind::Literal(c) => {
                self.pos += 1;
                Ok(Expr::Literal(c))
            },
            TokenKind::Any => {
                self.pos += 1;
                Ok(Expr::AnyChar)
            },
            TokenKind::LParen => {
                if self.open_parens.len() >= NEST_LIMIT {
                    return Err(self.error(SyntaxErrorKind::NestTooDeep));
                }
                self.open_parens.push(self.pos);
                self.pos += 1;
                let inner = self.parse_union()?;
                if self.peek() != Some(TokenKind::RParen) {
                    return Err(self.unclosed_error());
                }
                self.pos += 1;
                self.open_parens.pop();
                Ok(Expr::Group(Box::new(inner)))
            },
            TokenKind::Star | TokenKind::Plus | TokenKind::Question =>
                Err(self.error(SyntaxErrorKind::DanglingRepeat)),
            TokenKind::Pipe | TokenKind::RParen =>
                Err(self.error(SyntaxErrorKind::EmptyAlternative)),
        }
    }
}
