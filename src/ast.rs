// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Repeater {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

/// A parsed regular expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    /// Matches only the empty string.
    Empty,
    Literal(char),
    /// Matches any single char.
    AnyChar,
    Concat(Vec<Expr>),
    Alternate(Vec<Expr>),
    Repeat { e: Box<Expr>, r: Repeater },
    Group(Box<Expr>),
}

impl Expr {
    /// The number of NFA nodes that a Thompson construction of this expression uses.
    pub fn nfa_size(&self) -> usize {
        match *self {
            Expr::Empty | Expr::Literal(_) | Expr::AnyChar => 2,
            Expr::Concat(ref es) if es.is_empty() => 2,
            Expr::Concat(ref es) => es.iter().map(Expr::nfa_size).sum(),
            Expr::Alternate(ref es) => 2 + es.iter().map(Expr::nfa_size).sum::<usize>(),
            Expr::Repeat { ref e, .. } => 2 + e.nfa_size(),
            Expr::Group(ref e) => e.nfa_size(),
        }
    }

    /// The number of epsilon or labeled edges that a Thompson construction of this expression
    /// uses.
    pub fn nfa_edges(&self) -> usize {
        match *self {
            Expr::Empty | Expr::Literal(_) | Expr::AnyChar => 1,
            Expr::Concat(ref es) if es.is_empty() => 1,
            Expr::Concat(ref es) =>
                es.iter().map(Expr::nfa_edges).sum::<usize>() + es.len() - 1,
            Expr::Alternate(ref es) =>
                es.iter().map(Expr::nfa_edges).sum::<usize>() + 2 * es.len(),
            Expr::Repeat { ref e, r } => e.nfa_edges() + match r {
                Repeater::ZeroOrMore => 4,
                Repeater::OneOrMore | Repeater::ZeroOrOne => 3,
            },
            Expr::Group(ref e) => e.nfa_edges(),
        }
    }
}
