// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexErrorKind {
    /// The pattern ends with a `\` that escapes nothing.
    TrailingBackslash,
    /// A `\` followed by something other than a metacharacter.
    InvalidEscape(char),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxErrorKind {
    UnmatchedOpenParen,
    UnmatchedCloseParen,
    /// An alternative (or a group) with nothing in it, as in `a|`, `|a` or `()`.
    EmptyAlternative,
    /// A repetition operator with no atom to repeat, as in `*a`, `(+)` or `a**`.
    DanglingRepeat,
    /// Groups nested more than `parser::NEST_LIMIT` deep.
    NestTooDeep,
}

/// The storage that ran out while compiling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resource {
    NfaNodes,
    NfaBuckets,
    DfaStates,
    DfaBuckets,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("regex lex error at offset {offset}: {kind}")]
    Lex { offset: usize, kind: LexErrorKind },
    #[error("regex syntax error at token {position}: {kind}")]
    Syntax { position: usize, kind: SyntaxErrorKind },
    #[error("automaton capacity exhausted: out of {0}")]
    CapacityExhausted(Resource),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LexErrorKind::TrailingBackslash => f.write_str("trailing backslash"),
            LexErrorKind::InvalidEscape(c) => write!(f, "invalid escape sequence \\{}", c),
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            SyntaxErrorKind::UnmatchedOpenParen => "unmatched '('",
            SyntaxErrorKind::UnmatchedCloseParen => "unmatched ')'",
            SyntaxErrorKind::EmptyAlternative => "empty alternative",
            SyntaxErrorKind::DanglingRepeat => "repetition operator with nothing to repeat",
            SyntaxErrorKind::NestTooDeep => "groups nested too deeply",
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Resource::NfaNodes => "NFA nodes",
            Resource::NfaBuckets => "NFA edge buckets",
            Resource::DfaStates => "DFA states",
            Resource::DfaBuckets => "DFA edge buckets",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::Lex { offset: 3, kind: LexErrorKind::InvalidEscape('q') };
        assert_eq!(e.to_string(), "regex lex error at offset 3: invalid escape sequence \\q");

        let e = Error::Syntax { position: 0, kind: SyntaxErrorKind::DanglingRepeat };
        assert_eq!(e.to_string(),
                   "regex syntax error at token 0: repetition operator with nothing to repeat");

        let e = Error::CapacityExhausted(Resource::DfaStates);
        assert_eq!(e.to_string(), "automaton capacity exhausted: out of DFA states");
    }
}
