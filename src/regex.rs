// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::config::Config;
use crate::dfa::Dfa;
use crate::error::Error;
use crate::nfa::Nfa;
use crate::parser::parse;
use crate::tokenizer::tokenize;
use log::debug;
use std::fmt;

/// A compiled regular expression.
///
/// Matching is anchored at both ends: a `Regex` matches a string only if it matches all of it.
/// A `Regex` is immutable once compiled, so it can be shared between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Regex {
    dfa: Dfa,
    text: String,
}

impl Regex {
    /// Creates a new `Regex` from a regular expression string.
    pub fn new(re: &str) -> Result<Regex, Error> {
        Regex::with_config(re, &Config::default())
    }

    /// Creates a new `Regex` from a regular expression string, within the storage limits given by
    /// `config`.
    pub fn with_config(re: &str, config: &Config) -> Result<Regex, Error> {
        let tokens = tokenize(re)?;
        let expr = parse(&tokens)?;
        debug!("parsed {:?} ({} tokens): {:?}", re, tokens.len(), expr);

        let nfa = Nfa::from_expr(&expr, config)?;
        debug!("built nfa with {} states, {} transitions",
               nfa.num_states(), nfa.graph().num_edges());

        let dfa = nfa.determinize(config)?;
        debug!("built dfa with {} states, {} transitions",
               dfa.num_states(), dfa.graph().num_edges());

        Ok(Regex {
            dfa: dfa,
            text: re.to_owned(),
        })
    }

    /// Returns true if `s` matches this regex (all of it, not just a substring).
    pub fn is_match(&self, s: &str) -> bool {
        self.dfa.is_match(s)
    }

    /// Returns the source text that this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Returns the number of DFA states.
    pub fn num_states(&self) -> usize {
        self.dfa.num_states()
    }

    /// Returns true if this regex matches only finitely many strings.
    pub fn is_finite(&self) -> bool {
        !self.dfa.is_infinite()
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compiles `re` with the default storage limits.
pub fn compile(re: &str) -> Result<Regex, Error> {
    Regex::new(re)
}

/// Returns true if `regex` matches all of `input`.
pub fn matches(regex: &Regex, input: &str) -> bool {
    regex.is_match(input)
}
