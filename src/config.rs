// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// The default limit on the number of DFA states.
pub const DEFAULT_DFA_STATES: usize = 1 << 12;

/// The default limit on the number of edge buckets in the DFA graph.
pub const DEFAULT_DFA_BUCKETS: usize = 1 << 14;

/// Storage limits for compiling a regex.
///
/// Both automata live in fixed-capacity graphs, and compilation fails with
/// `Error::CapacityExhausted` rather than growing them. If that happens, the caller can try again
/// with a bigger `Config`.
///
/// The NFA limits default to `None`, meaning that the NFA graph is sized exactly from the parsed
/// pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    nfa_nodes: Option<usize>,
    nfa_buckets: Option<usize>,
    dfa_states: usize,
    dfa_buckets: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            nfa_nodes: None,
            nfa_buckets: None,
            dfa_states: DEFAULT_DFA_STATES,
            dfa_buckets: DEFAULT_DFA_BUCKETS,
        }
    }
}

impl Config {
    pub fn new() -> Config {
        Config::default()
    }

    /// Caps the number of nodes in the NFA graph.
    pub fn nfa_nodes(mut self, n: usize) -> Config {
        self.nfa_nodes = Some(n);
        self
    }

    /// Caps the number of edge buckets in the NFA graph.
    pub fn nfa_buckets(mut self, n: usize) -> Config {
        self.nfa_buckets = Some(n);
        self
    }

    /// Caps the number of DFA states.
    pub fn dfa_states(mut self, n: usize) -> Config {
        self.dfa_states = n;
        self
    }

    /// Caps the number of edge buckets in the DFA graph.
    pub fn dfa_buckets(mut self, n: usize) -> Config {
        self.dfa_buckets = n;
        self
    }

    pub fn get_nfa_nodes(&self) -> Option<usize> {
        self.nfa_nodes
    }

    pub fn get_nfa_buckets(&self) -> Option<usize> {
        self.nfa_buckets
    }

    pub fn get_dfa_states(&self) -> usize {
        self.dfa_states
    }

    pub fn get_dfa_buckets(&self) -> usize {
        self.dfa_buckets
    }
}
