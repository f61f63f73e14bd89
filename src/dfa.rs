// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bit_set::BitSet;
use crate::graph::{Graph, NodeId};
use crate::nfa::Label;
use std::fmt::{self, Debug, Formatter};

/// A deterministic finite automaton.
///
/// Each state has at most one transition per `Label`, and no `Eps` transitions. There is no dead
/// state: if a state has neither a `Char` transition for some char nor an `Any` transition, then
/// reading that char rejects the input.
#[derive(Clone, PartialEq)]
pub struct Dfa {
    graph: Graph<Label>,
    init: NodeId,
    accepting: BitSet,
}

impl Dfa {
    pub(crate) fn from_parts(graph: Graph<Label>, init: NodeId, accepting: BitSet) -> Dfa {
        Dfa {
            graph: graph,
            init: init,
            accepting: accepting,
        }
    }

    /// Returns the number of states.
    pub fn num_states(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn init_state(&self) -> NodeId {
        self.init
    }

    pub fn is_accepting(&self, state: NodeId) -> bool {
        self.accepting.contains(state)
    }

    pub fn graph(&self) -> &Graph<Label> {
        &self.graph
    }

    /// Returns the state we move to from `state` on reading `ch`, if there is one.
    ///
    /// A `Char(ch)` transition takes precedence over an `Any` transition.
    pub fn transition(&self, state: NodeId, ch: char) -> Option<NodeId> {
        let mut fallback = None;
        for e in self.graph.edges(state) {
            match e.label {
                Label::Char(c) if c == ch => return Some(e.target),
                Label::Any => fallback = Some(e.target),
                _ => {},
            }
        }
        fallback
    }

    /// Returns true if this `Dfa` accepts the whole of `input`.
    ///
    /// Running out of transitions is how the `Dfa` rejects: there's no need to look at the rest of
    /// the input.
    pub fn is_match(&self, input: &str) -> bool {
        let mut state = self.init;
        for ch in input.chars() {
            match self.transition(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// Returns true if this `Dfa` matches infinitely many strings.
    ///
    /// Every state can reach an accepting state, so this is the same as having a cycle.
    pub fn is_infinite(&self) -> bool {
        self.graph.has_cycles()
    }
}

impl Debug for Dfa {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Dfa ({} states):", self.num_states())?;
        writeln!(f, "Init: {}", self.init)?;

        for st in (0..self.num_states()).take(40) {
            writeln!(f, "\tState {} (accepting: {:?}):", st, self.is_accepting(st))?;

            // Cap it at 5 transitions, since it gets unreadable otherwise.
            for e in self.graph.edges(st).take(5) {
                writeln!(f, "\t\t{:?} => {}", e.label, e.target)?;
            }
            if self.graph.out_degree(st) > 5 {
                f.write_str("\t\t...\n")?;
            }
        }
        if self.num_states() > 40 {
            writeln!(f, "\t...({} more states)", self.num_states() - 40)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use crate::config::Config;
    use crate::dfa::Dfa;
    use crate::nfa::Nfa;

    pub fn make_dfa(re: &str) -> Dfa {
        let config = Config::default();
        let dfa = Nfa::from_regex(re, &config).unwrap().determinize(&config).unwrap();
        println!("{:?}", dfa);
        dfa
    }

    #[test]
    fn anchored_both_ends() {
        let dfa = make_dfa("ab");
        assert!(dfa.is_match("ab"));
        assert!(!dfa.is_match("xab"));
        assert!(!dfa.is_match("abx"));
        assert!(!dfa.is_match("a"));
    }

    #[test]
    fn rejects_early() {
        let dfa = make_dfa("a*");
        assert!(!dfa.is_match("ba"));
        assert!(!dfa.is_match("aaaab"));
    }

    #[test]
    fn explicit_char_beats_any() {
        let dfa = make_dfa("a|.b");
        assert!(dfa.is_match("a"));
        assert!(dfa.is_match("ab"));
        assert!(dfa.is_match("zb"));
        assert!(!dfa.is_match("z"));
    }

    #[test]
    fn cycles() {
        macro_rules! inf {
            ($re:expr, $res:expr) => {
                assert_eq!(make_dfa($re).is_infinite(), $res, "{}", $re);
            };
        }

        inf!("abcde", false);
        inf!("ab*d", true);
        inf!("ab+", true);
        inf!("ab?", false);
        inf!("(ab|cde)", false);
        inf!("(ab|cd)*", true);
        inf!("", false);
        inf!(".*", true);
    }
}
