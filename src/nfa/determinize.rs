// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bit_set::BitSet;
use crate::config::Config;
use crate::dfa::Dfa;
use crate::error::{Error, Resource};
use crate::graph::{Graph, GraphError, NodeId};
use crate::nfa::{Label, Nfa, StateSet};
use itertools::Itertools;
use log::trace;
use std::collections::{HashMap, VecDeque};

fn dfa_error(e: GraphError) -> Error {
    match e {
        GraphError::OutOfNodes => Error::CapacityExhausted(Resource::DfaStates),
        GraphError::OutOfBuckets | GraphError::NoEmptySlot =>
            Error::CapacityExhausted(Resource::DfaBuckets),
    }
}

impl Nfa {
    /// Converts this `Nfa` into an equivalent `Dfa` by the subset construction.
    ///
    /// Fails if the `Dfa` would need more states or buckets than `config` allows. The result has
    /// no dead state: a char with nowhere to go simply has no transition.
    pub fn determinize(&self, config: &Config) -> crate::Result<Dfa> {
        let mut det = Determinizer::new(self, config);
        let init = det.run()?;
        det.dfa.shrink_to_fit();
        Ok(Dfa::from_parts(det.dfa, init, det.accepting))
    }

    /// Returns the set of states reachable from `states` by following only epsilon transitions.
    pub fn eps_closure<I>(&self, states: I) -> StateSet where I: Iterator<Item=NodeId> {
        let mut seen = BitSet::with_capacity(self.graph.num_nodes());
        let mut stack: Vec<NodeId> = states.filter(|&s| seen.insert(s)).collect();
        let mut ret = stack.clone();

        while let Some(s) = stack.pop() {
            for e in self.graph.edges(s) {
                if e.label == Label::Eps && seen.insert(e.target) {
                    ret.push(e.target);
                    stack.push(e.target);
                }
            }
        }
        ret.sort();
        ret
    }

    /// Returns the set of states reachable from `states` by consuming one token on a transition
    /// whose label satisfies `pred`, followed by any number of epsilon transitions.
    fn step<P>(&self, states: &StateSet, pred: P) -> StateSet where P: Fn(Label) -> bool {
        let targets = states.iter()
            .flat_map(|&s| self.graph.edges(s))
            .filter(|e| pred(e.label))
            .map(|e| e.target);
        self.eps_closure(targets)
    }

    // The explicit chars that some state in `states` has a transition for, in increasing order.
    fn symbols(&self, states: &StateSet) -> Vec<char> {
        states.iter()
            .flat_map(|&s| self.graph.edges(s))
            .filter_map(|e| match e.label {
                Label::Char(c) => Some(c),
                _ => None,
            })
            .sorted()
            .dedup()
            .collect()
    }

    fn has_any(&self, states: &StateSet) -> bool {
        states.iter().any(|&s| self.graph.edges(s).any(|e| e.label == Label::Any))
    }
}

// This contains all the intermediate data structures that we need when turning an `Nfa` into a
// `Dfa`.
struct Determinizer<'a> {
    nfa: &'a Nfa,
    dfa: Graph<Label>,
    accepting: BitSet,
    state_map: HashMap<StateSet, NodeId>,
    active_states: VecDeque<StateSet>,
}

impl<'a> Determinizer<'a> {
    fn new(nfa: &'a Nfa, config: &Config) -> Determinizer<'a> {
        Determinizer {
            nfa: nfa,
            dfa: Graph::new(config.get_dfa_states(), config.get_dfa_buckets()),
            accepting: BitSet::new(),
            state_map: HashMap::new(),
            active_states: VecDeque::new(),
        }
    }

    // Tries to add a new state to the Dfa.
    //
    // If the state already exists, returns the index of the old one. If there are too many
    // states, returns an error.
    fn add_state(&mut self, s: StateSet) -> crate::Result<NodeId> {
        if let Some(&idx) = self.state_map.get(&s) {
            return Ok(idx);
        }

        let idx = self.dfa.add_node().map_err(dfa_error)?;
        if s.binary_search(&self.nfa.accept()).is_ok() {
            self.accepting.insert(idx);
        }
        trace!("dfa state {} <- nfa states {:?}", idx, s);

        self.active_states.push_back(s.clone());
        self.state_map.insert(s, idx);
        Ok(idx)
    }

    fn add_transition(&mut self, from: NodeId, to: NodeId, label: Label) -> crate::Result<()> {
        if !self.dfa.has_empty_slot(from) {
            self.dfa.add_bucket(from).map_err(dfa_error)?;
        }
        self.dfa.add_labeled_edge(from, to, label).map_err(dfa_error)
    }

    // Creates a deterministic automaton representing the same language as our `nfa`, returning
    // its initial state.
    fn run(&mut self) -> crate::Result<NodeId> {
        let nfa = self.nfa;
        let init = self.add_state(nfa.eps_closure(Some(nfa.start()).into_iter()))?;

        while let Some(state) = self.active_states.pop_front() {
            // Anything in active_states is also in state_map.
            let state_idx = self.state_map[&state];

            for ch in nfa.symbols(&state) {
                let target = nfa.step(&state, |l| l == Label::Char(ch) || l == Label::Any);
                let target_idx = self.add_state(target)?;
                self.add_transition(state_idx, target_idx, Label::Char(ch))?;
            }
            if nfa.has_any(&state) {
                let target = nfa.step(&state, |l| l == Label::Any);
                let target_idx = self.add_state(target)?;
                self.add_transition(state_idx, target_idx, Label::Any)?;
            }
        }
        Ok(init)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::{Error, Resource};
    use crate::nfa::Label;
    use crate::nfa::tests::re_nfa;

    #[test]
    fn closure() {
        // states: 0 -eps-> 1 -a-> 2, 0 -eps-> 3 (accept)
        let nfa = re_nfa("a*");
        assert_eq!(nfa.eps_closure(Some(0).into_iter()), vec![0, 1, 3]);
        assert_eq!(nfa.eps_closure(Some(2).into_iter()), vec![1, 2, 3]);
    }

    #[test]
    fn closure_of_empty_set() {
        let nfa = re_nfa("a");
        assert!(nfa.eps_closure(None.into_iter()).is_empty());
    }

    #[test]
    fn literal() {
        let dfa = re_nfa("a").determinize(&Config::default()).unwrap();
        assert_eq!(dfa.num_states(), 2);
        assert_eq!(dfa.transition(dfa.init_state(), 'a'), Some(1));
        assert_eq!(dfa.transition(dfa.init_state(), 'b'), None);
        assert!(!dfa.is_accepting(0));
        assert!(dfa.is_accepting(1));
    }

    #[test]
    fn deterministic() {
        // The NFA has two 'a' transitions out of the initial closure; the DFA has one.
        let dfa = re_nfa("ab|ac").determinize(&Config::default()).unwrap();
        let init = dfa.init_state();
        assert_eq!(dfa.graph().out_degree(init), 1);
        let after_a = dfa.transition(init, 'a').unwrap();
        assert_eq!(dfa.graph().out_degree(after_a), 2);
        for st in 0..dfa.num_states() {
            let labels: Vec<Label> = dfa.graph().edges(st).map(|e| e.label).collect();
            let mut dedup = labels.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(labels.len(), dedup.len());
        }
    }

    #[test]
    fn any_char_is_a_default() {
        let dfa = re_nfa(".b|ac").determinize(&Config::default()).unwrap();
        let init = dfa.init_state();
        let on_a = dfa.transition(init, 'a').unwrap();
        let on_x = dfa.transition(init, 'x').unwrap();
        assert_ne!(on_a, on_x);
        // After 'a' both branches are still alive.
        assert!(dfa.transition(on_a, 'b').is_some());
        assert!(dfa.transition(on_a, 'c').is_some());
        assert!(dfa.transition(on_x, 'c').is_none());
    }

    #[test]
    fn no_dead_state() {
        let dfa = re_nfa("abc").determinize(&Config::default()).unwrap();
        assert_eq!(dfa.num_states(), 4);
    }

    #[test]
    fn star_loops() {
        let dfa = re_nfa("a*").determinize(&Config::default()).unwrap();
        assert_eq!(dfa.num_states(), 2);
        assert!(dfa.is_accepting(0));
        assert!(dfa.is_accepting(1));
        assert_eq!(dfa.transition(1, 'a'), Some(1));
    }

    #[test]
    fn storage_is_trimmed() {
        let dfa = re_nfa("(ab|c)*d").determinize(&Config::default()).unwrap();
        assert_eq!(dfa.graph().size(), dfa.num_states());
        assert_eq!(dfa.graph().bucket_capacity(), dfa.graph().num_buckets());
    }

    #[test]
    fn max_states() {
        let nfa = re_nfa("foo");
        assert_eq!(nfa.determinize(&Config::new().dfa_states(3)),
                   Err(Error::CapacityExhausted(Resource::DfaStates)));
        assert!(nfa.determinize(&Config::new().dfa_states(4)).is_ok());
    }

    #[test]
    fn max_buckets() {
        let nfa = re_nfa("foo");
        assert_eq!(nfa.determinize(&Config::new().dfa_buckets(2)),
                   Err(Error::CapacityExhausted(Resource::DfaBuckets)));
        assert!(nfa.determinize(&Config::new().dfa_buckets(3)).is_ok());
    }
}
