// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::ast::Expr;
use crate::config::Config;
use crate::graph::{Graph, NodeId};
use crate::parser::parse;
use crate::tokenizer::tokenize;
use std::fmt::{self, Debug, Formatter};

pub mod builder;
mod determinize;

pub use self::builder::{Fragment, NfaBuilder};

/// How we represent a set of NFA states while determinizing.
///
/// It has to be hashable (which rules out `HashSet`) and fast to compare. Sets are built once and
/// then only looked up, so a sorted `Vec` does the job. (Be careful to keep it sorted!)
pub type StateSet = Vec<NodeId>;

/// The label on a transition.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Label {
    /// Moves without consuming input. Only NFAs have these.
    Eps,
    Char(char),
    /// Consumes any char. In a DFA this means any char that doesn't have a `Char` transition of
    /// its own.
    Any,
}

impl Default for Label {
    fn default() -> Label {
        Label::Eps
    }
}

/// A non-deterministic finite automaton, built by Thompson's construction.
///
/// There is exactly one initial state and exactly one accepting state.
#[derive(Clone, PartialEq)]
pub struct Nfa {
    graph: Graph<Label>,
    start: NodeId,
    accept: NodeId,
}

impl Nfa {
    /// Builds an `Nfa` from an `Expr`.
    ///
    /// Unless `config` says otherwise, the graph is sized to fit exactly.
    pub fn from_expr(expr: &Expr, config: &Config) -> crate::Result<Nfa> {
        let nodes = config.get_nfa_nodes().unwrap_or_else(|| expr.nfa_size());
        let buckets = config.get_nfa_buckets().unwrap_or_else(|| expr.nfa_edges());
        let mut graph = Graph::new(nodes, buckets);

        let frag = NfaBuilder::build(expr, &mut graph)?;
        Ok(Nfa {
            graph: graph,
            start: frag.start,
            accept: frag.accept,
        })
    }

    /// Builds an `Nfa` from a regular expression string.
    pub fn from_regex(re: &str, config: &Config) -> crate::Result<Nfa> {
        let tokens = tokenize(re)?;
        let expr = parse(&tokens)?;
        Nfa::from_expr(&expr, config)
    }

    pub fn graph(&self) -> &Graph<Label> {
        &self.graph
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn accept(&self) -> NodeId {
        self.accept
    }

    /// Returns the number of states.
    pub fn num_states(&self) -> usize {
        self.graph.num_nodes()
    }
}

impl Debug for Nfa {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "Nfa ({} states, start {}, accept {}):",
                 self.num_states(), self.start, self.accept)?;

        for st in (0..self.num_states()).take(40) {
            writeln!(f, "\tState {}:", st)?;
            // Cap it at 10 transitions, since it gets unreadable otherwise.
            for e in self.graph.edges(st).take(10) {
                writeln!(f, "\t\t{:?} => {}", e.label, e.target)?;
            }
            if self.graph.out_degree(st) > 10 {
                f.write_str("\t\t...\n")?;
            }
        }
        if self.num_states() > 40 {
            writeln!(f, "\t... ({} more states)", self.num_states() - 40)?;
        }
        Ok(())
    }
}
