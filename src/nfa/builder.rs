// Copyright 2015-2016 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::ast::{Expr, Repeater};
use crate::error::{Error, Resource};
use crate::graph::{Graph, GraphError, NodeId};
use crate::nfa::Label;

/// A piece of an NFA under construction: everything reachable from `start` stays inside the
/// fragment until it reaches `accept`, which has no transitions out yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fragment {
    pub start: NodeId,
    pub accept: NodeId,
}

fn nfa_error(e: GraphError) -> Error {
    match e {
        GraphError::OutOfNodes => Error::CapacityExhausted(Resource::NfaNodes),
        GraphError::OutOfBuckets | GraphError::NoEmptySlot =>
            Error::CapacityExhausted(Resource::NfaBuckets),
    }
}

/// Writes the Thompson construction of an `Expr` into a `Graph`.
///
/// Nodes are taken from the graph in the order they are needed and never reused. Whenever a node
/// runs out of edge slots, the builder asks the graph for another bucket.
pub struct NfaBuilder<'g> {
    graph: &'g mut Graph<Label>,
}

impl<'g> NfaBuilder<'g> {
    /// Adds the states for `expr` to `graph`, returning the fragment that recognizes it.
    pub fn build(expr: &Expr, graph: &'g mut Graph<Label>) -> Result<Fragment, Error> {
        let mut builder = NfaBuilder { graph: graph };
        builder.add_expr(expr)
    }

    fn add_state(&mut self) -> Result<NodeId, Error> {
        self.graph.add_node().map_err(nfa_error)
    }

    fn add_transition(&mut self, from: NodeId, to: NodeId, label: Label) -> Result<(), Error> {
        if !self.graph.has_empty_slot(from) {
            self.graph.add_bucket(from).map_err(nfa_error)?;
        }
        self.graph.add_labeled_edge(from, to, label).map_err(nfa_error)
    }

    fn add_eps(&mut self, from: NodeId, to: NodeId) -> Result<(), Error> {
        self.add_transition(from, to, Label::Eps)
    }

    /// Adds two states, with a given transition between them.
    fn add_single_transition(&mut self, label: Label) -> Result<Fragment, Error> {
        let start = self.add_state()?;
        let accept = self.add_state()?;
        self.add_transition(start, accept, label)?;
        Ok(Fragment { start: start, accept: accept })
    }

    fn add_concat_exprs(&mut self, exprs: &[Expr]) -> Result<Fragment, Error> {
        let (first, rest) = match exprs.split_first() {
            Some(x) => x,
            None => return self.add_single_transition(Label::Eps),
        };

        let mut ret = self.add_expr(first)?;
        for expr in rest {
            let next = self.add_expr(expr)?;
            self.add_eps(ret.accept, next.start)?;
            ret.accept = next.accept;
        }
        Ok(ret)
    }

    fn add_alternate_exprs(&mut self, alts: &[Expr]) -> Result<Fragment, Error> {
        let start = self.add_state()?;

        let mut ends = Vec::with_capacity(alts.len());
        for expr in alts {
            let frag = self.add_expr(expr)?;
            self.add_eps(start, frag.start)?;
            ends.push(frag.accept);
        }

        let accept = self.add_state()?;
        for end in ends {
            self.add_eps(end, accept)?;
        }
        Ok(Fragment { start: start, accept: accept })
    }

    fn add_repeat(&mut self, expr: &Expr, rep: Repeater) -> Result<Fragment, Error> {
        let start = self.add_state()?;
        let inner = self.add_expr(expr)?;
        let accept = self.add_state()?;

        self.add_eps(start, inner.start)?;
        if rep != Repeater::OneOrMore {
            // skip
            self.add_eps(start, accept)?;
        }
        if rep != Repeater::ZeroOrOne {
            // loop
            self.add_eps(inner.accept, inner.start)?;
        }
        self.add_eps(inner.accept, accept)?;
        Ok(Fragment { start: start, accept: accept })
    }

    fn add_expr(&mut self, expr: &Expr) -> Result<Fragment, Error> {
        match *expr {
            Expr::Empty => self.add_single_transition(Label::Eps),
            Expr::Literal(c) => self.add_single_transition(Label::Char(c)),
            Expr::AnyChar => self.add_single_transition(Label::Any),
            Expr::Concat(ref es) => self.add_concat_exprs(es),
            Expr::Alternate(ref es) => self.add_alternate_exprs(es),
            Expr::Repeat { ref e, r } => self.add_repeat(e, r),
            // There are no captures, so a group is just its contents.
            Expr::Group(ref e) => self.add_expr(e),
        }
    }
}
