use std::collections::{HashMap, HashSet};

use thiserror::Error;

pub(crate) type NodeId = usize;

/// Result of checking a [`RouteGraph`] for cycles from some start node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TreeCheck {
    /// Every path from the start reaches a sink (or a dead end) without revisiting an ancestor.
    Tree,
    /// Some node was found among its own ancestors.
    Cycle {
        /// Node names along the offending path, starting and ending with the repeated node.
        path: Vec<String>,
    },
}

/// Failures while traversing a [`RouteGraph`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum GraphError {
    /// A node was reached (or named as the start) which has no successor entry and is not a sink.
    #[error("node `{0}` has no successor entry and is not a sink")]
    MissingNode(String),
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Mark {
    Fresh,
    OnPath,
    Done,
}

struct Frame<'a> {
    node: NodeId,
    successors: &'a [NodeId],
    cursor: usize,
}

/// A directed successor map: each node routes, in input order, to zero or more successors.
/// Built once by a parser (or by hand with [`insert_route`](Self::insert_route)) and then
/// queried; never mutated by queries.
///
/// Successor lists are sequences, not sets: a destination listed twice stays twice, and
/// redeclaring a source replaces its earlier list outright, the way a later line in the
/// input overrides an earlier one.
///
/// A set of *sink* names terminates traversal as non-cyclic leaves, whether or not those
/// names ever appear as a source and regardless of any successors recorded for them.
#[derive(Debug)]
pub struct RouteGraph {
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
    routes: HashMap<NodeId, Vec<NodeId>>,
    sinks: HashSet<NodeId>,
}

impl Default for RouteGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGraph {
    /// Create an empty graph with no routes and no sinks.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            ids: HashMap::new(),
            routes: HashMap::new(),
            sinks: HashSet::new(),
        }
    }

    fn intern(&mut self, name: &str) -> NodeId {
        match self.ids.get(name) {
            Some(&id) => id,
            None => {
                let id = self.names.len();
                self.names.push(name.to_owned());
                self.ids.insert(name.to_owned(), id);
                id
            }
        }
    }

    /// Record that `src` routes to each of `destinations`, in order and with
    /// multiplicity. Any successor list previously recorded for `src` is replaced.
    pub fn insert_route<I, S>(&mut self, src: &str, destinations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let src_id = self.intern(src);
        let destinations: Vec<NodeId> = destinations
            .into_iter()
            .map(|destination| self.intern(destination.as_ref()))
            .collect();
        self.routes.insert(src_id, destinations);
    }

    /// Mark `name` as a sink, i.e. a terminal leaf for [`check_tree`](Self::check_tree).
    pub fn insert_sink(&mut self, name: &str) {
        let id = self.intern(name);
        self.sinks.insert(id);
    }

    /// Whether `name` is a sink of this graph.
    pub fn is_sink(&self, name: &str) -> bool {
        self.ids.get(name).is_some_and(|id| self.sinks.contains(id))
    }

    /// The number of distinct names seen so far, as sources, destinations, or sinks.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// The successors of `name` in input order (duplicates included), or [`None`] if
    /// `name` was never declared as a source.
    pub fn successors(&self, name: &str) -> Option<Vec<&str>> {
        let id = self.ids.get(name)?;
        let route = self.routes.get(id)?;
        Some(route.iter().map(|&successor| self.names[successor].as_str()).collect())
    }

    /// Check that every path from `start` terminates without revisiting an ancestor.
    ///
    /// Sinks end their branch immediately as successful leaves. A declared node with no
    /// successors likewise ends its branch. The overall result is the AND over all
    /// branches: [`TreeCheck::Tree`] only if no reachable path loops back onto itself,
    /// otherwise [`TreeCheck::Cycle`] carrying one offending path.
    ///
    /// Only ancestors on the current path count as revisits; a node reached again along
    /// a different path (a diamond) is not a cycle.
    ///
    /// Reaching a non-sink node that was never declared as a source is
    /// [`GraphError::MissingNode`], as is an unknown `start`.
    pub fn check_tree(&self, start: &str) -> Result<TreeCheck, GraphError> {
        let Some(&start_id) = self.ids.get(start) else {
            return Err(GraphError::MissingNode(start.to_owned()));
        };
        if self.sinks.contains(&start_id) {
            return Ok(TreeCheck::Tree);
        }
        let Some(start_route) = self.routes.get(&start_id) else {
            return Err(GraphError::MissingNode(start.to_owned()));
        };

        let mut marks = vec![Mark::Fresh; self.names.len()];
        let mut stack = Vec::new();

        marks[start_id] = Mark::OnPath;
        stack.push(Frame { node: start_id, successors: start_route, cursor: 0 });

        while let Some(frame) = stack.last_mut() {
            let Some(&next) = frame.successors.get(frame.cursor) else {
                // every branch below this node checked out
                marks[frame.node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            if self.sinks.contains(&next) {
                continue;
            }

            match marks[next] {
                Mark::Done => continue,
                Mark::OnPath => {
                    let first = stack
                        .iter()
                        .position(|ancestor| ancestor.node == next)
                        .expect("nodes marked OnPath are on the stack");
                    let mut path: Vec<String> = stack[first..]
                        .iter()
                        .map(|ancestor| self.names[ancestor.node].clone())
                        .collect();
                    path.push(self.names[next].clone());
                    return Ok(TreeCheck::Cycle { path });
                }
                Mark::Fresh => {
                    let Some(route) = self.routes.get(&next) else {
                        return Err(GraphError::MissingNode(self.names[next].clone()));
                    };
                    marks[next] = Mark::OnPath;
                    stack.push(Frame { node: next, successors: route, cursor: 0 });
                }
            }
        }

        Ok(TreeCheck::Tree)
    }
}
