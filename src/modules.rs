//! Parsing for day-20-style module configurations, e.g.:
//!
//! ```text
//! broadcaster -> a, b, c
//! %a -> b
//! &inv -> a
//! ```
//!
//! Destinations that are never declared as modules (`rx` and `output` in the real
//! input) become sinks of the resulting graph, so a cycle check from
//! [`ENTRY`] treats them as terminal leaves rather than dangling references.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::graph::RouteGraph;

/// The module every button press reaches first.
pub const ENTRY: &str = "broadcaster";

/// Kinds of communication module, keyed by the line's leading glyph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModuleKind {
    /// The single `broadcaster` module.
    Broadcaster,
    /// A `%`-prefixed flip-flop.
    FlipFlop,
    /// A `&`-prefixed conjunction.
    Conjunction,
}

/// Ways a module line can be malformed.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The line has no `->` between the module and its destinations.
    #[error("line {0}: expected `->` between module and destinations")]
    MissingArrow(usize),
    /// The module is neither `broadcaster` nor prefixed with `%` or `&`.
    #[error("line {0}: `{1}` is not `broadcaster` and has no `%` or `&` prefix")]
    BadPrefix(usize, String),
    /// A `%` or `&` prefix with nothing after it.
    #[error("line {0}: empty module name")]
    EmptyName(usize),
    /// The destination list is empty or contains an empty entry.
    #[error("line {0}: empty destination")]
    EmptyDestination(usize),
}

/// A parsed module configuration: the routing graph plus each declared module's kind.
#[derive(Debug)]
pub struct ModuleConfig {
    graph: RouteGraph,
    kinds: HashMap<String, ModuleKind>,
}

impl ModuleConfig {
    /// The routing structure of the configuration.
    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// The kind of the named module, if it was declared.
    pub fn kind(&self, name: &str) -> Option<ModuleKind> {
        self.kinds.get(name).copied()
    }

    /// Discard the kinds and keep only the routing graph.
    pub fn into_graph(self) -> RouteGraph {
        self.graph
    }
}

/// Parse a day 20 module configuration. Blank lines are skipped.
pub fn parse(input: &str) -> Result<ModuleConfig, ParseError> {
    let mut graph = RouteGraph::new();
    let mut kinds = HashMap::new();
    let mut named_anywhere = HashSet::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let lineno = idx + 1;

        let Some((lhs, rhs)) = line.split_once("->") else {
            return Err(ParseError::MissingArrow(lineno));
        };
        let lhs = lhs.trim();

        let (kind, name) = if lhs == ENTRY {
            (ModuleKind::Broadcaster, ENTRY)
        } else if let Some(name) = lhs.strip_prefix('%') {
            (ModuleKind::FlipFlop, name)
        } else if let Some(name) = lhs.strip_prefix('&') {
            (ModuleKind::Conjunction, name)
        } else {
            return Err(ParseError::BadPrefix(lineno, lhs.to_owned()));
        };
        if name.is_empty() {
            return Err(ParseError::EmptyName(lineno));
        }

        let destinations = rhs
            .split(',')
            .map(str::trim)
            .map(|destination| {
                if destination.is_empty() {
                    Err(ParseError::EmptyDestination(lineno))
                } else {
                    Ok(destination)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        named_anywhere.extend(destinations.iter().map(|d| (*d).to_owned()));
        graph.insert_route(name, &destinations);
        kinds.insert(name.to_owned(), kind);
    }

    // undeclared destinations receive pulses but send none; they end any path
    for name in &named_anywhere {
        if !kinds.contains_key(name) {
            graph.insert_sink(name);
        }
    }

    Ok(ModuleConfig { graph, kinds })
}
