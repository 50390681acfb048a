//! Parsing for day-19-style workflow rules, e.g. `px{a<2006:qkq,m>2090:A,rfg}`.
//!
//! Only the routing structure is kept: each rule contributes the destination after its
//! final `:`, and the trailing item is the unconditional default destination. The rule
//! conditions themselves play no part in the graph's shape.

use itertools::Itertools;
use thiserror::Error;

use crate::graph::RouteGraph;

/// The accept and reject labels. Both are sinks of every workflow graph.
pub const SINKS: [&str; 2] = ["A", "R"];

/// The workflow every part enters first.
pub const ENTRY: &str = "in";

/// Ways a workflow line can be malformed.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The line has no `{` separating the name from the rule body.
    #[error("line {0}: missing `{{` after workflow name")]
    MissingOpenBrace(usize),
    /// The rule body does not end with `}`.
    #[error("line {0}: workflow body must end with `}}`")]
    MissingCloseBrace(usize),
    /// There is no text before the `{`.
    #[error("line {0}: empty workflow name")]
    EmptyName(usize),
    /// There is no text between the braces.
    #[error("line {0}: empty workflow body")]
    EmptyBody(usize),
}

/// Parse the workflow section of a day 19 input into a [`RouteGraph`] with sinks
/// [`SINKS`]. Reading stops at the first blank line; the part ratings below it are
/// not workflow rules and are ignored.
pub fn parse(input: &str) -> Result<RouteGraph, ParseError> {
    let mut graph = RouteGraph::new();
    for sink in SINKS {
        graph.insert_sink(sink);
    }

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            break;
        }
        let (name, destinations) = parse_line(line, idx + 1)?;
        graph.insert_route(name, destinations);
    }

    Ok(graph)
}

/// Split one workflow line into its name and its destinations, in rule order.
fn parse_line(line: &str, lineno: usize) -> Result<(&str, Vec<&str>), ParseError> {
    let Some((name, rest)) = line.split_once('{') else {
        return Err(ParseError::MissingOpenBrace(lineno));
    };
    let Some(body) = rest.strip_suffix('}') else {
        return Err(ParseError::MissingCloseBrace(lineno));
    };
    if name.is_empty() {
        return Err(ParseError::EmptyName(lineno));
    }
    if body.is_empty() {
        return Err(ParseError::EmptyBody(lineno));
    }

    let parts = body.split(',').collect_vec();
    let (rules, default) = parts.split_at(parts.len() - 1);

    let mut destinations = Vec::with_capacity(parts.len());
    // conditional rules look like `a<2006:qkq`; the destination follows the last `:`
    destinations.extend(rules.iter().copied().map(|rule| rule.rsplit(':').next().unwrap_or(rule)));
    destinations.push(default[0]);

    Ok((name, destinations))
}
