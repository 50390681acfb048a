#![warn(missing_docs)]

//! # `spelunk`
//!
//! Structure analysis for a few Advent of Code 2023 puzzle inputs.
//! Three kinds of input are understood:
//!
//! * **Workflow rules** (day 19), parsed by [`workflow::parse`] into a [`RouteGraph`]
//!   whose sinks are the accept/reject labels `A` and `R`.
//! * **Module configurations** (day 20), parsed by [`modules::parse`] into a
//!   [`ModuleConfig`](modules::ModuleConfig) wrapping a [`RouteGraph`] whose sinks are
//!   every destination that is never declared as a module.
//! * **Garden grids** (day 21), parsed by [`Grid::parse`] and queried for the set of
//!   plots reachable in exactly N steps.
//!
//! The question both graph inputs answer is whether every path from the entry node
//! reaches a sink without revisiting an ancestor; see [`RouteGraph::check_tree`].
//! The same routine serves both inputs, parameterized over the sink set, so there is
//! exactly one traversal implementation.
//!
//! # Internals
//! Graphs are held as adjacency lists over interned name IDs, preserving both the
//! order and the multiplicity of successors as they appear in the input; a line
//! redeclaring a source replaces its earlier successor list. The cycle check is an
//! iterative depth-first search carrying an explicit ancestor stack, so deeply nested
//! inputs cannot exhaust the call stack the way a recursive check would.
//!
//! Grid reachability follows the matrix-power formulation: a symmetric 0/1 transition
//! matrix over passable plots is eigendecomposed, the eigenvalue diagonal is raised to
//! the Nth power, and the reconstituted matrix is applied to a one-hot start vector.
//! A frontier-walk implementation of the same query is provided as a cross-check.

pub use graph::{GraphError, RouteGraph, TreeCheck};
pub use grid::{Grid, Location};

mod tests;
pub mod graph;
pub mod grid;
pub mod modules;
pub mod workflow;
