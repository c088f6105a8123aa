//! Generic weighted directed graph.
//!
//! - `WeightedDirectedGraph`: label-addressed graph with positive edge weights
//! - `Vertex`: per-vertex adjacency record (internal)

/// Public graph type, its weight alias and its operations.
pub mod weighted_graph;

/// Adjacency record of a single vertex.
///
/// Not exposed: callers only ever see owned snapshots.
mod vertex;
