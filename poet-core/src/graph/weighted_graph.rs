use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use log::debug;

use super::vertex::Vertex;
use crate::error::{PoetError, Result};

/// Weight carried by an edge. Stored edges always have a weight > 0.
pub type Weight = u32;

/// A mutable, directed, weighted graph addressed by labels of type `L`.
///
/// Each vertex owns an adjacency record holding its outgoing and incoming
/// edges, so neighbor lookups are expected O(1) and removals O(degree).
///
/// # Responsibilities
/// - Add and remove vertices
/// - Create, replace and delete edges through `set`
/// - Answer neighborhood queries with owned snapshots
/// - Merge another graph by summing edge weights
///
/// # Invariants
/// - Every edge endpoint is a vertex of the graph
/// - Every stored weight is strictly positive
/// - At most one edge exists for an ordered pair `(source, target)`
/// - `outgoing[a][b]` exists iff `incoming[b][a]` exists, with the same weight
/// - No self-loops
#[derive(Clone, Debug)]
pub struct WeightedDirectedGraph<L> {
	vertices: HashMap<L, Vertex<L>>,
}

impl<L: Eq + Hash + Clone> Default for WeightedDirectedGraph<L> {
	fn default() -> Self {
		Self::new()
	}
}

impl<L: Eq + Hash + Clone> WeightedDirectedGraph<L> {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self { vertices: HashMap::new() }
	}

	/// Adds a vertex with no edges.
	///
	/// Returns `true` if the label was not already present.
	pub fn add(&mut self, label: L) -> bool {
		if self.vertices.contains_key(&label) {
			return false;
		}
		self.vertices.insert(label, Vertex::new());
		true
	}

	/// Adds, changes or removes the edge `source -> target`.
	///
	/// - `weight > 0`: both endpoints are added if missing, then the edge is
	///   inserted or its weight replaced.
	/// - `weight == 0`: the edge is deleted if it exists. Vertices are kept,
	///   and none are added when the edge was absent.
	///
	/// Returns the weight the edge had before the call (0 if it did not exist).
	///
	/// # Errors
	/// Returns `InvalidArgument` if `source == target`; the graph is untouched.
	pub fn set(&mut self, source: L, target: L, weight: Weight) -> Result<Weight> {
		if source == target {
			return Err(PoetError::invalid("self-loops are not allowed"));
		}

		if weight == 0 && self.weight(&source, &target).is_none() {
			return Ok(0);
		}

		let previous = self
			.vertices
			.entry(source.clone())
			.or_insert_with(Vertex::new)
			.set_target(target.clone(), weight);
		let mirrored = self
			.vertices
			.entry(target)
			.or_insert_with(Vertex::new)
			.set_source(source, weight);
		debug_assert_eq!(previous, mirrored, "adjacency maps out of sync");

		Ok(previous)
	}

	/// Removes a vertex and every edge it takes part in.
	///
	/// Returns `true` if the label was present.
	pub fn remove<Q>(&mut self, label: &Q) -> bool
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		let Some(removed) = self.vertices.remove(label) else {
			return false;
		};

		// Only the neighbors reference the removed label
		for neighbor in removed.outgoing().keys().chain(removed.incoming().keys()) {
			if let Some(vertex) = self.vertices.get_mut::<L>(neighbor) {
				vertex.forget(label);
			}
		}
		true
	}

	/// Returns a snapshot of all vertex labels.
	pub fn vertices(&self) -> HashSet<L> {
		self.vertices.keys().cloned().collect()
	}

	/// Returns a snapshot of the edges entering `target`, as `source -> weight`.
	///
	/// Empty if `target` is absent or has no incoming edges.
	pub fn sources<Q>(&self, target: &Q) -> HashMap<L, Weight>
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.vertices
			.get(target)
			.map(|vertex| vertex.incoming().clone())
			.unwrap_or_default()
	}

	/// Returns a snapshot of the edges leaving `source`, as `target -> weight`.
	///
	/// Empty if `source` is absent or has no outgoing edges.
	pub fn targets<Q>(&self, source: &Q) -> HashMap<L, Weight>
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.vertices
			.get(source)
			.map(|vertex| vertex.outgoing().clone())
			.unwrap_or_default()
	}

	/// Weight of the edge `source -> target`, if it exists.
	pub fn weight<Q>(&self, source: &Q, target: &Q) -> Option<Weight>
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.vertices.get(source)?.target_weight(target)
	}

	/// Borrowing iterator over the edges leaving `source`.
	///
	/// Used internally where a snapshot would only be read once.
	pub(crate) fn outgoing<Q>(&self, source: &Q) -> impl Iterator<Item = (&L, Weight)>
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.vertices
			.get(source)
			.into_iter()
			.flat_map(|vertex| vertex.outgoing().iter().map(|(label, weight)| (label, *weight)))
	}

	pub fn contains<Q>(&self, label: &Q) -> bool
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.vertices.contains_key(label)
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn edge_count(&self) -> usize {
		self.vertices.values().map(|vertex| vertex.outgoing().len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	/// Merges another graph into this one.
	///
	/// Every vertex of `other` is added, and the weights of edges present in
	/// both graphs are summed.
	///
	/// # Errors
	/// Returns `InvalidArgument` if a summed weight overflows. `self` is left
	/// unchanged in that case.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		// Compute every new weight before touching `self`
		let mut updates = Vec::new();
		for (source, vertex) in &other.vertices {
			for (target, weight) in vertex.outgoing() {
				let current = self.weight(source, target).unwrap_or(0);
				let summed = current
					.checked_add(*weight)
					.ok_or_else(|| PoetError::invalid("edge weight overflow while merging"))?;
				updates.push((source.clone(), target.clone(), summed));
			}
		}

		for label in other.vertices.keys() {
			self.add(label.clone());
		}
		let merged_edges = updates.len();
		for (source, target, weight) in updates {
			self.set(source, target, weight)?;
		}

		debug!(
			"merged graph: {} vertices, {} edges updated",
			other.vertex_count(),
			merged_edges
		);
		Ok(())
	}
}

impl<L: Eq + Hash + Clone + Ord> WeightedDirectedGraph<L> {
	/// Returns a snapshot of every edge as `(source, target, weight)`,
	/// sorted by source then target.
	pub fn edges(&self) -> Vec<(L, L, Weight)> {
		let mut edges: Vec<(L, L, Weight)> = self
			.vertices
			.iter()
			.flat_map(|(source, vertex)| {
				vertex
					.outgoing()
					.iter()
					.map(move |(target, weight)| (source.clone(), target.clone(), *weight))
			})
			.collect();
		edges.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
		edges
	}
}

/// One edge per line, `source -> target: weight`, sorted by source then target.
impl<L: Eq + Hash + Clone + Ord + fmt::Display> fmt::Display for WeightedDirectedGraph<L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, (source, target, weight)) in self.edges().iter().enumerate() {
			if i > 0 {
				writeln!(f)?;
			}
			write!(f, "{} -> {}: {}", source, target, weight)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph_of(edges: &[(&'static str, &'static str, Weight)]) -> WeightedDirectedGraph<&'static str> {
		let mut graph = WeightedDirectedGraph::new();
		for (source, target, weight) in edges {
			graph.set(*source, *target, *weight).unwrap();
		}
		graph
	}

	#[test]
	fn add_is_idempotent() {
		let mut graph = WeightedDirectedGraph::new();
		assert!(graph.add("a"));
		assert!(!graph.add("a"));
		assert_eq!(graph.vertices(), HashSet::from(["a"]));
	}

	#[test]
	fn empty_graph_queries() {
		let graph: WeightedDirectedGraph<String> = WeightedDirectedGraph::new();
		assert!(graph.vertices().is_empty());
		assert!(graph.sources("a").is_empty());
		assert!(graph.targets("a").is_empty());
		assert!(graph.is_empty());
		assert_eq!(graph.to_string(), "");
	}

	#[test]
	fn set_adds_missing_endpoints() {
		let mut graph = WeightedDirectedGraph::new();
		graph.add("a");
		assert_eq!(graph.set("a", "b", 3).unwrap(), 0);
		assert_eq!(graph.vertices(), HashSet::from(["a", "b"]));
		assert_eq!(graph.targets("a"), HashMap::from([("b", 3)]));
		assert_eq!(graph.sources("b"), HashMap::from([("a", 3)]));
	}

	#[test]
	fn set_replaces_weight() {
		let mut graph = graph_of(&[("a", "b", 5)]);
		assert_eq!(graph.set("a", "b", 9).unwrap(), 5);
		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.weight("a", "b"), Some(9));
		assert_eq!(graph.sources("b"), HashMap::from([("a", 9)]));
	}

	#[test]
	fn zero_weight_removes_edge_but_keeps_vertices() {
		let mut graph = graph_of(&[("a", "b", 5)]);
		assert_eq!(graph.set("a", "b", 0).unwrap(), 5);
		assert_eq!(graph.vertex_count(), 2);
		assert!(graph.targets("a").is_empty());
		assert!(graph.sources("b").is_empty());
	}

	#[test]
	fn zero_weight_on_absent_edge_adds_nothing() {
		let mut graph = WeightedDirectedGraph::new();
		assert_eq!(graph.set("a", "b", 0).unwrap(), 0);
		assert!(graph.is_empty());
	}

	#[test]
	fn self_loop_is_rejected_without_mutation() {
		let mut graph: WeightedDirectedGraph<&str> = WeightedDirectedGraph::new();
		let result = graph.set("a", "a", 1);
		assert!(matches!(result, Err(PoetError::InvalidArgument { .. })));
		assert!(graph.is_empty());
	}

	#[test]
	fn edges_are_directed() {
		let graph = graph_of(&[("a", "b", 1)]);
		assert_eq!(graph.weight("b", "a"), None);
		assert!(graph.targets("b").is_empty());
		assert!(graph.sources("a").is_empty());
	}

	#[test]
	fn remove_cascades_to_neighbors() {
		let mut graph = graph_of(&[("a", "b", 5), ("c", "a", 2), ("b", "c", 1)]);
		assert!(graph.remove("a"));
		assert!(!graph.contains("a"));
		assert!(graph.sources("b").is_empty());
		assert!(graph.targets("c").is_empty());
		assert_eq!(graph.edge_count(), 1);
		assert!(!graph.remove("a"));
	}

	#[test]
	fn remove_by_borrowed_label() {
		let mut graph: WeightedDirectedGraph<String> = WeightedDirectedGraph::new();
		graph.set("a".to_owned(), "b".to_owned(), 2).unwrap();
		graph.set("c".to_owned(), "a".to_owned(), 1).unwrap();
		assert!(graph.remove("a"));
		assert!(graph.sources("b").is_empty());
		assert!(graph.targets("c").is_empty());
		assert_eq!(graph.vertex_count(), 2);
	}

	#[test]
	fn snapshots_do_not_follow_mutation() {
		let mut graph = graph_of(&[("a", "b", 5)]);
		let targets = graph.targets("a");
		let vertices = graph.vertices();
		graph.set("a", "c", 1).unwrap();
		graph.remove("b");
		assert_eq!(targets, HashMap::from([("b", 5)]));
		assert_eq!(vertices.len(), 2);
	}

	#[test]
	fn merge_sums_weights_and_adds_vertices() {
		let mut left = graph_of(&[("a", "b", 2)]);
		let mut right = graph_of(&[("a", "b", 3), ("b", "c", 1)]);
		right.add("lonely");
		left.merge(&right).unwrap();
		assert_eq!(left.weight("a", "b"), Some(5));
		assert_eq!(left.weight("b", "c"), Some(1));
		assert!(left.contains("lonely"));
	}

	#[test]
	fn merge_overflow_leaves_graph_unchanged() {
		let mut left = graph_of(&[("a", "b", Weight::MAX), ("x", "y", 1)]);
		let right = graph_of(&[("x", "y", 1), ("a", "b", 1), ("new", "x", 1)]);
		assert!(left.merge(&right).is_err());
		assert_eq!(left.weight("x", "y"), Some(1));
		assert!(!left.contains("new"));
	}

	#[test]
	fn display_lists_sorted_edges() {
		let graph = graph_of(&[("b", "a", 1), ("a", "c", 4), ("a", "b", 2)]);
		assert_eq!(graph.to_string(), "a -> b: 2\na -> c: 4\nb -> a: 1");
	}
}
