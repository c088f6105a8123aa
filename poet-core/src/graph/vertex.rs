use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use super::weighted_graph::Weight;

/// Adjacency record of a single vertex.
///
/// A `Vertex` stores both directions of every incident edge: `outgoing` maps a
/// target label to the edge weight, `incoming` maps a source label to it.
/// The owning graph keeps the two sides mirrored.
///
/// ## Invariants
/// - Every stored weight is strictly positive
/// - The vertex never appears in its own maps (no self-loops)
#[derive(Clone, Debug)]
pub(crate) struct Vertex<L> {
	/// Edges leaving this vertex. Example: { "fox" => 2, "dog" => 1 }
	outgoing: HashMap<L, Weight>,
	/// Edges entering this vertex.
	incoming: HashMap<L, Weight>,
}

impl<L: Eq + Hash + Clone> Vertex<L> {
	/// Creates a vertex with no incident edges.
	pub(crate) fn new() -> Self {
		Self {
			outgoing: HashMap::new(),
			incoming: HashMap::new(),
		}
	}

	/// Sets the weight of the edge toward `target`.
	///
	/// A zero weight deletes the edge. Returns the previous weight, 0 if none.
	pub(crate) fn set_target(&mut self, target: L, weight: Weight) -> Weight {
		Self::set_in(&mut self.outgoing, target, weight)
	}

	/// Sets the weight of the edge coming from `source`.
	///
	/// A zero weight deletes the edge. Returns the previous weight, 0 if none.
	pub(crate) fn set_source(&mut self, source: L, weight: Weight) -> Weight {
		Self::set_in(&mut self.incoming, source, weight)
	}

	fn set_in(map: &mut HashMap<L, Weight>, label: L, weight: Weight) -> Weight {
		let previous = if weight == 0 {
			map.remove(&label)
		} else {
			map.insert(label, weight)
		};
		previous.unwrap_or(0)
	}

	/// Drops `label` from both adjacency maps.
	pub(crate) fn forget<Q>(&mut self, label: &Q)
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.outgoing.remove(label);
		self.incoming.remove(label);
	}

	/// Weight of the edge toward `target`, if any.
	pub(crate) fn target_weight<Q>(&self, target: &Q) -> Option<Weight>
	where
		L: Borrow<Q>,
		Q: ?Sized + Hash + Eq,
	{
		self.outgoing.get(target).copied()
	}

	pub(crate) fn outgoing(&self) -> &HashMap<L, Weight> {
		&self.outgoing
	}

	pub(crate) fn incoming(&self) -> &HashMap<L, Weight> {
		&self.incoming
	}
}
