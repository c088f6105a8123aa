use std::collections::{HashMap, HashSet};

use poet_core::{BridgeTextGenerator, CorpusGraphBuilder, WeightedDirectedGraph};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
	Add(u8),
	Set(u8, u8, u32),
	Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0u8..6).prop_map(Op::Add),
		(0u8..6, 0u8..6, 0u32..4).prop_map(|(s, t, w)| Op::Set(s, t, w)),
		(0u8..6).prop_map(Op::Remove),
	]
}

fn check_rep(graph: &WeightedDirectedGraph<u8>) -> Result<(), TestCaseError> {
	let vertices = graph.vertices();
	for vertex in &vertices {
		for (target, weight) in graph.targets(vertex) {
			prop_assert!(vertices.contains(&target));
			prop_assert!(weight > 0);
			prop_assert_eq!(graph.sources(&target).get(vertex).copied(), Some(weight));
		}
		for (source, weight) in graph.sources(vertex) {
			prop_assert!(vertices.contains(&source));
			prop_assert_eq!(graph.targets(&source).get(vertex).copied(), Some(weight));
		}
	}
	Ok(())
}

proptest! {
	#[test]
	fn mutations_preserve_invariants_and_match_model(ops in prop::collection::vec(op(), 0..60)) {
		let mut graph = WeightedDirectedGraph::new();
		let mut model_vertices: HashSet<u8> = HashSet::new();
		let mut model_edges: HashMap<(u8, u8), u32> = HashMap::new();

		for op in ops {
			match op {
				Op::Add(v) => {
					prop_assert_eq!(graph.add(v), model_vertices.insert(v));
				}
				Op::Set(s, t, w) if s == t => {
					prop_assert!(graph.set(s, t, w).is_err());
				}
				Op::Set(s, t, w) => {
					let previous = model_edges.get(&(s, t)).copied().unwrap_or(0);
					prop_assert_eq!(graph.set(s, t, w).unwrap(), previous);
					if w > 0 {
						model_edges.insert((s, t), w);
						model_vertices.insert(s);
						model_vertices.insert(t);
					} else {
						model_edges.remove(&(s, t));
					}
				}
				Op::Remove(v) => {
					prop_assert_eq!(graph.remove(&v), model_vertices.remove(&v));
					model_edges.retain(|(s, t), _| *s != v && *t != v);
				}
			}
			check_rep(&graph)?;
		}

		prop_assert_eq!(graph.vertices(), model_vertices);
		prop_assert_eq!(graph.edge_count(), model_edges.len());
		for ((s, t), w) in model_edges {
			prop_assert_eq!(graph.weight(&s, &t), Some(w));
		}
	}

	#[test]
	fn builder_weights_sum_to_pair_count(words in prop::collection::vec("[a-d]", 0..80)) {
		let graph = CorpusGraphBuilder::from_tokens(words.clone()).unwrap();
		let total: u32 = graph.edges().iter().map(|(_, _, w)| *w).sum();
		let distinct_pairs = words.windows(2).filter(|pair| pair[0] != pair[1]).count();
		prop_assert_eq!(total as usize, distinct_pairs);
	}

	#[test]
	fn poem_keeps_input_as_subsequence(
		corpus in prop::collection::vec("[a-e]", 0..60),
		input in prop::collection::vec("[a-f]", 0..10),
	) {
		let generator = BridgeTextGenerator::new(CorpusGraphBuilder::from_tokens(corpus).unwrap());
		let output = generator.poem(&input[..]).unwrap();

		prop_assert!(output.len() <= input.len() * 2);
		prop_assert_eq!(output.first(), input.first());
		prop_assert_eq!(output.last(), input.last());
		let mut rest = output.iter();
		for word in &input {
			prop_assert!(rest.any(|w| w == word));
		}
		prop_assert_eq!(generator.poem(&input[..]).unwrap(), output);
	}
}
