use std::path::Path;

use log::trace;

use super::build_options::BuildOptions;
use super::builder::CorpusGraphBuilder;
use crate::error::{PoetError, Result};
use crate::graph::weighted_graph::WeightedDirectedGraph;
use crate::io::tokenize;

/// Inserts "bridge words" between the words of a phrase.
///
/// For every adjacent pair `(w1, w2)` of the input, a bridge is a vertex `b`
/// such that both `w1 -> b` and `b -> w2` exist in the graph. When several
/// bridges exist, the one with the greatest `weight(w1 -> b) + weight(b -> w2)`
/// wins; equal sums are broken by the lexicographically smallest label.
///
/// # Responsibilities
/// - Own the graph built from a corpus
/// - Compare input words to labels case-insensitively (when case folding is on)
/// - Produce the bridged token sequence, keeping the input words as given
///
/// Generation keeps no state between calls.
#[derive(Clone, Debug)]
pub struct BridgeTextGenerator {
	graph: WeightedDirectedGraph<String>,
	case_folding: bool,
}

impl BridgeTextGenerator {
	/// Creates a generator over a graph whose labels are lowercase.
	pub fn new(graph: WeightedDirectedGraph<String>) -> Self {
		Self { graph, case_folding: true }
	}

	/// Sets whether input words are lowercased before lookup.
	///
	/// Must match the case folding used to build the graph.
	pub fn with_case_folding(mut self, case_folding: bool) -> Self {
		self.case_folding = case_folding;
		self
	}

	/// Builds the graph from a corpus file.
	///
	/// # Errors
	/// Returns `Io` if the corpus cannot be read.
	pub fn from_file<P: AsRef<Path>>(filepath: P, options: &BuildOptions) -> Result<Self> {
		let graph = CorpusGraphBuilder::from_file(filepath, options)?;
		Ok(Self::new(graph).with_case_folding(options.lowercase))
	}

	/// Read-only access to the underlying graph.
	pub fn graph(&self) -> &WeightedDirectedGraph<String> {
		&self.graph
	}

	/// Finds the best bridge between two words, if any.
	pub fn bridge(&self, w1: &str, w2: &str) -> Option<String> {
		let w1 = self.lookup_key(w1);
		let w2 = self.lookup_key(w2);

		let mut best: Option<(&String, u64)> = None;
		for (candidate, first) in self.graph.outgoing(w1.as_str()) {
			let Some(second) = self.graph.weight(candidate.as_str(), w2.as_str()) else {
				continue;
			};
			// Summed as u64: two u32 weights cannot overflow it
			let sum = u64::from(first) + u64::from(second);
			let better = match best {
				None => true,
				Some((label, best_sum)) => sum > best_sum || (sum == best_sum && candidate < label),
			};
			if better {
				best = Some((candidate, sum));
			}
		}

		trace!("bridge {:?} -> {:?}: {:?}", w1, w2, best);
		best.map(|(label, _)| label.clone())
	}

	/// Returns the input tokens with a bridge spliced into every gap that has one.
	///
	/// Inputs of 0 or 1 token are returned unchanged.
	///
	/// # Errors
	/// Returns `InvalidArgument` if a token is empty.
	pub fn poem<S: AsRef<str>>(&self, input: &[S]) -> Result<Vec<String>> {
		if input.iter().any(|token| token.as_ref().is_empty()) {
			return Err(PoetError::invalid("empty token in input"));
		}

		let mut output = Vec::with_capacity(input.len() * 2);
		for (i, token) in input.iter().enumerate() {
			if i > 0 {
				if let Some(bridge) = self.bridge(input[i - 1].as_ref(), token.as_ref()) {
					output.push(bridge);
				}
			}
			output.push(token.as_ref().to_owned());
		}
		Ok(output)
	}

	/// Tokenizes a line on whitespace, bridges it, and joins it back with
	/// single spaces.
	///
	/// # Errors
	/// Same as `poem`; the whitespace tokenizer never yields empty tokens.
	pub fn poem_line(&self, line: &str) -> Result<String> {
		let tokens: Vec<String> = tokenize(line, false).collect();
		self.poem(&tokens[..]).map(|output| output.join(" "))
	}

	fn lookup_key(&self, word: &str) -> String {
		if self.case_folding {
			word.to_lowercase()
		} else {
			word.to_owned()
		}
	}
}
