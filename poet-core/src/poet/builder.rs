use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::build_options::BuildOptions;
use crate::error::{PoetError, Result};
use crate::graph::weighted_graph::WeightedDirectedGraph;
use crate::io::{read_file, tokenize};

/// Folds a flat token sequence into a `WeightedDirectedGraph<String>`.
///
/// Every adjacent pair `(previous, current)` increments the weight of the
/// edge `previous -> current` by one. Adjacency spans line boundaries: the
/// corpus is one token sequence.
///
/// A token equal to its predecessor (`"very very"`) still becomes a vertex,
/// but the pair adds no edge since the graph has no self-loops.
#[derive(Debug, Default)]
pub struct CorpusGraphBuilder {
	graph: WeightedDirectedGraph<String>,
	previous: Option<String>,
}

impl CorpusGraphBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Folds one token into the graph.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the token is empty or if the edge weight
	/// would overflow. Nothing is recorded in that case.
	pub fn push<S: Into<String>>(&mut self, token: S) -> Result<()> {
		let token = token.into();
		if token.is_empty() {
			return Err(PoetError::invalid("empty token"));
		}

		match self.previous.take() {
			Some(previous) if previous != token => {
				let weight = self.graph.weight(&previous, &token).unwrap_or(0);
				let Some(weight) = weight.checked_add(1) else {
					self.previous = Some(previous);
					return Err(PoetError::invalid("edge weight overflow"));
				};
				self.graph.set(previous, token.clone(), weight)?;
			}
			_ => {
				self.graph.add(token.clone());
			}
		}

		self.previous = Some(token);
		Ok(())
	}

	/// Returns the folded graph.
	pub fn finish(self) -> WeightedDirectedGraph<String> {
		self.graph
	}

	/// Builds a graph from already normalized tokens.
	///
	/// # Errors
	/// Returns `InvalidArgument` on an empty token.
	pub fn from_tokens<I, S>(tokens: I) -> Result<WeightedDirectedGraph<String>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut builder = Self::new();
		for token in tokens {
			builder.push(token)?;
		}
		Ok(builder.finish())
	}

	/// Tokenizes lines of text and builds a graph from them.
	///
	/// Runs the multithreaded build when `options.parallel` is set; the
	/// resulting graph is the same either way.
	pub fn from_lines<I, S>(lines: I, options: &BuildOptions) -> Result<WeightedDirectedGraph<String>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut tokens = Vec::new();
		for line in lines {
			tokens.extend(tokenize(line.as_ref(), options.lowercase));
		}

		let graph = if options.parallel {
			Self::build_parallel(tokens, options.chunk_count())?
		} else {
			Self::from_tokens(tokens)?
		};

		info!(
			"corpus folded: {} vertices, {} edges",
			graph.vertex_count(),
			graph.edge_count()
		);
		Ok(graph)
	}

	/// Reads a corpus file and builds a graph from its lines.
	///
	/// # Errors
	/// Returns `Io` if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(filepath: P, options: &BuildOptions) -> Result<WeightedDirectedGraph<String>> {
		let lines = read_file(&filepath)?;
		debug!("read {} lines from {}", lines.len(), filepath.as_ref().display());
		Self::from_lines(lines, options)
	}

	/// Splits the token sequence into chunks, folds each chunk on its own
	/// thread, and merges the partial graphs.
	///
	/// Chunks overlap by one token so that every adjacent pair belongs to
	/// exactly one chunk: a chunk covering pairs `start..end` receives the
	/// tokens `start..=end`.
	fn build_parallel(tokens: Vec<String>, chunks: usize) -> Result<WeightedDirectedGraph<String>> {
		if tokens.len() < 2 || chunks < 2 {
			return Self::from_tokens(tokens);
		}

		let pairs = tokens.len() - 1;
		// More chunks than pairs would only spawn empty threads
		let chunks = chunks.min(pairs);
		let chunk_size = pairs.div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut spawned = 0;
		for start in (0..pairs).step_by(chunk_size) {
			let end = (start + chunk_size).min(pairs);
			let tx = tx.clone();
			let chunk: Vec<String> = tokens[start..=end].to_vec();

			thread::spawn(move || {
				// The receiver outlives every sender
				let _ = tx.send(Self::from_tokens(chunk));
			});
			spawned += 1;
		}
		drop(tx);

		let mut final_graph = WeightedDirectedGraph::new();
		let mut received = 0;
		for partial_graph in rx.iter() {
			final_graph.merge(&partial_graph?)?;
			received += 1;
		}

		if received != spawned {
			return Err(PoetError::Merge {
				reason: format!("{} of {} chunks were lost", spawned - received, spawned),
			});
		}

		debug!("parallel build merged {} chunks of {} pairs", spawned, chunk_size);
		Ok(final_graph)
	}
}
