use crate::error::{PoetError, Result};

/// Options controlling how a corpus is folded into a graph.
///
/// # Responsibilities
/// - Select case folding of corpus tokens (and of the generator lookups)
/// - Enable the multithreaded build and size its chunks
///
/// # Invariants
/// - `chunk_factor` is always >= 1
#[derive(Clone, Debug, PartialEq)]
pub struct BuildOptions {
	/// Lowercase every token before it becomes a label.
	pub lowercase: bool,

	/// Fold the corpus on several threads, then merge the partial graphs.
	pub parallel: bool,

	/// Number of chunks per CPU when `parallel` is set.
	chunk_factor: usize,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self {
			lowercase: true,
			parallel: false,
			chunk_factor: 8,
		}
	}
}

impl BuildOptions {
	/// Returns the number of chunks per CPU.
	pub fn chunk_factor(&self) -> usize {
		self.chunk_factor
	}

	/// Sets the number of chunks per CPU.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `chunk_factor` is 0.
	pub fn set_chunk_factor(&mut self, chunk_factor: usize) -> Result<()> {
		if chunk_factor == 0 {
			return Err(PoetError::invalid("chunk factor must be >= 1"));
		}
		self.chunk_factor = chunk_factor;
		Ok(())
	}

	/// Total number of chunks a parallel build splits the corpus into.
	pub(crate) fn chunk_count(&self) -> usize {
		num_cpus::get().max(1).saturating_mul(self.chunk_factor)
	}
}
