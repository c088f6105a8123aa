/// Errors raised by the graph, the corpus builder and the bridge generator.
///
/// A call returning an error has not mutated anything.
#[derive(Debug, thiserror::Error)]
pub enum PoetError {
	#[error("invalid argument: {reason}")]
	InvalidArgument { reason: String },

	#[error("corpus i/o failed: {0}")]
	Io(#[from] std::io::Error),

	#[error("merge failed: {reason}")]
	Merge { reason: String },
}

impl PoetError {
	pub(crate) fn invalid(reason: impl Into<String>) -> Self {
		Self::InvalidArgument { reason: reason.into() }
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PoetError>;
