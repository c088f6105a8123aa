//! Weighted directed graph and bridge-word text generation.
//!
//! This crate provides:
//! - A generic, label-addressed, weighted directed graph
//! - A corpus builder folding word adjacencies into edge weights
//! - A generator inserting "bridge words" between the words of a phrase
//!
//! Corpus reading and tokenizing helpers stay internal so that every graph
//! is built the same way.

/// Weighted directed graph keyed by a generic label.
///
/// Owns all vertex and edge state; every query returns an owned snapshot.
pub mod graph;

/// Corpus folding and bridge-word generation over a `WeightedDirectedGraph<String>`.
pub mod poet;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (corpus loading, tokenizing, file listing).
///
/// Only the listing helper is re-exported for the server.
pub(crate) mod io;

pub use error::{PoetError, Result};
pub use graph::weighted_graph::{Weight, WeightedDirectedGraph};
pub use io::list_files;
pub use poet::build_options::BuildOptions;
pub use poet::builder::CorpusGraphBuilder;
pub use poet::generator::BridgeTextGenerator;
