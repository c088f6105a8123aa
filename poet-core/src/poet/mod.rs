//! Corpus-driven bridge-word generation.
//!
//! - Corpus folding into a weighted word graph (`CorpusGraphBuilder`)
//! - Build configuration (`BuildOptions`)
//! - Bridge-word insertion over the built graph (`BridgeTextGenerator`)

/// Folds word adjacencies of a corpus into edge weights.
///
/// Supports token, line and file inputs, and a multithreaded build
/// merging partial graphs.
pub mod builder;

/// Options for corpus folding (case folding, parallelism).
pub mod build_options;

/// Bridge-word search and phrase generation.
///
/// Deterministic: the same graph and input always give the same output.
pub mod generator;
