//! Order-k character-level Markov model library.
//!
//! This crate builds Markov models over the characters of a training text
//! and uses them for two tasks:
//! - Stochastic generation of new text that statistically resembles the
//!   training corpus
//! - Maximum-likelihood restoration of corrupted text in which isolated
//!   characters were replaced by an unknown marker
//!
//! Models are immutable once built and queried through read-only accessors.
//! Generation consumes an explicitly injected random source so that runs
//! can be reproduced from a seed.

/// Core model, generation and restoration logic.
///
/// This module exposes the model and the high-level operations while
/// keeping the internal frequency-table representation private.
pub mod model;

/// Typed errors shared by construction, queries, generation and restoration.
pub mod error;
