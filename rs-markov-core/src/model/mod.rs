//! Top-level module for the order-k Markov text system.
//!
//! This module provides an order-k character-level Markov model and the
//! operations built on top of it:
//! - Immutable model construction from a training text (`MarkovModel`)
//! - Read-only frequency queries
//! - Stochastic text generation with an injected random source (`Generator`)
//! - Maximum-likelihood restoration of corrupted text (`restore`)

/// Immutable order-k Markov model.
///
/// Handles circular construction from a training text (sequential and
/// parallel), frequency queries, and pointwise model merging.
pub mod markov_model;

/// Stochastic text generation over a built model.
///
/// Exposes weighted single-character sampling and whole-trajectory
/// generation, driven by an explicit, seedable random source.
pub mod generator;

/// Maximum-likelihood restoration of corrupted text.
///
/// Replaces unknown-marker characters with the candidates that maximize a
/// bounded sliding-window likelihood.
pub mod restore;

/// Internal frequency table: context to continuation counts.
///
/// Tracks observations per context and supports weighted random sampling
/// and pointwise merging. This module is not exposed publicly.
mod freq_table;
