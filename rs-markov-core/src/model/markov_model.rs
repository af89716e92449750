use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use crate::error::{Error, Result};
use super::freq_table::{FrequencyTable, Transitions};

/// Represents an order-k Markov model built from a training text.
///
/// The model records, for every kgram (context of exactly `order`
/// characters) occurring in the text, how many times each character was
/// observed immediately after it. The text is treated as circular, so every
/// character of the training text starts a context exactly once and the
/// counts of all contexts add up to the length of the text.
///
/// # Responsibilities
/// - Build the frequency table from a training text, sequentially or in
///   parallel over chunks
/// - Answer read-only frequency queries (`kgram_freq`, `char_freq`)
/// - Combine with another model of the same order
///
/// # Invariants
/// - `order` is always >= 1
/// - Every context key has exactly `order` characters
/// - A context is present only if at least one continuation was observed
///
/// A built model is never mutated: generation and restoration borrow it
/// immutably, so it can be shared across threads without locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkovModel {
	/// The order of the model (number of characters in a context).
	order: usize,

	/// Mapping from each observed context to its continuation counts.
	table: FrequencyTable,
}

impl MarkovModel {
	/// Creates a Markov model of the given order from a training text.
	///
	/// The text is treated as circular: its first `order` characters are
	/// conceptually appended to its end, so the final characters of the text
	/// form contexts too. Without the wrap the tail would never be a context
	/// and generation near it would be inconsistent.
	///
	/// # Errors
	/// - `InvalidOrder` if `order` is 0.
	/// - `TextTooShort` if the text has fewer than `order` characters.
	pub fn new(text: &str, order: usize) -> Result<Self> {
		let chars = circular_chars(text, order)?;
		let positions = chars.len() - order;

		let mut table = FrequencyTable::default();
		for i in 0..positions {
			// Context and the character observed right after it
			let kgram: String = chars[i..i + order].iter().collect();
			table.record(&kgram, chars[i + order]);
		}

		Ok(Self { order, table })
	}

	/// Creates a Markov model by splitting the work across CPU cores.
	///
	/// Produces a model equal to `new(text, order)`.
	///
	/// # Behavior
	/// - The circular working sequence is computed once and shared, so the
	///   wrap boundary is never duplicated between chunks.
	/// - The offset range is split into one chunk per core; each thread
	///   builds a partial frequency table for its chunk.
	/// - Partials are collected over an MPSC channel and merged by pointwise
	///   addition, which is commutative, so arrival order does not matter.
	///
	/// # Errors
	/// Same as `new`.
	pub fn parallel(text: &str, order: usize) -> Result<Self> {
		let chars = Arc::new(circular_chars(text, order)?);
		let positions = chars.len() - order;

		let workers = num_cpus::get();
		let chunk_size = (positions + workers - 1) / workers;

		let (tx, rx) = mpsc::channel();
		for chunk_start in (0..positions).step_by(chunk_size) {
			let tx = tx.clone();
			let chars = Arc::clone(&chars);
			let chunk_end = (chunk_start + chunk_size).min(positions);

			thread::spawn(move || {
				let mut partial = FrequencyTable::default();
				for i in chunk_start..chunk_end {
					let kgram: String = chars[i..i + order].iter().collect();
					partial.record(&kgram, chars[i + order]);
				}
				tx.send(partial).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut table = FrequencyTable::default();
		for partial in rx.iter() {
			table.merge(partial);
		}

		Ok(Self { order, table })
	}

	/// Returns the order k of the model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the number of occurrences of `kgram` as a context.
	///
	/// A well-formed kgram that never occurred in the training text is a
	/// valid query with result 0, not an error.
	///
	/// # Errors
	/// `KgramLength` if `kgram` is not exactly `order` characters long.
	pub fn kgram_freq(&self, kgram: &str) -> Result<usize> {
		self.check_kgram(kgram)?;
		Ok(self.table.kgram_freq(kgram))
	}

	/// Returns the number of times `next` immediately followed `kgram`.
	///
	/// Returns 0 if the context was never observed, or was observed but
	/// never followed by `next`.
	///
	/// # Errors
	/// `KgramLength` if `kgram` is not exactly `order` characters long.
	pub fn char_freq(&self, kgram: &str, next: char) -> Result<usize> {
		self.check_kgram(kgram)?;
		Ok(self.table.char_freq(kgram, next))
	}

	/// Returns the number of distinct contexts observed in the training text.
	pub fn context_count(&self) -> usize {
		self.table.len()
	}

	/// Combines two models of the same order into one.
	///
	/// Counts are added pointwise, so the result is the model that would
	/// have been obtained by training on both texts independently (each text
	/// keeps its own circular wrap). Both operands are consumed; the
	/// combined model is as immutable as a freshly built one.
	///
	/// # Errors
	/// `OrderMismatch` if the orders differ.
	pub fn merge(mut self, other: Self) -> Result<Self> {
		if self.order != other.order {
			return Err(Error::OrderMismatch { left: self.order, right: other.order });
		}
		self.table.merge(other.table);
		Ok(self)
	}

	/// Validates that `kgram` has exactly `order` characters.
	pub(crate) fn check_kgram(&self, kgram: &str) -> Result<()> {
		if kgram.chars().count() != self.order {
			return Err(Error::KgramLength { kgram: kgram.to_owned(), order: self.order });
		}
		Ok(())
	}

	/// Transitions recorded for `kgram`, if it was ever a context.
	pub(crate) fn transitions(&self, kgram: &str) -> Option<&Transitions> {
		self.table.get(kgram)
	}

	/// Read access to the underlying frequency table.
	pub(crate) fn table(&self) -> &FrequencyTable {
		&self.table
	}
}

/// Builds the circular working sequence: the text followed by its own first
/// `order` characters.
///
/// # Errors
/// - `InvalidOrder` if `order` is 0.
/// - `TextTooShort` if the text has fewer than `order` characters.
fn circular_chars(text: &str, order: usize) -> Result<Vec<char>> {
	if order == 0 {
		return Err(Error::InvalidOrder);
	}

	let mut chars: Vec<char> = text.chars().collect();
	if chars.len() < order {
		return Err(Error::TextTooShort { length: chars.len(), order });
	}

	let wrap: Vec<char> = chars[..order].to_vec();
	chars.extend(wrap);
	Ok(chars)
}
