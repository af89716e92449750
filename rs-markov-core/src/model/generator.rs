use std::collections::VecDeque;

use rand::Rng;

use crate::error::{Error, Result};
use super::markov_model::MarkovModel;

/// Stochastic text generator walking a `MarkovModel`.
///
/// The generator borrows an immutable model and owns the random source used
/// for sampling. The source is injected rather than taken from global state,
/// so callers control reproducibility: a seeded `StdRng` replays the exact
/// same trajectory, while `rand::rng()` gives a fresh one per run.
///
/// # Responsibilities
/// - Draw single weighted continuations (`rand`)
/// - Simulate whole trajectories of a target length (`generate`)
///
/// # Notes
/// - The model itself is never mutated; several generators may borrow the
///   same model concurrently, each with its own random source.
pub struct Generator<'a, R: Rng> {
	model: &'a MarkovModel,
	rng: R,
}

impl<'a, R: Rng> Generator<'a, R> {
	/// Creates a generator over `model` driven by `rng`.
	pub fn new(model: &'a MarkovModel, rng: R) -> Self {
		Self { model, rng }
	}

	/// Returns a random character following `kgram`.
	///
	/// The character is drawn from the observed continuations of `kgram`,
	/// each weighted by its occurrence count. Exactly one draw is consumed
	/// from the random source per call, so call order alone determines the
	/// trajectory for a fixed seed.
	///
	/// # Errors
	/// - `KgramLength` if `kgram` is not exactly `order` characters long.
	/// - `UnknownKgram` if `kgram` never occurred in the training text.
	pub fn rand(&mut self, kgram: &str) -> Result<char> {
		self.model.check_kgram(kgram)?;

		let transitions = self
			.model
			.transitions(kgram)
			.ok_or_else(|| Error::UnknownKgram(kgram.to_owned()))?;

		// A recorded context always has at least one continuation; the
		// fallback is kept so sampling never panics.
		transitions
			.sample(&mut self.rng)
			.ok_or_else(|| Error::UnknownKgram(kgram.to_owned()))
	}

	/// Generates a string of exactly `length` characters starting with `kgram`.
	///
	/// Simulates a trajectory through the Markov chain: each step samples a
	/// continuation for the trailing `order`-character suffix of the text
	/// built so far and appends it, until the target length is reached.
	/// With `length == order` the result is `kgram` itself and no draw is
	/// consumed.
	///
	/// # Errors
	/// - `KgramLength` if `kgram` is not exactly `order` characters long.
	/// - `TargetTooShort` if `length` is below the model order.
	/// - `UnknownKgram` if the walk reaches a context that was never
	///   observed (cannot happen when the model was built from one circular
	///   text, but can after merging disjoint corpora).
	pub fn generate(&mut self, kgram: &str, length: usize) -> Result<String> {
		self.model.check_kgram(kgram)?;

		let order = self.model.order();
		if length < order {
			return Err(Error::TargetTooShort { target: length, order });
		}

		let mut text: Vec<char> = kgram.chars().collect();
		let mut window: VecDeque<char> = text.iter().copied().collect();

		while text.len() < length {
			// Sample on the trailing suffix, then slide the window
			let context: String = window.iter().collect();
			let next = self.rand(&context)?;
			text.push(next);
			window.pop_front();
			window.push_back(next);
		}

		Ok(text.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn rand_only_returns_observed_continuations() {
		let model = MarkovModel::new("aaab", 2).unwrap();
		let mut generator = Generator::new(&model, StdRng::seed_from_u64(11));

		for _ in 0..200 {
			let next = generator.rand("aa").unwrap();
			assert!(model.char_freq("aa", next).unwrap() > 0);
		}
	}

	#[test]
	fn rand_rejects_wrong_length() {
		let model = MarkovModel::new("aaab", 2).unwrap();
		let mut generator = Generator::new(&model, StdRng::seed_from_u64(0));

		assert_eq!(
			generator.rand("a"),
			Err(Error::KgramLength { kgram: "a".to_owned(), order: 2 })
		);
	}

	#[test]
	fn rand_rejects_unknown_context() {
		let model = MarkovModel::new("aaab", 2).unwrap();
		let mut generator = Generator::new(&model, StdRng::seed_from_u64(0));

		assert_eq!(generator.rand("zz"), Err(Error::UnknownKgram("zz".to_owned())));
	}

	#[test]
	fn single_continuation_chain_is_fully_determined() {
		// Every context of "abab" has exactly one continuation
		let model = MarkovModel::new("abab", 2).unwrap();

		for seed in [0, 1, 42] {
			let mut generator = Generator::new(&model, StdRng::seed_from_u64(seed));
			assert_eq!(generator.generate("ab", 6).unwrap(), "ababab");
		}
	}

	#[test]
	fn generate_has_exact_length_and_prefix() {
		let model = MarkovModel::new("aaab", 2).unwrap();
		let mut generator = Generator::new(&model, StdRng::seed_from_u64(3));

		let text = generator.generate("aa", 24).unwrap();
		assert_eq!(text.chars().count(), 24);
		assert!(text.starts_with("aa"));
	}

	#[test]
	fn generate_at_order_length_returns_the_kgram() {
		let model = MarkovModel::new("aaab", 2).unwrap();
		let mut generator = Generator::new(&model, StdRng::seed_from_u64(3));

		assert_eq!(generator.generate("ba", 2).unwrap(), "ba");
	}

	#[test]
	fn generate_rejects_target_below_order() {
		let model = MarkovModel::new("aaab", 2).unwrap();
		let mut generator = Generator::new(&model, StdRng::seed_from_u64(3));

		assert_eq!(
			generator.generate("aa", 1),
			Err(Error::TargetTooShort { target: 1, order: 2 })
		);
	}

	#[test]
	fn same_seed_replays_the_same_trajectory() {
		let model = MarkovModel::new("aaab", 2).unwrap();

		let mut first = Generator::new(&model, StdRng::seed_from_u64(99));
		let mut second = Generator::new(&model, StdRng::seed_from_u64(99));

		assert_eq!(
			first.generate("aa", 32).unwrap(),
			second.generate("aa", 32).unwrap()
		);
	}
}
