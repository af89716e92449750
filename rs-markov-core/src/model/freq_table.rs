use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::Rng;

/// Observed continuations for a single context.
///
/// A `Transitions` value corresponds to one fixed kgram and stores how many
/// times each character was observed immediately after it in the training
/// text. Conceptually this is one node of the Markov chain, with outgoing
/// edges weighted by their number of observations.
///
/// # Responsibilities
/// - Accumulate continuation occurrences during construction
/// - Answer count queries (per character and total)
/// - Draw a weighted random continuation from an injected random source
/// - Merge with another `Transitions` for the same context
///
/// # Invariants
/// - Every stored occurrence count is strictly positive
/// - Iteration is sorted by character, so candidate enumeration and
///   tie-breaking downstream are deterministic
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Transitions {
	/// Occurrence count per continuation character.
	/// Example: { 'a' => 42, 'b' => 3 }
	counts: BTreeMap<char, usize>,
}

impl Transitions {
	/// Records one occurrence of `next` after this context.
	pub(crate) fn record(&mut self, next: char) {
		*self.counts.entry(next).or_insert(0) += 1;
	}

	/// Total number of observed continuations.
	pub(crate) fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Number of times `next` was observed, 0 if never.
	pub(crate) fn count(&self, next: char) -> usize {
		self.counts.get(&next).copied().unwrap_or(0)
	}

	/// Iterates over `(continuation, count)` pairs in character order.
	pub(crate) fn continuations(&self) -> impl Iterator<Item = (char, usize)> + '_ {
		self.counts.iter().map(|(next, count)| (*next, *count))
	}

	/// Draws one continuation at random, weighted by occurrence count.
	///
	/// The probability of a character is its count divided by the total.
	/// Consumes exactly one draw from `rng`, then performs a cumulative
	/// subtraction scan in character order to select the bucket.
	///
	/// Returns `None` if no continuation was ever recorded.
	pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> Option<char> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (next, count) in &self.counts {
			if r < *count {
				return Some(*next);
			}
			r -= *count;
		}

		// Unreachable: the counts sum to total, so some bucket matched.
		None
	}

	/// Merges another `Transitions` into this one by summing counts.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (next, count) in &other.counts {
			*self.counts.entry(*next).or_insert(0) += *count;
		}
	}
}

/// Frequency table mapping every observed context to its continuations.
///
/// # Responsibilities
/// - Record `(kgram, continuation)` pairs during construction
/// - Answer frequency queries, treating a missing context as a zero result
///   rather than a fault
/// - Merge partial tables by pointwise addition of counts
///
/// # Invariants
/// - An entry exists only if at least one continuation was recorded for it,
///   so every stored `Transitions` is non-empty
/// - Key length enforcement is the owner's concern; the table itself never
///   inspects kgram lengths
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FrequencyTable {
	contexts: HashMap<String, Transitions>,
}

impl FrequencyTable {
	/// Records one observation of `next` following `kgram`.
	pub(crate) fn record(&mut self, kgram: &str, next: char) {
		self.contexts.entry(kgram.to_owned()).or_default().record(next);
	}

	/// Returns the transitions recorded for `kgram`, if any.
	pub(crate) fn get(&self, kgram: &str) -> Option<&Transitions> {
		self.contexts.get(kgram)
	}

	/// Total number of observed continuations for `kgram`, 0 if unseen.
	pub(crate) fn kgram_freq(&self, kgram: &str) -> usize {
		self.get(kgram).map_or(0, Transitions::total)
	}

	/// Number of times `next` followed `kgram`, 0 if either was never seen.
	pub(crate) fn char_freq(&self, kgram: &str, next: char) -> usize {
		self.get(kgram).map_or(0, |transitions| transitions.count(next))
	}

	/// Number of distinct contexts in the table.
	pub(crate) fn len(&self) -> usize {
		self.contexts.len()
	}

	/// Merges another table into this one by pointwise addition of counts.
	///
	/// Addition is commutative and associative, so partial tables built over
	/// disjoint chunks can arrive in any order.
	pub(crate) fn merge(&mut self, other: FrequencyTable) {
		for (kgram, transitions) in other.contexts {
			match self.contexts.entry(kgram) {
				Entry::Occupied(mut entry) => entry.get_mut().merge(&transitions),
				Entry::Vacant(entry) => {
					entry.insert(transitions);
				}
			}
		}
	}
}
