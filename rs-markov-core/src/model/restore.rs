use crate::error::{Error, Result};
use super::markov_model::MarkovModel;

/// Conventional sentinel standing for a single unknown character.
pub const DEFAULT_MARKER: char = '~';

/// Replaces every marker in `corrupted` with its most probable original
/// character and returns the restored string.
///
/// Every occurrence of `marker` is treated as exactly one missing character;
/// all other characters pass through unchanged. The marker must be a
/// character that cannot occur in the training text, otherwise genuine text
/// would be indistinguishable from corruption.
///
/// # Behavior
/// Markers are resolved left to right. For a marker at position `i` with
/// model order `k`:
/// - `before` is the `k` known characters right before the marker and
///   `after` the `k` known characters right after it.
/// - The candidates are the observed continuations of `before`, in
///   character order.
/// - Each candidate `v` is scored by the likelihood of the window
///   `before + v + after`: the product of the conditional probabilities of
///   the `k + 1` overlapping kgrams sliding across the window. A sliding
///   context that was never observed, or never followed by the required
///   next character, makes the likelihood exactly 0 — no smoothing.
/// - The candidate with the highest likelihood wins; ties go to the first
///   candidate in character order.
///
/// Under an order-k Markov assumption the joint probability of a local
/// sequence factors exactly into these overlapping conditionals, so only the
/// `k` characters on each side of the marker are relevant and the window
/// never needs to grow past `2k + 1` characters.
///
/// # Errors
/// - `MarkerTooClose` if a marker has fewer than `k` known characters on
///   either side: too close to an end of the string, or to another marker.
/// - `UnresolvableMarker` if the `before` context of a marker was never
///   observed in the training text, leaving no candidates.
///
/// Any failure aborts the whole call; no partially restored string is
/// produced.
pub fn replace_unknown(model: &MarkovModel, corrupted: &str, marker: char) -> Result<String> {
	let chars: Vec<char> = corrupted.chars().collect();

	let mut restored = chars.clone();
	for position in 0..chars.len() {
		if chars[position] != marker {
			continue;
		}
		check_window(&chars, position, model.order(), marker)?;
		restored[position] = resolve(model, &chars, position)?;
	}

	Ok(restored.into_iter().collect())
}

/// Validates that the marker at `position` has `order` known characters on
/// each side.
///
/// Rejects markers whose window would run past either end of the string.
/// Windows are never wrapped or clamped to the other end. A second marker
/// inside the window is rejected the same way, which also rules out two
/// markers within `order` positions of each other.
fn check_window(chars: &[char], position: usize, order: usize, marker: char) -> Result<()> {
	if position < order || position + order >= chars.len() {
		return Err(Error::MarkerTooClose { position, order });
	}

	let before = &chars[position - order..position];
	let after = &chars[position + 1..=position + order];
	if before.contains(&marker) || after.contains(&marker) {
		return Err(Error::MarkerTooClose { position, order });
	}

	Ok(())
}

/// Selects the most probable character for the marker at `position`.
///
/// Single-pass argmax: a candidate replaces the current best only on a
/// strictly greater likelihood, so the first candidate in character order
/// wins ties — including the case where every candidate scores 0.
fn resolve(model: &MarkovModel, chars: &[char], position: usize) -> Result<char> {
	let order = model.order();

	let before: String = chars[position - order..position].iter().collect();
	let candidates = model.transitions(&before).ok_or_else(|| Error::UnresolvableMarker {
		position,
		context: before.clone(),
	})?;

	// The 2k+1 likelihood window; the middle slot is filled per candidate
	let mut window: Vec<char> = Vec::with_capacity(2 * order + 1);
	window.extend_from_slice(&chars[position - order..=position + order]);

	let mut best: Option<(char, f64)> = None;
	for (candidate, _) in candidates.continuations() {
		window[order] = candidate;
		let likelihood = window_likelihood(model, &window);

		let better = match best {
			None => true,
			Some((_, top)) => likelihood > top,
		};
		if better {
			best = Some((candidate, likelihood));
		}
	}

	// A recorded context always has at least one continuation, so a
	// candidate was examined; the fallback keeps this path panic-free.
	best.map(|(candidate, _)| candidate)
		.ok_or(Error::UnresolvableMarker { position, context: before })
}

/// Likelihood of a fully known window of `2 * order + 1` characters.
///
/// The product over the `order + 1` overlapping kgrams of the window of the
/// probability that each kgram is followed by the character right after it.
/// Short-circuits to 0 as soon as one factor has no support.
fn window_likelihood(model: &MarkovModel, window: &[char]) -> f64 {
	let order = model.order();
	let table = model.table();

	let mut likelihood = 1.0;
	for offset in 0..=order {
		let kgram: String = window[offset..offset + order].iter().collect();
		let context_freq = table.kgram_freq(&kgram);
		if context_freq == 0 {
			return 0.0;
		}

		let next_freq = table.char_freq(&kgram, window[offset + order]);
		if next_freq == 0 {
			return 0.0;
		}

		likelihood *= next_freq as f64 / context_freq as f64;
	}

	likelihood
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn restores_the_only_possible_character() {
		// Every occurrence of "abc" is followed by 'a'
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();

		let restored = replace_unknown(&model, "abc~bcabcabc", DEFAULT_MARKER).unwrap();
		assert_eq!(restored, "abcabcabcabc");
	}

	#[test]
	fn restores_several_markers_independently() {
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();

		let restored = replace_unknown(&model, "abc~bcab~abc", DEFAULT_MARKER).unwrap();
		assert_eq!(restored, "abcabcabcabc");
	}

	#[test]
	fn marker_free_input_is_returned_unchanged() {
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();

		let restored = replace_unknown(&model, "cabcab", DEFAULT_MARKER).unwrap();
		assert_eq!(restored, "cabcab");
	}

	#[test]
	fn empty_input_is_returned_unchanged() {
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();

		assert_eq!(replace_unknown(&model, "", DEFAULT_MARKER).unwrap(), "");
	}

	#[test]
	fn marker_is_configurable() {
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();

		let restored = replace_unknown(&model, "abc?bcabcabc", '?').unwrap();
		assert_eq!(restored, "abcabcabcabc");

		// With a different marker the '?' is ordinary (unseen) text
		assert!(replace_unknown(&model, "abc?bcabcabc", '~').is_ok());
	}

	#[test]
	fn zero_likelihood_candidates_are_pruned() {
		// Model of "aaab": aa -> {a, b}, ab -> {a}, ba -> {a}
		let model = MarkovModel::new("aaab", 2).unwrap();

		// Candidate 'b' dies on char_freq("ab", 'b') == 0; 'a' scores 0.25
		let restored = replace_unknown(&model, "aa~ba", '~').unwrap();
		assert_eq!(restored, "aaaba");
	}

	#[test]
	fn all_zero_likelihoods_still_pick_a_candidate() {
		let model = MarkovModel::new("aaab", 2).unwrap();

		// The only candidate after "ba" is 'a' and its window scores 0
		let restored = replace_unknown(&model, "ba~bb", '~').unwrap();
		assert_eq!(restored, "baabb");
	}

	#[test]
	fn ties_resolve_to_the_first_candidate_in_character_order() {
		// Model of "aabb": a -> {a, b}, b -> {a, b}, all counts 1
		let model = MarkovModel::new("aabb", 1).unwrap();

		// Both candidates score 0.25; 'a' sorts first
		let restored = replace_unknown(&model, "a~b", '~').unwrap();
		assert_eq!(restored, "aab");
	}

	#[test]
	fn marker_at_either_edge_is_rejected() {
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();

		assert_eq!(
			replace_unknown(&model, "~bcabcabc", '~'),
			Err(Error::MarkerTooClose { position: 0, order: 3 })
		);
		assert_eq!(
			replace_unknown(&model, "ab~abcabc", '~'),
			Err(Error::MarkerTooClose { position: 2, order: 3 })
		);
		assert_eq!(
			replace_unknown(&model, "abcabcabc~", '~'),
			Err(Error::MarkerTooClose { position: 9, order: 3 })
		);
		assert_eq!(
			replace_unknown(&model, "abcabca~bc", '~'),
			Err(Error::MarkerTooClose { position: 7, order: 3 })
		);
	}

	#[test]
	fn markers_within_one_window_are_rejected() {
		let model = MarkovModel::new("aabb", 1).unwrap();

		assert_eq!(
			replace_unknown(&model, "a~~b", '~'),
			Err(Error::MarkerTooClose { position: 1, order: 1 })
		);

		let model = MarkovModel::new("aaab", 2).unwrap();
		assert_eq!(
			replace_unknown(&model, "ab~a~aba", '~'),
			Err(Error::MarkerTooClose { position: 2, order: 2 })
		);
	}

	#[test]
	fn unseen_before_context_is_unresolvable() {
		let model = MarkovModel::new("aaab", 2).unwrap();

		assert_eq!(
			replace_unknown(&model, "bb~aa", '~'),
			Err(Error::UnresolvableMarker { position: 2, context: "bb".to_owned() })
		);
	}

	#[test]
	fn known_characters_are_never_altered() {
		let model = MarkovModel::new("abcabcabcabc", 3).unwrap();
		let corrupted = "bcabca~cabca";

		let restored = replace_unknown(&model, corrupted, '~').unwrap();
		assert_eq!(restored.chars().count(), corrupted.chars().count());
		for (original, fixed) in corrupted.chars().zip(restored.chars()) {
			if original != '~' {
				assert_eq!(original, fixed);
			}
		}
	}
}
