use std::env;
use std::io::Read;

use rs_markov_core::model::markov_model::MarkovModel;
use rs_markov_core::model::restore::{DEFAULT_MARKER, replace_unknown};

/// Restores a corrupted string against a model trained on standard input.
///
/// Usage: `fix_corrupted <order> <corrupted> [marker]` with the training
/// text on stdin. Prints the restored string followed by a single newline.
/// Any failure is reported and the process exits non-zero without partial
/// output.
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let args: Vec<String> = env::args().collect();
	if args.len() < 3 || args.len() > 4 {
		return Err(format!("usage: {} <order> <corrupted> [marker]", args[0]).into());
	}

	let order: usize = args[1].parse()?;
	let corrupted = &args[2];
	let marker = match args.get(3) {
		Some(arg) => parse_marker(arg)?,
		None => DEFAULT_MARKER,
	};

	// Strip trailing line endings so they never enter the training alphabet
	let mut text = String::new();
	std::io::stdin().read_to_string(&mut text)?;
	let text = text.trim_end_matches(['\n', '\r']);

	// The marker must stay out of the training alphabet
	if text.contains(marker) {
		return Err(format!("marker `{marker}` occurs in the training text").into());
	}

	let model = MarkovModel::parallel(text, order)?;
	log::debug!(
		"built an order-{} model with {} contexts from {} characters",
		model.order(),
		model.context_count(),
		text.chars().count()
	);

	let restored = replace_unknown(&model, corrupted, marker)?;
	println!("{restored}");

	Ok(())
}

/// Reads the marker argument, which must be exactly one character.
fn parse_marker(arg: &str) -> Result<char, Box<dyn std::error::Error>> {
	let mut chars = arg.chars();
	match (chars.next(), chars.next()) {
		(Some(marker), None) => Ok(marker),
		_ => Err(format!("marker `{arg}` must be a single character").into()),
	}
}
