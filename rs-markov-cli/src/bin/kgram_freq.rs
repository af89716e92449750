use std::env;
use std::io::Read;

use rs_markov_core::model::markov_model::MarkovModel;

/// A single frequency query read from standard input.
#[derive(Debug, PartialEq, Eq)]
enum Query {
	/// Total number of continuations of a context.
	Context(String),
	/// Occurrences of one continuation after a context.
	Continuation(String, char),
}

/// Answers frequency queries against a model of the given text.
///
/// Usage: `kgram_freq <text> <order>` with whitespace-separated
/// `(kgram, continuation)` token pairs on stdin. Prints one
/// `freq(...) = n` line per query.
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let args: Vec<String> = env::args().collect();
	if args.len() != 3 {
		return Err(format!("usage: {} <text> <order>", args[0]).into());
	}

	let text = &args[1];
	let order: usize = args[2].parse()?;

	let model = MarkovModel::new(text, order)?;
	log::debug!("built an order-{} model with {} contexts", model.order(), model.context_count());

	let mut input = String::new();
	std::io::stdin().read_to_string(&mut input)?;

	for query in parse_queries(&input)? {
		match query {
			Query::Context(kgram) => {
				println!("freq({}) = {}", kgram, model.kgram_freq(&kgram)?);
			}
			Query::Continuation(kgram, next) => {
				println!("freq({}, {}) = {}", kgram, next, model.char_freq(&kgram, next)?);
			}
		}
	}

	Ok(())
}

/// Parses whitespace-separated `(kgram, continuation)` token pairs.
///
/// A `-` inside a token stands for a space, since whitespace splits tokens.
/// A continuation token denoting a space queries the context alone.
fn parse_queries(input: &str) -> Result<Vec<Query>, Box<dyn std::error::Error>> {
	let mut queries = Vec::new();
	let mut tokens = input.split_whitespace();

	while let Some(kgram_token) = tokens.next() {
		let next_token = tokens
			.next()
			.ok_or("queries come as kgram/continuation token pairs")?;

		let kgram = kgram_token.replace('-', " ");
		let next = next_token.replace('-', " ");

		if next == " " {
			queries.push(Query::Context(kgram));
		} else {
			let mut chars = next.chars();
			match (chars.next(), chars.next()) {
				(Some(c), None) => queries.push(Query::Continuation(kgram, c)),
				_ => {
					return Err(
						format!("continuation `{next_token}` must be a single character").into()
					);
				}
			}
		}
	}

	Ok(queries)
}
