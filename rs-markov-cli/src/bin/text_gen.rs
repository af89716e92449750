use std::env;
use std::io::Read;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_markov_core::model::generator::Generator;
use rs_markov_core::model::markov_model::MarkovModel;

/// Generates text resembling the corpus read from standard input.
///
/// Usage: `text_gen <order> <length> [seed]` with the training text on
/// stdin. The first `order` characters of the corpus start the trajectory.
/// Passing a seed replays the exact same output; without one the generator
/// is seeded from the OS.
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let args: Vec<String> = env::args().collect();
	if args.len() < 3 || args.len() > 4 {
		return Err(format!("usage: {} <order> <length> [seed]", args[0]).into());
	}

	let order: usize = args[1].parse()?;
	let length: usize = args[2].parse()?;
	let rng = match args.get(3) {
		Some(seed) => StdRng::seed_from_u64(seed.parse()?),
		None => StdRng::from_os_rng(),
	};

	let mut text = String::new();
	std::io::stdin().read_to_string(&mut text)?;
	let text = text.trim_end_matches(['\n', '\r']);

	let model = MarkovModel::parallel(text, order)?;
	log::debug!("built an order-{} model with {} contexts", model.order(), model.context_count());

	let kgram: String = text.chars().take(order).collect();
	let mut generator = Generator::new(&model, rng);
	println!("{}", generator.generate(&kgram, length)?);

	Ok(())
}
