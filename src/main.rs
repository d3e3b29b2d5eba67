use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;

mod table;

#[derive(Parser)]
#[command(name = "pontoon", about = "A single round of blackjack against the house dealer")]
struct Cli {
    /// Seed for the deal RNG, for a reproducible round
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = table::play_round(&mut rng, stdin.lock(), stdout.lock()) {
        log::error!("Round aborted: {e}");
        std::process::exit(1);
    }
}
