use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use yahtzee_console::{new_game, play_game, ConsoleOperator, Recorder};

#[derive(Parser)]
struct Args {
    /// Number of players, between 1 and 6. Asked for when omitted
    #[arg(short, long, allow_negative_numbers = true)]
    players: Option<i64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record the game's events as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path, Some(seed))?)
    } else {
        None
    };

    let mut operator = ConsoleOperator::new(std::io::stdin().lock(), std::io::stdout().lock());
    // The game does not start with an invalid number of players
    let mut game = new_game(args.players, &mut operator)?;

    play_game(&mut game, &mut rng, &mut operator, &mut recorder)?;
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout belongs to the game
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
