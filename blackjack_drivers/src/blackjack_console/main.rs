mod console;

use blackjack_advisor::Estimator;
use blackjack_drivers::{
    load_default_config, parse_config_from_file, Config, ConfigError, ConfigOverrides,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use self::console::ConsoleSession;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_advisor.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Monte Carlo trials per stand-now estimate
    #[arg(short, long)]
    trials: Option<u32>,

    /// Worker threads for the estimator, 0 for one per core
    #[arg(long)]
    threads: Option<usize>,

    /// Seed for a reproducible session
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Error, Debug)]
enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] blackjack_advisor::Error),
}

fn load_config(args: &CommandLineArgs) -> Result<Config, ConfigError> {
    let config = if args.config == DEFAULT_CONFIG_PATH {
        load_default_config()?
    } else {
        parse_config_from_file(&args.config)?
    };
    Ok(config.with_overrides(&ConfigOverrides {
        trials: args.trials,
        number_of_threads: args.threads,
        seed: args.seed,
    }))
}

fn run(args: &CommandLineArgs) -> Result<(), SessionError> {
    let config = load_config(args)?;
    log::debug!("{:#?}", config);

    let mut rng = match config.advisor.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let estimator: Estimator = config
        .advisor
        .try_into()
        .map_err(ConfigError::Invalid)?;
    log::info!(
        "estimating with {} trials on {} thread(s)",
        estimator.trials(),
        estimator.number_of_threads()
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = ConsoleSession::new(stdin.lock(), stdout.lock(), estimator);
    session.run(&mut rng)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CommandLineArgs::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("Error: {e}");
    }
}
