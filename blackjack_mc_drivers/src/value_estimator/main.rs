mod presentation;

use anyhow::{bail, Context, Result};
use blackjack_mc::{Estimator, EstimatorConfig, Surface};
use blackjack_mc_drivers::{parse_config_from_file, Config};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_mc.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of episodes to simulate
    #[arg(short, long)]
    episodes: Option<u64>,

    /// Number of worker threads, 0 for one per core
    #[arg(short, long)]
    threads: Option<usize>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Which slice to render: Usable or NoUsable
    #[arg(long)]
    ace_slice: Option<String>,

    /// Also write the surface as JSON to this path
    #[arg(long)]
    json_output: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &str) -> Result<Config> {
    if path != DEFAULT_CONFIG_PATH {
        return Ok(parse_config_from_file(path)?);
    }

    let home_dir = home::home_dir().context("Cannot find home directory")?;
    let config_file_path = home_dir.join(".blackjack_mc.yml");
    if !config_file_path.exists() {
        warn!("no config file found, using defaults");
        return Ok(Config::default());
    }
    if config_file_path.is_dir() {
        bail!("This should be a path rather than a directory");
    }
    let config_file_path = config_file_path
        .to_str()
        .context("config path is not valid UTF-8")?;
    Ok(parse_config_from_file(config_file_path)?)
}

fn apply_overrides(config: &mut Config, args: CommandLineArgs) {
    if let Some(episodes) = args.episodes {
        config.estimation.number_of_episodes = episodes;
    }
    if let Some(threads) = args.threads {
        config.estimation.number_of_threads = threads;
    }
    if args.seed.is_some() {
        config.estimation.seed = args.seed;
    }
    if let Some(ace_slice) = args.ace_slice {
        config.presentation.ace_slice = ace_slice;
    }
    if args.json_output.is_some() {
        config.presentation.json_output = args.json_output;
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args = CommandLineArgs::parse();
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, args);

    let ace_slice = config.presentation.get_ace_slice()?;
    let estimator_config: EstimatorConfig = config.estimation.clone().try_into()?;
    let estimator = Estimator::new(estimator_config)?;
    info!(
        episodes = estimator_config.number_of_episodes,
        threads = estimator.number_of_threads(),
        "running estimator"
    );

    let table = estimator.estimate()?;
    let surface = Surface::from_table(&table, ace_slice);
    print!("{}", presentation::SurfaceTable::new(&surface, table.episodes()));

    if let Some(path) = &config.presentation.json_output {
        presentation::write_surface_json(&surface, path)?;
        info!(path = %path, "surface written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CommandLineArgs::parse_from([
            "value_estimator",
            "--episodes",
            "1200",
            "--seed",
            "9",
            "--ace-slice",
            "NoUsable",
        ]);
        assert_eq!(args.config, DEFAULT_CONFIG_PATH);
        let mut config = Config::default();
        apply_overrides(&mut config, args);
        assert_eq!(config.estimation.number_of_episodes, 1200);
        assert_eq!(config.estimation.seed, Some(9));
        assert_eq!(config.estimation.number_of_threads, 0);
        assert_eq!(config.presentation.ace_slice, "NoUsable");
        assert!(config.presentation.json_output.is_none());
    }

    #[test]
    fn zero_episodes_are_rejected() {
        let args = CommandLineArgs::parse_from(["value_estimator", "-e", "0"]);
        let mut config = Config::default();
        apply_overrides(&mut config, args);
        let converted: Result<EstimatorConfig, _> = config.estimation.try_into();
        assert!(converted.is_err());
    }
}
