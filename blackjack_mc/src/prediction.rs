pub mod value_table;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, info_span, trace};

use self::value_table::ValueTable;
use crate::simulation::card_source::{CardSource, RandomCardSource};
use crate::simulation::Episode;

pub const DEFAULT_NUMBER_OF_EPISODES: u64 = 50_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    #[error("discount factor must be in (0, 1], got {0}")]
    InvalidDiscountFactor(f64),
    #[error("cannot start estimation worker {worker}: {reason}")]
    SpawnFailed { worker: usize, reason: String },
    #[error("estimation worker {0} panicked")]
    WorkerPanicked(usize),
}

/// First-visit Monte-Carlo prediction of the fixed player strategy, undiscounted.
///
/// Plays `number_of_episodes` games drawing from `source` and averages the final
/// reward over every situation visited. Zero episodes give an empty table.
pub fn first_visit_mc_prediction<S: CardSource + ?Sized>(
    source: &mut S,
    number_of_episodes: u64,
) -> ValueTable {
    run_episodes(source, number_of_episodes, 1.0)
}

fn run_episodes<S: CardSource + ?Sized>(
    source: &mut S,
    number_of_episodes: u64,
    discount_factor: f64,
) -> ValueTable {
    let episode = Episode::new();
    let mut table = ValueTable::new();
    for _ in 0..number_of_episodes {
        let record = episode.play(source);
        trace!(
            outcome = %record.outcome,
            situations = record.situations.len(),
            "episode finished"
        );
        table.record_episode(&record, discount_factor);
    }
    table
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    pub number_of_episodes: u64,
    /// 0 means one thread per available core. Never more threads than episodes
    /// are started.
    pub number_of_threads: usize,
    /// None seeds from the operating system.
    pub seed: Option<u64>,
    pub discount_factor: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            number_of_episodes: DEFAULT_NUMBER_OF_EPISODES,
            number_of_threads: 1,
            seed: None,
            discount_factor: 1.0,
        }
    }
}

/// Runs the prediction on several threads. Each worker owns its own random
/// source and partial table; the partial tables are summed after all workers
/// are joined.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    number_of_threads: usize,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Result<Self, EstimationError> {
        let discount_factor = config.discount_factor;
        if !(discount_factor > 0.0 && discount_factor <= 1.0) {
            return Err(EstimationError::InvalidDiscountFactor(discount_factor));
        }

        let number_of_threads = {
            if config.number_of_threads == 0 {
                let parallelism = std::thread::available_parallelism();
                match parallelism {
                    Ok(n) => n.get(),
                    Err(_) => 1,
                }
            } else {
                config.number_of_threads
            }
        };
        let busy_threads =
            usize::try_from(config.number_of_episodes.max(1)).unwrap_or(usize::MAX);
        let number_of_threads = number_of_threads.min(busy_threads);
        Ok(Estimator {
            config,
            number_of_threads,
        })
    }

    pub fn number_of_threads(&self) -> usize {
        self.number_of_threads
    }

    pub fn estimate(&self) -> Result<ValueTable, EstimationError> {
        let number_of_episodes = self.config.number_of_episodes;
        let discount_factor = self.config.discount_factor;
        let number_of_threads = self.number_of_threads;

        let span = info_span!(
            "estimate",
            episodes = number_of_episodes,
            threads = number_of_threads
        );
        let _guard = span.enter();
        info!(seed = ?self.config.seed, "starting first-visit prediction");

        let mut master_rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut dispatched: Vec<(u64, u64)> = Vec::with_capacity(number_of_threads);
        for worker in 0..number_of_threads as u64 {
            let share = number_of_episodes / number_of_threads as u64
                + u64::from(worker < number_of_episodes % number_of_threads as u64);
            dispatched.push((share, master_rng.gen()));
        }

        let mut threads = Vec::with_capacity(number_of_threads - 1);
        for (worker, &(share, seed)) in dispatched.iter().enumerate().skip(1) {
            let thread = std::thread::Builder::new()
                .name(format!("estimate-{}", worker))
                .spawn(move || {
                    let mut source = RandomCardSource::new(seed);
                    let table = run_episodes(&mut source, share, discount_factor);
                    debug!(worker, episodes = share, "worker finished");
                    table
                })
                .map_err(|err| EstimationError::SpawnFailed {
                    worker,
                    reason: err.to_string(),
                })?;
            threads.push((worker, thread));
        }

        let (share, seed) = dispatched[0];
        let mut source = RandomCardSource::new(seed);
        let mut table = run_episodes(&mut source, share, discount_factor);
        debug!(worker = 0, episodes = share, "worker finished");

        for (worker, thread) in threads {
            let partial = thread
                .join()
                .map_err(|_| EstimationError::WorkerPanicked(worker))?;
            table.merge(partial);
        }

        info!(
            episodes = table.episodes(),
            situations = table.len(),
            "prediction finished"
        );
        Ok(table)
    }
}
