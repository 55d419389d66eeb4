use serde::Serialize;

use crate::simulation::EpisodeRecord;
use crate::statearray::SituationArray;
use crate::Situation;

/// Running sums for one situation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Accumulator {
    pub visits: u64,
    pub total_return: f64,
}

impl Accumulator {
    /// Average return, or None for a situation that was never visited.
    pub fn value(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(self.total_return / self.visits as f64)
        }
    }
}

/// Visit counts and cumulative returns per situation. Values are only
/// computed on request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    accumulators: SituationArray<Accumulator>,
    episodes: u64,
}

impl ValueTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn record(&mut self, situation: &Situation, episode_return: f64) {
        let accumulator = &mut self.accumulators[situation];
        accumulator.visits += 1;
        accumulator.total_return += episode_return;
    }

    /// Credits every situation of an episode once.
    ///
    /// A situation never repeats within a record: hard totals only grow, soft
    /// totals only grow, and a hand that turns hard never turns soft again. So
    /// each situation in a record is already its first visit.
    pub fn record_episode(&mut self, episode: &EpisodeRecord, discount_factor: f64) {
        for (situation, episode_return) in episode.returns(discount_factor) {
            self.record(&situation, episode_return);
        }
        self.episodes += 1;
    }

    /// Adds another table's sums into this one.
    pub fn merge(&mut self, other: ValueTable) {
        let mut entries: Vec<(Situation, Accumulator)> = other.accumulators.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (situation, accumulator) in entries {
            let mine = &mut self.accumulators[&situation];
            mine.visits += accumulator.visits;
            mine.total_return += accumulator.total_return;
        }
        self.episodes += other.episodes;
    }

    pub fn value(&self, situation: &Situation) -> Option<f64> {
        self.accumulators
            .get(situation)
            .and_then(|accumulator| accumulator.value())
    }

    pub fn visit_count(&self, situation: &Situation) -> u64 {
        self.accumulators
            .get(situation)
            .map_or(0, |accumulator| accumulator.visits)
    }

    /// Number of episodes folded into this table.
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Number of situations with at least one visit.
    pub fn len(&self) -> usize {
        self.accumulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulators.is_empty()
    }

    /// All estimated values, ordered by situation.
    pub fn iter_values(&self) -> Vec<(Situation, f64)> {
        let mut values: Vec<(Situation, f64)> = self
            .accumulators
            .iter()
            .filter_map(|(situation, accumulator)| {
                accumulator.value().map(|value| (*situation, value))
            })
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    #[test]
    fn empty_table_has_no_values() {
        let table = ValueTable::new();
        assert!(table.is_empty());
        assert_eq!(table.value(&Situation::new(20, 10, false)), None);
        assert_eq!(table.visit_count(&Situation::new(20, 10, false)), 0);
        assert!(table.iter_values().is_empty());
    }

    #[test]
    fn averages_returns() {
        let mut table = ValueTable::new();
        let situation = Situation::new(14, 6, false);
        table.record(&situation, 1.0);
        table.record(&situation, -1.0);
        table.record(&situation, -1.0);
        table.record(&situation, 0.0);
        assert_eq!(table.visit_count(&situation), 4);
        assert_eq!(table.value(&situation), Some(-0.25));
        assert_eq!(Accumulator::default().value(), None);
    }

    #[test]
    fn every_situation_gets_the_terminal_reward() {
        let mut table = ValueTable::new();
        let record = EpisodeRecord {
            outcome: Outcome::Win,
            situations: vec![Situation::new(13, 2, false), Situation::new(20, 2, false)],
        };
        table.record_episode(&record, 1.0);
        assert_eq!(table.episodes(), 1);
        assert_eq!(table.value(&Situation::new(13, 2, false)), Some(1.0));
        assert_eq!(table.value(&Situation::new(20, 2, false)), Some(1.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn merge_sums_counts() {
        let shared = Situation::new(17, 9, true);
        let only_right = Situation::new(12, 1, false);
        let mut left = ValueTable::new();
        left.record(&shared, 1.0);
        let mut right = ValueTable::new();
        right.record(&shared, -1.0);
        right.record(&shared, -1.0);
        right.record(&only_right, 0.0);
        left.merge(right);
        assert_eq!(left.visit_count(&shared), 3);
        assert_eq!(left.value(&shared), Some(-1.0 / 3.0));
        assert_eq!(left.value(&only_right), Some(0.0));
        assert_eq!(
            left.iter_values().iter().map(|(s, _)| *s).collect::<Vec<_>>(),
            vec![only_right, shared]
        );
    }
}
