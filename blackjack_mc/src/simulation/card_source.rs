use super::FACE_VALUE_TO_BLACKJACK_VALUE;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that deals blackjack values (1 stands for A, 10 stands for 10 and J, Q, K).
pub trait CardSource {
    /// Must return a value in [1, 10]. `Episode::play` panics on anything else.
    fn draw(&mut self) -> u8;
}

/// An infinite deck: every card is drawn uniformly from a fresh 52-card deck,
/// i.e. with replacement.
#[derive(Debug, Clone)]
pub struct RandomCardSource {
    rng: StdRng,
}

impl RandomCardSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CardSource for RandomCardSource {
    fn draw(&mut self) -> u8 {
        let face_value: u8 = self.rng.gen_range(1..=13);
        FACE_VALUE_TO_BLACKJACK_VALUE[(face_value - 1) as usize]
    }
}

/// Replays a fixed sequence of blackjack values, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedCardSource {
    ranks: Vec<u8>,
    current_index: usize,
    draws: usize,
}

impl ScriptedCardSource {
    /// Panics if the sequence is empty or contains a value outside [1, 10].
    pub fn new(ranks: Vec<u8>) -> Self {
        if ranks.is_empty() {
            panic!("A scripted card source needs at least one card");
        }
        if ranks.iter().any(|&rank| rank == 0 || rank > 10) {
            panic!("Invalid card! It must be in [1, 10]");
        }
        Self {
            ranks,
            current_index: 0,
            draws: 0,
        }
    }

    /// Number of cards dealt so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl CardSource for ScriptedCardSource {
    fn draw(&mut self) -> u8 {
        let rank = self.ranks[self.current_index];
        self.current_index = (self.current_index + 1) % self.ranks.len();
        self.draws += 1;
        rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_cards() {
        let mut a = RandomCardSource::new(7);
        let mut b = RandomCardSource::new(7);
        let xs: Vec<u8> = (0..100).map(|_| a.draw()).collect();
        let ys: Vec<u8> = (0..100).map(|_| b.draw()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn rank_frequencies_follow_one_deck() {
        let mut source = RandomCardSource::new(2024);
        let draws = 130_000;
        let mut counts = [0u32; 11];
        for _ in 0..draws {
            let rank = source.draw();
            assert!((1..=10).contains(&rank));
            counts[rank as usize] += 1;
        }
        for rank in 1..=9 {
            let p = counts[rank] as f64 / draws as f64;
            assert!((p - 1.0 / 13.0).abs() < 0.005, "rank {} has p = {}", rank, p);
        }
        let p_ten = counts[10] as f64 / draws as f64;
        assert!((p_ten - 4.0 / 13.0).abs() < 0.008, "ten-valued p = {}", p_ten);
    }

    #[test]
    fn scripted_source_cycles() {
        let mut source = ScriptedCardSource::new(vec![1, 5, 10]);
        let dealt: Vec<u8> = (0..7).map(|_| source.draw()).collect();
        assert_eq!(dealt, vec![1, 5, 10, 1, 5, 10, 1]);
        assert_eq!(source.draws(), 7);
    }

    #[test]
    #[should_panic]
    fn invalid_scripted_card_should_panic() {
        ScriptedCardSource::new(vec![3, 11]);
    }

    #[test]
    #[should_panic]
    fn empty_script_should_panic() {
        ScriptedCardSource::new(Vec::new());
    }
}
