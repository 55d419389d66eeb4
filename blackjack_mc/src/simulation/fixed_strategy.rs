use super::hand::Hand;

/// Hit below a threshold, stick on it or above. Never changes during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStrategy {
    pub stands_on: u16,
}

/// The player sticks on 20 or 21.
pub const PLAYER_STRATEGY: FixedStrategy = FixedStrategy { stands_on: 20 };

/// The dealer sticks on 17 or greater, soft 17 included.
pub const DEALER_STRATEGY: FixedStrategy = FixedStrategy { stands_on: 17 };

impl FixedStrategy {
    pub fn should_hit(&self, hand: &Hand) -> bool {
        hand.total() < self.stands_on
    }
}
