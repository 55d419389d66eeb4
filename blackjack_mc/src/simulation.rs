pub mod card_source;
pub mod fixed_strategy;
pub mod hand;

use crate::{Outcome, Situation};

use self::{
    card_source::CardSource,
    fixed_strategy::{FixedStrategy, DEALER_STRATEGY, PLAYER_STRATEGY},
    hand::Hand,
};

static FACE_VALUE_TO_BLACKJACK_VALUE: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 10, 10];

/// What one game leaves behind: the situations the player went through, in
/// order, and how the game ended.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    pub outcome: Outcome,
    pub situations: Vec<Situation>,
}

impl EpisodeRecord {
    /// Return credited to each situation. The reward only arrives at the end,
    /// so the situation at step `t` of `k` receives `discount^(k-1-t) * reward`.
    pub fn returns(&self, discount_factor: f64) -> impl Iterator<Item = (Situation, f64)> + '_ {
        let reward = self.outcome.reward() as f64;
        let last = self.situations.len().saturating_sub(1);
        self.situations
            .iter()
            .enumerate()
            .map(move |(step, situation)| {
                if discount_factor == 1.0 {
                    (*situation, reward)
                } else {
                    let exponent = (last - step) as i32;
                    (*situation, discount_factor.powi(exponent) * reward)
                }
            })
    }
}

/// Plays one game of blackjack with fixed strategies for both sides.
///
/// Differences from a casino table:
/// 1. Cards are drawn with replacement, there is no shoe.
/// 2. The dealer draws alongside the player: after every player hit the dealer
///    takes a card too if she is below 17. She finishes her hand once the
///    player sticks or busts.
/// 3. No splitting, doubling, insurance or surrender.
#[derive(Debug, Clone, Copy)]
pub struct Episode {
    player_strategy: FixedStrategy,
    dealer_strategy: FixedStrategy,
}

impl Default for Episode {
    fn default() -> Self {
        Self {
            player_strategy: PLAYER_STRATEGY,
            dealer_strategy: DEALER_STRATEGY,
        }
    }
}

impl Episode {
    pub fn new() -> Self {
        Default::default()
    }

    /// Deals dealer, dealer, player, player and plays the game out.
    pub fn play<S: CardSource + ?Sized>(&self, source: &mut S) -> EpisodeRecord {
        let (d1, d2) = (source.draw(), source.draw());
        let (p1, p2) = (source.draw(), source.draw());
        let mut dealer_hand = Hand::new(d1, d2);
        let mut player_hand = Hand::new(p1, p2);
        let dealer_up_card = dealer_hand.up_card();

        let mut situations = vec![Situation::observe(&player_hand, dealer_up_card)];

        if player_hand.is_natural() {
            let outcome = if dealer_hand.is_natural() {
                Outcome::Draw
            } else {
                Outcome::Win
            };
            return EpisodeRecord {
                outcome,
                situations,
            };
        }

        while self.player_strategy.should_hit(&player_hand) {
            player_hand.add(source.draw());
            situations.push(Situation::observe(&player_hand, dealer_up_card));

            if self.dealer_strategy.should_hit(&dealer_hand) {
                dealer_hand.add(source.draw());
            }
        }

        while self.dealer_strategy.should_hit(&dealer_hand) {
            dealer_hand.add(source.draw());
        }

        EpisodeRecord {
            outcome: Outcome::resolve(player_hand.total(), dealer_hand.total()),
            situations,
        }
    }
}
