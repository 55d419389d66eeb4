pub mod prediction;
pub mod simulation;
mod statearray;
pub mod surface;

use serde::Serialize;
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::{Display, EnumIter};

pub use prediction::{
    first_visit_mc_prediction, value_table::Accumulator, value_table::ValueTable,
    EstimationError, Estimator, EstimatorConfig, DEFAULT_NUMBER_OF_EPISODES,
};
pub use simulation::{
    card_source::{CardSource, RandomCardSource, ScriptedCardSource},
    hand::Hand,
    Episode, EpisodeRecord,
};
pub use statearray::SituationArray;
pub use surface::{dealer_label, Surface, SurfacePoint, DEALER_UP_CARDS, PLAYER_TOTALS};

/// What the player can see at a decision point: own total, dealer's up card
/// and whether an ace in the player's hand is currently counted as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Situation {
    pub player_total: u16,
    pub dealer_up_card: u8,
    pub usable_ace: bool,
}

impl Situation {
    pub fn new(player_total: u16, dealer_up_card: u8, usable_ace: bool) -> Self {
        if dealer_up_card == 0 || dealer_up_card > 10 {
            panic!("Invalid dealer up card! It must be in [1, 10]")
        }
        Situation {
            player_total,
            dealer_up_card,
            usable_ace,
        }
    }

    /// Takes a snapshot of the player's hand against the given dealer up card.
    pub fn observe(player_hand: &Hand, dealer_up_card: u8) -> Self {
        Self::new(
            player_hand.total(),
            dealer_up_card,
            player_hand.has_usable_ace(),
        )
    }
}

impl std::fmt::Display for Situation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "current sum: {}, dealer's showing card: {}, usable ace: {}",
            self.player_total, self.dealer_up_card, self.usable_ace as u8
        )
    }
}

/// Terminal result of an episode from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Outcome {
    #[strum(serialize = "win")]
    Win,
    #[strum(serialize = "lose")]
    Lose,
    #[strum(serialize = "draw")]
    Draw,
}

impl Outcome {
    pub fn reward(&self) -> i8 {
        match self {
            Outcome::Win => 1,
            Outcome::Lose => -1,
            Outcome::Draw => 0,
        }
    }

    /// Settles a finished game. A busted player loses even if the dealer busts too.
    pub fn resolve(player_total: u16, dealer_total: u16) -> Self {
        if player_total > 21 {
            Outcome::Lose
        } else if dealer_total > 21 {
            Outcome::Win
        } else if player_total < dealer_total {
            Outcome::Lose
        } else if player_total > dealer_total {
            Outcome::Win
        } else {
            Outcome::Draw
        }
    }
}

/// Which usable-ace slice of the value table a surface is cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum AceSlice {
    Usable,
    NoUsable,
}

impl Default for AceSlice {
    fn default() -> Self {
        AceSlice::Usable
    }
}

impl AceSlice {
    pub fn usable_ace(&self) -> bool {
        *self == AceSlice::Usable
    }
}
