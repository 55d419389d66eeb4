use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{AceSlice, Situation, ValueTable};

pub const PLAYER_TOTALS: RangeInclusive<u16> = 12..=21;
pub const DEALER_UP_CARDS: RangeInclusive<u8> = 1..=10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfacePoint {
    pub dealer_up_card: u8,
    pub player_total: u16,
    /// None if the situation was never visited.
    pub value: Option<f64>,
}

/// One usable-ace slice of a value table on the player-total by dealer-up-card
/// grid, ready for plotting. Points are ordered by player total, then by dealer
/// up card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    ace_slice: AceSlice,
    points: Vec<SurfacePoint>,
}

impl Surface {
    pub fn from_table(table: &ValueTable, ace_slice: AceSlice) -> Self {
        let mut points = Vec::with_capacity(PLAYER_TOTALS.len() * DEALER_UP_CARDS.len());
        for player_total in PLAYER_TOTALS {
            for dealer_up_card in DEALER_UP_CARDS {
                let situation =
                    Situation::new(player_total, dealer_up_card, ace_slice.usable_ace());
                points.push(SurfacePoint {
                    dealer_up_card,
                    player_total,
                    value: table.value(&situation),
                });
            }
        }
        Surface { ace_slice, points }
    }

    pub fn ace_slice(&self) -> AceSlice {
        self.ace_slice
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    pub fn value_at(&self, player_total: u16, dealer_up_card: u8) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.player_total == player_total && p.dealer_up_card == dealer_up_card)
            .and_then(|p| p.value)
    }

    /// Copy with every value limited to [-1, 1].
    pub fn clamped(&self) -> Surface {
        let points = self
            .points
            .iter()
            .map(|p| SurfacePoint {
                value: p.value.map(|v| v.clamp(-1.0, 1.0)),
                ..*p
            })
            .collect();
        Surface {
            ace_slice: self.ace_slice,
            points,
        }
    }
}

/// Axis label of a dealer up card, with the ace shown as "A".
pub fn dealer_label(dealer_up_card: u8) -> String {
    match dealer_up_card {
        1 => String::from("A"),
        n => n.to_string(),
    }
}
