use std::fmt;
use std::fs;

use anyhow::{Context, Result};
use blackjack_mc::{dealer_label, AceSlice, Surface, DEALER_UP_CARDS, PLAYER_TOTALS};

/// The surface as a table: dealer up cards across, player totals down with 21
/// on top. Values are clamped to [-1, 1]; unvisited cells show "-".
pub struct SurfaceTable {
    surface: Surface,
    episodes: u64,
}

impl SurfaceTable {
    pub fn new(surface: &Surface, episodes: u64) -> Self {
        Self {
            surface: surface.clamped(),
            episodes,
        }
    }
}

impl fmt::Display for SurfaceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slice = match self.surface.ace_slice() {
            AceSlice::Usable => "usable ace",
            AceSlice::NoUsable => "no usable ace",
        };
        writeln!(f, "State values ({}) after {} episodes", slice, self.episodes)?;

        write!(f, "{:>6}", "")?;
        for dealer_up_card in DEALER_UP_CARDS {
            write!(f, " {:>7}", dealer_label(dealer_up_card))?;
        }
        writeln!(f)?;

        for player_total in PLAYER_TOTALS.rev() {
            write!(f, "{:>6}", player_total)?;
            for dealer_up_card in DEALER_UP_CARDS {
                match self.surface.value_at(player_total, dealer_up_card) {
                    Some(value) => write!(f, " {:>7.3}", value)?,
                    None => write!(f, " {:>7}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Writes the clamped surface points as pretty JSON.
pub fn write_surface_json(surface: &Surface, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(&surface.clamped())
        .context("failed to serialize surface")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path))?;
    Ok(())
}
