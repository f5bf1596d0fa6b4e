//! Elo-style single-game win probability.
//!
//! Ratings sit on the usual logistic scale: a 400-point edge is 10:1 odds.
//! Home advantage is modelled as a flat rating bonus handed to whichever
//! side is hosting before the two ratings are compared.

use serde::{Deserialize, Deserializer, Serialize};

/// Rating points added to the home side.
pub const DEFAULT_HOME_BONUS: f64 = 65.0;

/// Rating difference that corresponds to a tenfold odds ratio.
pub const ELO_SCALE: f64 = 400.0;

/// Which side, if any, hosts the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Home {
    #[default]
    #[serde(rename = "A", alias = "a")]
    A,
    #[serde(rename = "B", alias = "b")]
    B,
    /// Neutral venue, no bonus applied
    #[serde(rename = "none", alias = "None", alias = "neutral")]
    Neutral,
}

/// Deserialize a home flag where an explicit `null` means a neutral venue.
///
/// Pair with `#[serde(default)]` so a missing field still falls back to
/// [`Home::A`].
pub fn deserialize_home<'de, D>(deserializer: D) -> Result<Home, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Home>::deserialize(deserializer)?.unwrap_or(Home::Neutral))
}

/// Probability that side A wins a single game.
///
/// # Arguments
/// * `rating_a` / `rating_b` – Elo ratings of the two sides.
/// * `home_bonus` – Rating points granted to the home side.
/// * `home` – Which side receives `home_bonus`.
pub fn win_probability(rating_a: f64, rating_b: f64, home_bonus: f64, home: Home) -> f64 {
    let (adjusted_a, adjusted_b) = match home {
        Home::A => (rating_a + home_bonus, rating_b),
        Home::B => (rating_a, rating_b + home_bonus),
        Home::Neutral => (rating_a, rating_b),
    };
    let diff = (adjusted_a - adjusted_b) / ELO_SCALE;
    1.0 / (1.0 + 10f64.powf(-diff))
}
