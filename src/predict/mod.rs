pub mod elo;
pub mod series;

use serde::Serialize;

use crate::error::{PredictError, Result};

pub use elo::{win_probability, Home, DEFAULT_HOME_BONUS};
pub use series::{games_needed, series_win_probability, DEFAULT_BEST_OF};

/// Single-game and series probabilities for both sides of a matchup.
///
/// Only side A is ever computed; B's numbers are the complements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matchup {
    pub p_game_a: f64,
    pub p_game_b: f64,
    pub p_series_a: f64,
    pub p_series_b: f64,
    pub best_of: i64,
    pub games_needed: u32,
}

impl Matchup {
    /// Extend a per-game probability for side A, from any source, to a series.
    pub fn from_game_probability(p_game_a: f64, best_of: i64) -> Result<Self> {
        let p_series_a = series_win_probability(p_game_a, best_of)?;
        Ok(Matchup {
            p_game_a,
            p_game_b: 1.0 - p_game_a,
            p_series_a,
            p_series_b: 1.0 - p_series_a,
            best_of,
            games_needed: games_needed(best_of)?,
        })
    }

    /// Rating path: Elo single-game probability extended to the series.
    pub fn from_ratings(
        rating_a: f64,
        rating_b: f64,
        home_bonus: f64,
        home: Home,
        best_of: i64,
    ) -> Result<Self> {
        if !rating_a.is_finite() || !rating_b.is_finite() || !home_bonus.is_finite() {
            return Err(PredictError::invalid_argument(
                "ratings and home bonus must be finite numbers",
            ));
        }
        let p_game = win_probability(rating_a, rating_b, home_bonus, home);
        Self::from_game_probability(p_game, best_of)
    }
}
