//! Best-of-N series win probability.
//!
//! A series is treated as `best_of` independent games with a fixed per-game
//! win probability. Winning the series is the same event as winning at least
//! `best_of / 2 + 1` of those games: games left unplayed once the series is
//! decided cannot change who reached the threshold first. So the answer is
//! the upper tail of a binomial distribution, not a game-by-game simulation.

use crate::error::{PredictError, Result};

/// Series length used when a caller does not specify one.
pub const DEFAULT_BEST_OF: i64 = 7;

/// Longest series accepted; keeps every call to a bounded number of terms.
pub const MAX_BEST_OF: i64 = 100_001;

/// Wins required to take a best-of-`best_of` series.
pub fn games_needed(best_of: i64) -> Result<u32> {
    let n = validate_best_of(best_of)?;
    Ok(n / 2 + 1)
}

/// Probability that side A wins the series.
///
/// `p_game` is A's probability of winning any single game and must lie in
/// `[0, 1]`. `best_of` must be a positive odd integer no larger than
/// [`MAX_BEST_OF`].
pub fn series_win_probability(p_game: f64, best_of: i64) -> Result<f64> {
    let n = validate_best_of(best_of)?;
    if !p_game.is_finite() || !(0.0..=1.0).contains(&p_game) {
        return Err(PredictError::invalid_argument(format!(
            "game probability must be within [0, 1], got {}",
            p_game
        )));
    }

    // With an odd length, A's series win is B's series loss, so only the
    // tail for the side with p <= 0.5 is ever summed. That tail is the
    // small one and keeps its relative precision.
    if p_game == 0.5 {
        return Ok(0.5);
    }
    if p_game > 0.5 {
        return Ok(1.0 - majority_tail(1.0 - p_game, n));
    }
    Ok(majority_tail(p_game, n))
}

fn validate_best_of(best_of: i64) -> Result<u32> {
    if best_of <= 0 || best_of % 2 == 0 {
        return Err(PredictError::invalid_argument(format!(
            "series length must be a positive odd integer, got {}",
            best_of
        )));
    }
    if best_of > MAX_BEST_OF {
        return Err(PredictError::invalid_argument(format!(
            "series length {} exceeds the maximum of {}",
            best_of, MAX_BEST_OF
        )));
    }
    // Bounded by MAX_BEST_OF above.
    Ok(best_of as u32)
}

/// P(X >= n/2 + 1) for X ~ Binomial(n, p), with `p <= 0.5`.
///
/// Terms are carried as logarithms and advanced with the pmf recurrence
/// `t(k+1) = t(k) * (n-k)/(k+1) * p/q`, so nothing overflows and the cost
/// is linear in `n`.
fn majority_tail(p: f64, n: u32) -> f64 {
    if p == 0.0 {
        return 0.0;
    }
    let need = n / 2 + 1;
    let ln_p = p.ln();
    let ln_q = (-p).ln_1p();
    let ln_odds = ln_p - ln_q;

    let mut ln_term = ln_binomial(n, need) + f64::from(need) * ln_p + f64::from(n - need) * ln_q;
    let mut total = 0.0;
    for k in need..=n {
        total += ln_term.exp();
        if k < n {
            ln_term += (f64::from(n - k) / f64::from(k + 1)).ln() + ln_odds;
        }
    }
    total
}

/// ln C(n, k), summed term by term.
fn ln_binomial(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (0..k)
        .map(|i| (f64::from(n - i) / f64::from(i + 1)).ln())
        .sum()
}
