//! Rate arithmetic shared by teams, players, partnerships and the power play.
//!
//! Every division is guarded: a zero denominator yields `0.0` rather than
//! `NaN` or infinity, so a freshly started innings reads as `0.00`.

/// Balls in one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Fractional overs for a ball count (33 balls -> 5.5).
#[inline]
pub fn overs_from_balls(balls: u32) -> f64 {
    balls as f64 / BALLS_PER_OVER as f64
}

/// Nearest ball count for fractional overs built up in steps of 1/6.
/// Negative and non-finite values read as zero balls.
#[inline]
pub fn balls_from_overs(overs: f64) -> u32 {
    if overs.is_finite() && overs > 0.0 {
        (overs * BALLS_PER_OVER as f64).round() as u32
    } else {
        0
    }
}

/// Runs per over. `0.0` when no overs have been bowled.
#[inline]
pub fn run_rate(runs: u32, overs: f64) -> f64 {
    if overs > 0.0 {
        runs as f64 / overs
    } else {
        0.0
    }
}

/// Runs per 100 balls faced. `0.0` before the first ball.
#[inline]
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls > 0 {
        runs as f64 / balls as f64 * 100.0
    } else {
        0.0
    }
}

/// Runs conceded per over bowled. Same formula as [`run_rate`].
#[inline]
pub fn economy(runs_conceded: u32, overs: f64) -> f64 {
    run_rate(runs_conceded, overs)
}

/// Runs per over for a ball count, as shown for partnerships.
#[inline]
pub fn per_over_rate(runs: u32, balls: u32) -> f64 {
    if balls > 0 {
        runs as f64 / balls as f64 * BALLS_PER_OVER as f64
    } else {
        0.0
    }
}

/// Cricket over notation: completed overs, a dot, balls into the next over.
///
/// `format_overs(33) == "5.3"`, `format_overs(36) == "6.0"`.
pub fn format_overs(balls: u32) -> String {
    format!("{}.{}", balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
}
