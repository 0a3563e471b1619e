//! Ball-by-ball scoring reducer.
//!
//! [`apply_ball`] folds one [`BallEvent`] into a [`Match`]. Every delivery
//! counts as one ball toward the over, wides and no-balls included.
//!
//! Unknown batsman or bowler ids are not errors: team totals, the
//! partnership and the power play are still updated, the player-level step is
//! skipped, and the skip is reported in [`BallEffects`].
//!
//! ## Wicket precondition
//! After a wicket the new partnership is opened for the pair currently in
//! `current_batsmen`, which still names the dismissed batsman. The caller must
//! follow a wicket with [`crate::state::ScoringState::switch_batsman`], which
//! also rewrites the id inside the fresh partnership.

use tracing::{debug, trace};

use super::config::ScoringConfig;
use super::rates::BALLS_PER_OVER;
use crate::models::{BallEvent, Delivery, LastBall, Match, Partnership};

/// What a single ball did to the match, beyond the team totals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BallEffects {
    /// The batsman id resolved in the batting roster
    pub batsman_found: bool,
    /// The bowler id resolved in the bowling roster
    pub bowler_found: bool,
    /// A maiden was credited to the bowler on this ball
    pub maiden: bool,
    /// The ball fell inside the power-play window
    pub in_power_play: bool,
    /// Partnership closed by a wicket on this ball
    pub closed_partnership: Option<Partnership>,
    /// A new partnership was opened by a wicket on this ball
    pub opened_partnership: bool,
}

/// Apply one delivery to `m`.
pub fn apply_ball(m: &mut Match, ball: &BallEvent, config: &ScoringConfig) -> BallEffects {
    let mut effects = BallEffects::default();
    let total = ball.total_runs();

    // 1. team totals
    m.batting_team.record_ball(total, ball.wicket);
    m.bowling_team.record_ball(total, ball.wicket);

    // 2. batsman
    if let Some(batsman) = m.batting_team.find_player_mut(&ball.batsman_id) {
        batsman.batting.record_ball(ball.runs);
        effects.batsman_found = true;
    } else {
        debug!(batsman_id = %ball.batsman_id, "batsman not in batting roster, figures skipped");
    }

    // 3. bowler
    if let Some(bowler) = m.bowling_team.find_player_mut(&ball.bowler_id) {
        let delivery = Delivery {
            runs: ball.runs,
            extras: ball.extras,
            wicket: ball.wicket,
            is_wide: ball.is_wide,
            is_no_ball: ball.is_no_ball,
        };
        effects.maiden = bowler.bowling.record_delivery(delivery, config.maiden_rule);
        effects.bowler_found = true;
    } else {
        debug!(bowler_id = %ball.bowler_id, "bowler not in bowling roster, figures skipped");
    }

    // 4. partnership (runs off the bat only)
    if let Some(stand) = m.current_partnership.as_mut() {
        stand.runs = stand.runs.saturating_add(ball.runs);
        stand.balls = stand.balls.saturating_add(1);
    }

    // 5. power play, judged on the post-ball count
    if let Some(window) = config.power_play.overs_for(m.format) {
        if m.batting_team.balls <= window.saturating_mul(BALLS_PER_OVER) {
            m.power_play.record_ball(total, ball.wicket);
            effects.in_power_play = true;
        }
    }

    // 6. wicket closes the stand and opens the next one
    if ball.wicket {
        let overs = m.batting_team.overs;
        if let Some(mut stand) = m.current_partnership.take() {
            stand.end_over = Some(overs);
            m.partnerships.push(stand.clone());
            effects.closed_partnership = Some(stand);
        }
        m.current_partnership = Some(Partnership::open(&m.current_batsmen, overs));
        effects.opened_partnership = true;
        debug!(
            wickets = m.batting_team.wickets,
            overs,
            partnerships = m.partnerships.len(),
            "wicket, partnership reopened"
        );
    }

    // 7. scoreboard
    m.last_ball = LastBall::from(ball);

    trace!(
        match_id = %m.id,
        runs = ball.runs,
        extras = ball.extras,
        wicket = ball.wicket,
        total = m.batting_team.total_runs,
        balls = m.batting_team.balls,
        "ball applied"
    );

    effects
}
