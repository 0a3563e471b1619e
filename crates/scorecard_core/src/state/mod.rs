//! Scoring State Container
//!
//! `ScoringState` owns the match in play, the completed-match history and
//! the scoring rules. Callers hold it by value and drive it through `&mut`
//! methods; nothing here is global.
//!
//! Operations on an absent match are silent no-ops. They report what
//! happened through their return values so callers can tell.

use crate::engine::{apply_ball, BallEffects, ScoringConfig};
use crate::error::Result;
use crate::models::{BallEvent, Match, MatchSetup, MatchStatus};
use crate::save::{KeyValueStore, SaveManager, SavedMatch};


#[derive(Debug, Clone, Default)]
pub struct ScoringState {
    /// Match being scored, if any
    pub current_match: Option<Match>,

    /// Completed matches, oldest first
    pub match_history: Vec<Match>,

    pub config: ScoringConfig,
}

impl ScoringState {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            current_match: None,
            match_history: Vec::new(),
            config,
        }
    }

    // ========================
    // Match Lifecycle
    // ========================

    /// Start scoring `m` from the first ball: aggregates zeroed, status in progress.
    ///
    /// Replaces any match already in play.
    pub fn start_match(&mut self, mut m: Match) -> &Match {
        if let Some(previous) = &self.current_match {
            log::warn!("Starting match {} replaces match {} in play", m.id, previous.id);
        }

        m.reset_for_start();
        m.status = MatchStatus::InProgress;
        log::info!(
            "Match {} started: {} batting, {} bowling ({})",
            m.id,
            m.batting_team.name,
            m.bowling_team.name,
            m.format.code()
        );

        self.current_match.insert(m)
    }

    /// Validate a setup, build its match and start it.
    pub fn start_from_setup(&mut self, setup: MatchSetup) -> Result<&Match> {
        let m = setup.into_match()?;
        Ok(self.start_match(m))
    }

    /// Apply one delivery. `None` when no match is in play.
    pub fn record_ball(&mut self, ball: &BallEvent) -> Option<BallEffects> {
        let m = self.current_match.as_mut()?;
        Some(apply_ball(m, ball, &self.config))
    }

    /// Mark the match completed and move it to the history.
    ///
    /// Returns the completed match, or `None` when nothing was in play.
    pub fn complete_match(&mut self) -> Option<&Match> {
        let mut m = self.current_match.take()?;
        m.status = MatchStatus::Completed;
        log::info!("Match {} completed: {}", m.id, m.summary());

        self.match_history.push(m);
        self.match_history.last()
    }

    // ========================
    // Player Switching
    // ========================

    /// Replace `old_id` at the crease with `new_id`. The new id is not checked
    /// against the roster.
    ///
    /// The active partnership is rewritten too, which completes the hand-over
    /// after a wicket. Returns `false` when no match is in play or `old_id` is
    /// not one of the current batsmen.
    pub fn switch_batsman(&mut self, old_id: &str, new_id: &str) -> bool {
        let Some(m) = self.current_match.as_mut() else {
            return false;
        };
        let Some(slot) = m.current_batsmen.iter_mut().find(|id| id.as_str() == old_id) else {
            return false;
        };
        *slot = new_id.to_string();

        if let Some(stand) = m.current_partnership.as_mut() {
            stand.replace_batsman(old_id, new_id);
        }
        true
    }

    /// Hand the ball to `new_id`. Returns `false` when no match is in play.
    pub fn switch_bowler(&mut self, new_id: &str) -> bool {
        match self.current_match.as_mut() {
            Some(m) => {
                m.current_bowler = new_id.to_string();
                true
            }
            None => false,
        }
    }

    // ========================
    // Persistence
    // ========================

    /// Append a snapshot of the match in play. `None` when nothing is in play.
    pub fn save_current<S: KeyValueStore>(
        &self,
        saves: &mut SaveManager<S>,
    ) -> Result<Option<SavedMatch>> {
        match &self.current_match {
            Some(m) => Ok(Some(saves.save(m)?)),
            None => Ok(None),
        }
    }

    /// Replace the match in play with the latest snapshot of `match_id`.
    ///
    /// Returns `false` and leaves the state untouched when no snapshot exists.
    pub fn load_saved<S: KeyValueStore>(
        &mut self,
        saves: &SaveManager<S>,
        match_id: &str,
    ) -> Result<bool> {
        match saves.find(match_id)? {
            Some(saved) => {
                log::info!("Loaded match {} saved at {}", match_id, saved.saved_at);
                self.current_match = Some(saved.record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every snapshot of `match_id`. Returns how many were removed.
    pub fn delete_saved<S: KeyValueStore>(
        &self,
        saves: &mut SaveManager<S>,
        match_id: &str,
    ) -> Result<usize> {
        Ok(saves.delete(match_id)?)
    }

    pub fn list_saved<S: KeyValueStore>(&self, saves: &SaveManager<S>) -> Result<Vec<SavedMatch>> {
        Ok(saves.load_all()?.matches)
    }
}
