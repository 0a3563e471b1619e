//! Scorebook
//!
//! File-backed scoring sessions for the `scorecard` command. Each command
//! loads the latest snapshot of a match, applies one operation through
//! [`ScoringState`], and writes the match back as its only snapshot in one
//! store write.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use scorecard_core::engine::rates::format_overs;
use scorecard_core::{
    BallEffects, BallEvent, FileStore, Match, MatchSetup, MatchStatus, SaveManager, SavedMatch,
    ScoringConfig, ScoringState,
};

/// Delivery as typed on the command line. Missing ids default to the
/// striker and the bowler in play.
#[derive(Debug, Clone, Default)]
pub struct BallInput {
    pub runs: u32,
    pub extras: u32,
    pub wicket: bool,
    pub wide: bool,
    pub no_ball: bool,
    pub batsman: Option<String>,
    pub bowler: Option<String>,
}

impl BallInput {
    fn into_event(self, m: &Match) -> BallEvent {
        BallEvent {
            runs: self.runs,
            wicket: self.wicket,
            extras: self.extras,
            batsman_id: self.batsman.unwrap_or_else(|| m.current_batsmen[0].clone()),
            bowler_id: self.bowler.unwrap_or_else(|| m.current_bowler.clone()),
            is_wide: self.wide,
            is_no_ball: self.no_ball,
        }
    }
}

pub struct Scorebook {
    saves: SaveManager<FileStore>,
    config: ScoringConfig,
}

impl Scorebook {
    pub fn open(dir: &Path, config: ScoringConfig) -> Self {
        Self {
            saves: SaveManager::new(FileStore::new(dir)),
            config,
        }
    }

    /// Start a match from a setup file and store its first snapshot.
    pub fn create(&mut self, setup_path: &Path) -> Result<Match> {
        let text = fs::read_to_string(setup_path)
            .with_context(|| format!("Failed to read setup file: {}", setup_path.display()))?;
        let setup: MatchSetup =
            serde_json::from_str(&text).context("Failed to parse match setup JSON")?;

        let mut state = ScoringState::new(self.config.clone());
        let m = state.start_from_setup(setup)?.clone();
        state.save_current(&mut self.saves)?;
        Ok(m)
    }

    /// Load `match_id`, run `op` on the state, and store the result.
    fn update<T>(
        &mut self,
        match_id: &str,
        op: impl FnOnce(&mut ScoringState) -> Result<T>,
    ) -> Result<(Match, T)> {
        let mut state = ScoringState::new(self.config.clone());
        if !state.load_saved(&self.saves, match_id)? {
            bail!("No saved match with id '{match_id}'");
        }

        let out = op(&mut state)?;

        // A completed match has left `current_match` for the history.
        let m = match state.current_match.take() {
            Some(m) => m,
            None => state.match_history.pop().context("match vanished during update")?,
        };
        self.saves.replace(&m)?;
        Ok((m, out))
    }

    pub fn ball(&mut self, match_id: &str, input: BallInput) -> Result<(Match, BallEffects)> {
        self.update(match_id, |state| {
            let m = state.current_match.as_ref().context("no match loaded")?;
            if m.status == MatchStatus::Completed {
                bail!("Match '{}' is already completed", m.id);
            }
            let event = input.into_event(m);
            state.record_ball(&event).context("no match loaded")
        })
    }

    pub fn switch_batsman(&mut self, match_id: &str, old_id: &str, new_id: &str) -> Result<Match> {
        let (m, _) = self.update(match_id, |state| {
            if !state.switch_batsman(old_id, new_id) {
                bail!("'{old_id}' is not at the crease");
            }
            Ok(())
        })?;
        Ok(m)
    }

    pub fn switch_bowler(&mut self, match_id: &str, new_id: &str) -> Result<Match> {
        let (m, _) = self.update(match_id, |state| {
            state.switch_bowler(new_id);
            Ok(())
        })?;
        Ok(m)
    }

    pub fn complete(&mut self, match_id: &str) -> Result<Match> {
        let (m, _) = self.update(match_id, |state| {
            state.complete_match();
            Ok(())
        })?;
        Ok(m)
    }

    pub fn show(&self, match_id: &str) -> Result<Match> {
        let saved = self
            .saves
            .find(match_id)?
            .with_context(|| format!("No saved match with id '{match_id}'"))?;
        Ok(saved.record)
    }

    pub fn list(&self) -> Result<Vec<SavedMatch>> {
        Ok(self.saves.load_all()?.matches)
    }

    pub fn delete(&mut self, match_id: &str) -> Result<usize> {
        Ok(self.saves.delete(match_id)?)
    }
}

/// Plain-text scorecard for the terminal.
pub fn render_scorecard(m: &Match) -> String {
    let mut out = String::new();
    let bat = &m.batting_team;
    let bowl = &m.bowling_team;

    let _ = writeln!(out, "{} ({}, {}) [{:?}]", m.venue, m.format.code(), m.date, m.status);
    let _ = writeln!(out, "{}  {}", bat.name, bat.score_line());
    let _ = writeln!(out, "{}  {}", bowl.name, bowl.score_line());

    let _ = writeln!(out, "\nAt the crease:");
    for id in &m.current_batsmen {
        match bat.find_player(id) {
            Some(p) => {
                let _ = writeln!(out, "  {:<20} {} ({})", p.name, p.batting.runs, p.batting.balls);
            }
            None => {
                let _ = writeln!(out, "  {id:<20} (not in squad)");
            }
        }
    }
    if let Some(p) = m.current_bowler_player() {
        let _ = writeln!(
            out,
            "Bowling: {} {}/{} ({})",
            p.name,
            p.bowling.wickets,
            p.bowling.runs_conceded,
            format_overs(p.bowling.balls)
        );
    }

    if let Some(stand) = &m.current_partnership {
        let _ = writeln!(
            out,
            "Partnership: {} runs ({} balls, RR {:.2})",
            stand.runs,
            stand.balls,
            stand.run_rate()
        );
    }
    let pp = &m.power_play;
    let _ = writeln!(
        out,
        "Power play: {}/{} ({} ov, RR {:.2})",
        pp.runs,
        pp.wickets,
        format_overs(pp.balls),
        pp.run_rate
    );
    let _ = writeln!(
        out,
        "Last ball: {} run(s), {} extra(s){}",
        m.last_ball.runs,
        m.last_ball.extras,
        if m.last_ball.wicket { ", WICKET" } else { "" }
    );

    let _ = writeln!(out, "\nBatting            R    B   4s   6s      SR");
    for p in bat.batting_card().into_iter().filter(|p| p.batting.balls > 0) {
        let b = &p.batting;
        let _ = writeln!(
            out,
            "{:<16} {:>4} {:>4} {:>4} {:>4} {:>7.2}",
            p.name,
            b.runs,
            b.balls,
            b.fours,
            b.sixes,
            b.strike_rate()
        );
    }

    let _ = writeln!(out, "\nBowling            O    M    R    W    Econ");
    for p in bowl.bowling_card().into_iter().filter(|p| p.bowling.balls > 0) {
        let w = &p.bowling;
        let _ = writeln!(
            out,
            "{:<16} {:>4} {:>4} {:>4} {:>4} {:>7.2}",
            p.name,
            format_overs(w.balls),
            w.maidens,
            w.runs_conceded,
            w.wickets,
            w.economy()
        );
    }

    if !m.partnerships.is_empty() {
        let _ = writeln!(out, "\nFall of partnerships:");
        for stand in &m.partnerships {
            let _ = writeln!(
                out,
                "  {} & {}: {} ({} balls), overs {:.1}-{:.1}",
                stand.batsman1_id,
                stand.batsman2_id,
                stand.runs,
                stand.balls,
                stand.start_over,
                stand.end_over.unwrap_or(stand.start_over)
            );
        }
    }

    out
}
