use super::error::StoreError;
use super::format::{decode, encode, SavedMatch, SavedMatches};
use super::store::KeyValueStore;
use super::SAVED_MATCHES_KEY;
use crate::models::Match;

/// Saved-match operations over any [`KeyValueStore`].
///
/// All snapshots live in one document under [`SAVED_MATCHES_KEY`]. Saving
/// appends, so the same match id may appear more than once; lookups return
/// the most recent snapshot and deletes drop every snapshot for the id.
pub struct SaveManager<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SaveManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Every snapshot in save order. An absent key reads as empty.
    pub fn load_all(&self) -> Result<SavedMatches, StoreError> {
        match self.store.get(SAVED_MATCHES_KEY)? {
            Some(text) => decode(&text),
            None => Ok(SavedMatches::new()),
        }
    }

    fn write_all(&mut self, doc: &SavedMatches) -> Result<(), StoreError> {
        let text = encode(doc)?;
        self.store.set(SAVED_MATCHES_KEY, &text)
    }

    /// Append a snapshot of `record`.
    pub fn save(&mut self, record: &Match) -> Result<SavedMatch, StoreError> {
        let mut doc = self.load_all()?;
        let saved = SavedMatch::new(record.clone());
        doc.matches.push(saved.clone());
        self.write_all(&doc)?;

        log::info!("Saved match {} ({} snapshots stored)", record.id, doc.matches.len());
        Ok(saved)
    }

    /// Swap every snapshot of `record.id` for one fresh snapshot, in a single
    /// store write.
    pub fn replace(&mut self, record: &Match) -> Result<SavedMatch, StoreError> {
        let mut doc = self.load_all()?;
        doc.matches.retain(|m| m.id() != record.id);
        let saved = SavedMatch::new(record.clone());
        doc.matches.push(saved.clone());
        self.write_all(&doc)?;

        log::info!("Replaced snapshots of match {}", record.id);
        Ok(saved)
    }

    /// Latest snapshot for `match_id`.
    pub fn find(&self, match_id: &str) -> Result<Option<SavedMatch>, StoreError> {
        let doc = self.load_all()?;
        Ok(doc.matches.into_iter().rev().find(|m| m.id() == match_id))
    }

    /// Drop every snapshot for `match_id`. Returns how many were removed.
    pub fn delete(&mut self, match_id: &str) -> Result<usize, StoreError> {
        let mut doc = self.load_all()?;
        let before = doc.matches.len();
        doc.matches.retain(|m| m.id() != match_id);
        let removed = before - doc.matches.len();

        if removed > 0 {
            self.write_all(&doc)?;
            log::info!("Deleted {} snapshots of match {}", removed, match_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchSetup;
    use crate::save::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn sample_match() -> Match {
        let setup: MatchSetup = serde_json::from_value(serde_json::json!({
            "team1_name": "Harbour",
            "team2_name": "Hillside",
            "team1_players": [{"id": "H1", "name": "One"}, {"id": "H2", "name": "Two"}],
            "team2_players": [{"id": "S1", "name": "Three"}],
            "venue": "Oval",
            "format": "T20",
            "toss_winner": "Harbour",
            "toss_decision": "bat",
            "opening_batsmen": ["H1", "H2"],
            "opening_bowler": "S1"
        }))
        .unwrap();
        setup.into_match().unwrap()
    }

    #[test]
    fn test_save_find_delete() {
        let mut manager = SaveManager::new(MemoryStore::new());
        let record = sample_match();

        manager.save(&record).unwrap();
        assert_eq!(manager.find(&record.id).unwrap().unwrap().record, record);
        assert!(manager.find("missing").unwrap().is_none());

        assert_eq!(manager.delete(&record.id).unwrap(), 1);
        assert!(manager.find(&record.id).unwrap().is_none());
        assert_eq!(manager.delete(&record.id).unwrap(), 0);
    }

    #[test]
    fn test_latest_snapshot_wins() {
        let mut manager = SaveManager::new(MemoryStore::new());
        let mut record = sample_match();
        manager.save(&record).unwrap();
        record.venue = "Park".to_string();
        manager.save(&record).unwrap();

        assert_eq!(manager.load_all().unwrap().matches.len(), 2);
        assert_eq!(manager.find(&record.id).unwrap().unwrap().record.venue, "Park");
        assert_eq!(manager.delete(&record.id).unwrap(), 2);
    }

    #[test]
    fn test_replace_keeps_one_snapshot() {
        let mut manager = SaveManager::new(MemoryStore::new());
        let mut record = sample_match();
        manager.save(&record).unwrap();
        manager.save(&record).unwrap();

        record.venue = "Park".to_string();
        manager.replace(&record).unwrap();

        let doc = manager.load_all().unwrap();
        assert_eq!(doc.matches.len(), 1);
        assert_eq!(doc.matches[0].record.venue, "Park");
    }

    #[test]
    fn test_failed_replace_keeps_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store_dir = temp_dir.path().join("store");
        let mut record = sample_match();

        let mut manager = SaveManager::new(FileStore::new(&store_dir));
        manager.save(&record).unwrap();

        // A directory squatting on the temp file name makes the write fail.
        std::fs::create_dir(store_dir.join(format!("{SAVED_MATCHES_KEY}.tmp"))).unwrap();
        record.venue = "Park".to_string();
        assert!(manager.replace(&record).is_err());

        let kept = manager.find(&record.id).unwrap().unwrap();
        assert_eq!(kept.record.venue, "Oval");
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let record = sample_match();

        let mut manager = SaveManager::new(FileStore::new(temp_dir.path()));
        manager.save(&record).unwrap();

        let reopened = SaveManager::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.find(&record.id).unwrap().unwrap().record, record);
    }

    #[test]
    fn test_reads_browser_document() {
        let browser = serde_json::json!([{
            "id": "1718000000000",
            "date": "2024-06-10T09:00:00.000Z",
            "venue": "Oval",
            "format": "ODI",
            "tossWinner": "Hillside",
            "tossDecision": "field",
            "battingTeam": {"id": "1", "name": "Harbour", "players": [], "totalRuns": 0,
                            "wickets": 0, "overs": 0, "currentRunRate": 0},
            "bowlingTeam": {"id": "2", "name": "Hillside", "players": [], "totalRuns": 0,
                            "wickets": 0, "overs": 0, "currentRunRate": 0},
            "currentBatsmen": ["H1", "H2"],
            "currentBowler": "S1",
            "lastBall": {"runs": 0, "wicket": false, "extras": 0},
            "matchStatus": "not_started",
            "umpires": {"onField": [], "thirdUmpire": ""},
            "partnerships": [],
            "currentPartnership": null,
            "powerPlayStats": {"overs": 0, "runs": 0, "wickets": 0, "runRate": 0},
            "savedAt": "2024-06-10T09:00:05.000Z"
        }]);

        let mut store = MemoryStore::new();
        store.set(SAVED_MATCHES_KEY, &browser.to_string()).unwrap();

        let mut manager = SaveManager::new(store);
        let found = manager.find("1718000000000").unwrap().unwrap();
        assert_eq!(found.record.format, crate::models::MatchFormat::Odi);
        assert_eq!(found.record.bowling_team.name, "Hillside");

        // The next write upgrades the stored layout.
        manager.save(&found.record).unwrap();
        let text = manager.store().get(SAVED_MATCHES_KEY).unwrap().unwrap();
        assert!(text.starts_with(r#"{"version":1"#));
        assert_eq!(manager.load_all().unwrap().matches.len(), 2);
    }
}
