use super::memory::{Dataset, MemoryStore};
use super::records::{Mode, Player, RecalibrationRecord, SessionRecord, StoredStatRow};
use super::RatingStore;
use crate::aggregator::StatRow;
use crate::error::SfResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A dataset kept in one JSON file. Reads come from memory; every write is
/// flushed to disk before the call returns.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let path = path.as_ref().to_path_buf();
        info!("📂 Loading dataset: {}", path.display());
        let content = fs::read_to_string(&path)?;
        let dataset: Dataset = serde_json::from_str(&content)?;
        debug!("   -> {} players", dataset.players.len());
        Ok(Self {
            path,
            inner: MemoryStore::new(dataset),
        })
    }

    /// Writes a fresh dataset with empty tables in both namespaces.
    pub fn create<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            inner: MemoryStore::new(Dataset::with_empty_tables()),
        };
        store.persist()?;
        Ok(store)
    }

    pub fn snapshot(&self) -> SfResult<Dataset> {
        self.inner.snapshot()
    }

    pub fn ensure_player(&self, player: Player) -> SfResult<()> {
        self.inner.ensure_player(player)?;
        self.persist()
    }

    pub fn ensure_session(&self, mode: Mode, session: SessionRecord) -> SfResult<()> {
        self.inner.ensure_session(mode, session)?;
        self.persist()
    }

    fn persist(&self) -> SfResult<()> {
        let guard = self.inner.lock()?;
        let json = serde_json::to_string_pretty(&*guard)?;
        fs::write(&self.path, json)?;
        debug!("   -> Dataset written to {}", self.path.display());
        Ok(())
    }
}

impl RatingStore for JsonFileStore {
    fn players(&self) -> SfResult<Vec<Player>> {
        self.inner.players()
    }

    fn sessions_for_player(&self, player_id: &str, mode: Mode) -> SfResult<Vec<SessionRecord>> {
        self.inner.sessions_for_player(player_id, mode)
    }

    fn session_stats(&self, session_id: &str, mode: Mode) -> SfResult<Vec<StatRow>> {
        self.inner.session_stats(session_id, mode)
    }

    fn insert_stat_rows(&self, mode: Mode, rows: &[StoredStatRow]) -> SfResult<()> {
        self.inner.insert_stat_rows(mode, rows)?;
        self.persist()
    }

    fn insert_recalibration_record(&self, mode: Mode, record: &RecalibrationRecord) -> SfResult<()> {
        self.inner.insert_recalibration_record(mode, record)?;
        self.persist()
    }
}
