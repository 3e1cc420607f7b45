use super::records::{
    Mode, Player, RecalibrationRecord, SessionRecord, StoredStatRow, TableKind,
};
use super::RatingStore;
use crate::aggregator::StatRow;
use crate::error::{SfResult, SkillForgeError};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// One mode's tables. A `None` table does not exist in the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<SessionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_stats: Option<Vec<StoredStatRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recalibration_log: Option<Vec<RecalibrationRecord>>,
}

impl Namespace {
    /// A namespace with every table created and empty.
    pub fn empty() -> Self {
        Self {
            sessions: Some(Vec::new()),
            player_stats: Some(Vec::new()),
            recalibration_log: Some(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<Namespace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Namespace>,
}

impl Dataset {
    /// Both namespaces present with empty tables.
    pub fn with_empty_tables() -> Self {
        Self {
            players: Vec::new(),
            production: Some(Namespace::empty()),
            test: Some(Namespace::empty()),
        }
    }

    fn namespace(&self, mode: Mode) -> Option<&Namespace> {
        match mode {
            Mode::Production => self.production.as_ref(),
            Mode::Test => self.test.as_ref(),
        }
    }

    fn namespace_mut(&mut self, mode: Mode) -> Option<&mut Namespace> {
        match mode {
            Mode::Production => self.production.as_mut(),
            Mode::Test => self.test.as_mut(),
        }
    }

    pub fn sessions(&self, mode: Mode) -> SfResult<&Vec<SessionRecord>> {
        self.namespace(mode)
            .and_then(|ns| ns.sessions.as_ref())
            .ok_or_else(|| missing(mode, TableKind::Sessions))
    }

    pub fn player_stats(&self, mode: Mode) -> SfResult<&Vec<StoredStatRow>> {
        self.namespace(mode)
            .and_then(|ns| ns.player_stats.as_ref())
            .ok_or_else(|| missing(mode, TableKind::PlayerStats))
    }

    pub fn recalibration_log(&self, mode: Mode) -> SfResult<&Vec<RecalibrationRecord>> {
        self.namespace(mode)
            .and_then(|ns| ns.recalibration_log.as_ref())
            .ok_or_else(|| missing(mode, TableKind::RecalibrationLog))
    }

    pub fn sessions_mut(&mut self, mode: Mode) -> SfResult<&mut Vec<SessionRecord>> {
        self.namespace_mut(mode)
            .and_then(|ns| ns.sessions.as_mut())
            .ok_or_else(|| missing(mode, TableKind::Sessions))
    }

    pub fn player_stats_mut(&mut self, mode: Mode) -> SfResult<&mut Vec<StoredStatRow>> {
        self.namespace_mut(mode)
            .and_then(|ns| ns.player_stats.as_mut())
            .ok_or_else(|| missing(mode, TableKind::PlayerStats))
    }

    pub fn recalibration_log_mut(&mut self, mode: Mode) -> SfResult<&mut Vec<RecalibrationRecord>> {
        self.namespace_mut(mode)
            .and_then(|ns| ns.recalibration_log.as_mut())
            .ok_or_else(|| missing(mode, TableKind::RecalibrationLog))
    }
}

fn missing(mode: Mode, kind: TableKind) -> SkillForgeError {
    SkillForgeError::MissingTable(mode.table_name(kind))
}

/// In-process store. Each call takes the lock once, so individual reads and
/// inserts are atomic; sequences of calls are not.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: Mutex<Dataset>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
        }
    }

    pub fn snapshot(&self) -> SfResult<Dataset> {
        Ok(self.lock()?.clone())
    }

    /// Adds the player unless one with the same id exists.
    pub fn ensure_player(&self, player: Player) -> SfResult<()> {
        let mut guard = self.lock()?;
        if !guard.players.iter().any(|p| p.id == player.id) {
            guard.players.push(player);
        }
        Ok(())
    }

    /// Adds the session unless one with the same id exists in `mode`.
    pub fn ensure_session(&self, mode: Mode, session: SessionRecord) -> SfResult<()> {
        let mut guard = self.lock()?;
        let sessions = guard.sessions_mut(mode)?;
        if !sessions.iter().any(|s| s.id == session.id) {
            sessions.push(session);
        }
        Ok(())
    }

    pub(crate) fn lock(&self) -> SfResult<MutexGuard<'_, Dataset>> {
        self.dataset
            .lock()
            .map_err(|e| SkillForgeError::Storage(e.to_string()))
    }
}

impl RatingStore for MemoryStore {
    fn players(&self) -> SfResult<Vec<Player>> {
        Ok(self.lock()?.players.clone())
    }

    fn sessions_for_player(&self, player_id: &str, mode: Mode) -> SfResult<Vec<SessionRecord>> {
        let guard = self.lock()?;
        let mut sessions: Vec<SessionRecord> = guard
            .sessions(mode)?
            .iter()
            .filter(|s| s.player_id == player_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.date);
        Ok(sessions)
    }

    fn session_stats(&self, session_id: &str, mode: Mode) -> SfResult<Vec<StatRow>> {
        let guard = self.lock()?;
        Ok(guard
            .player_stats(mode)?
            .iter()
            .filter(|r| !r.is_derived() && r.row.session_id.as_deref() == Some(session_id))
            .map(|r| r.row.clone())
            .collect())
    }

    fn insert_stat_rows(&self, mode: Mode, rows: &[StoredStatRow]) -> SfResult<()> {
        let mut guard = self.lock()?;
        guard.player_stats_mut(mode)?.extend_from_slice(rows);
        Ok(())
    }

    fn insert_recalibration_record(&self, mode: Mode, record: &RecalibrationRecord) -> SfResult<()> {
        let mut guard = self.lock()?;
        guard.recalibration_log_mut(mode)?.push(record.clone());
        Ok(())
    }
}
