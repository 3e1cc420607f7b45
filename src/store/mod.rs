pub mod json_file;
pub mod memory;
pub mod records;

pub use self::json_file::JsonFileStore;
pub use self::memory::{Dataset, MemoryStore, Namespace};
pub use self::records::{
    Mode, Player, RecalibrationDetails, RecalibrationRecord, SessionRecord, StoredStatRow,
    TableKind,
};

use crate::aggregator::{Session, StatRow};
use crate::error::SfResult;

/// Persistence the engine needs from the surrounding application. Reads are
/// scoped to one mode's namespace; writes are inserts only.
pub trait RatingStore {
    fn players(&self) -> SfResult<Vec<Player>>;

    /// Sessions for a player, oldest first.
    fn sessions_for_player(&self, player_id: &str, mode: Mode) -> SfResult<Vec<SessionRecord>>;

    fn earliest_session(&self, player_id: &str, mode: Mode) -> SfResult<Option<SessionRecord>> {
        Ok(self.sessions_for_player(player_id, mode)?.into_iter().next())
    }

    /// Raw input rows of one session (derived rows excluded).
    fn session_stats(&self, session_id: &str, mode: Mode) -> SfResult<Vec<StatRow>>;

    fn insert_stat_rows(&self, mode: Mode, rows: &[StoredStatRow]) -> SfResult<()>;

    fn insert_recalibration_record(&self, mode: Mode, record: &RecalibrationRecord) -> SfResult<()>;
}

/// Player history with rows attached, oldest session first.
pub fn load_sessions<S: RatingStore + ?Sized>(
    store: &S,
    player_id: &str,
    mode: Mode,
) -> SfResult<Vec<Session>> {
    store
        .sessions_for_player(player_id, mode)?
        .into_iter()
        .map(|record| {
            let rows = store.session_stats(&record.id, mode)?;
            Ok(Session {
                id: record.id,
                player_id: record.player_id,
                date: record.date,
                rows,
            })
        })
        .collect()
}
