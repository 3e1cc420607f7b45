pub mod check_table;
pub mod classify;
pub mod import;
pub mod leaderboard;
pub mod recalibrate;
pub mod summary;
