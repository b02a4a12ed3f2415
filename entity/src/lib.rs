//! Row shapes of the collections the league simulator reads and writes.
//!
//! Every module exposes the collection name as `TABLE`, the column names in
//! `columns`, the full row as `Model` and, where the simulator writes to the
//! collection, the insert (`New`) and partial update (`Patch`) shapes.

pub mod game_logs;
pub mod games;
pub mod leagues;
pub mod season_teams;
pub mod seasons;
pub mod teams;

pub use teams::Style;
