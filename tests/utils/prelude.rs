#![allow(unused_imports)]

pub(crate) use super::macros::*;
pub use super::{chicago, day, setup::*};
pub use assert_json_diff::assert_json_include;
pub use entity::{game_logs, games, season_teams, seasons, teams};
pub use hbfl_sim::{error, season::run_at, store::StoreTrait, Progress};
pub use serde_json::{json, Value};
pub use uuid::Uuid;
