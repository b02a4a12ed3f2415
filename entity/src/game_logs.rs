use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TABLE: &str = "game_logs";

pub mod columns {
    pub const GAME_ID: &str = "game_id";
}

pub mod constants {
    /// Lines kept per game, the rest of the play-by-play is dropped.
    pub const MAX_LINES: usize = 40;
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    pub game_id: Uuid,
    pub message: String,
}

pub type New = Model;

/// Which games have log lines at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct GameOnly {
    pub game_id: Uuid,
}
