//! Possession-by-possession game simulation.
//!
//! Teams are reduced to an offense and a defense rating on a 0-100 scale
//! plus a coaching style per side of the ball. Every possession is one draw
//! against the odds those produce.

mod game;
pub mod odds;

pub use game::*;
