use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const TABLE: &str = "teams";

pub mod columns {
    pub const ID: &str = "id";
    pub const LEAGUE_ID: &str = "league_id";
    pub const NAME: &str = "name";
    pub const ABBREV: &str = "abbrev";
}

pub mod constants {
    /// Rating used for either side of the ball when a team has none stored.
    pub const DEFAULT_RATING: u8 = 55;
}

/// Coaching tendency of one side of the ball.
///
/// Stored as free text; anything that is not `aggressive` or `passive`
/// (case-insensitively) reads back as [`Style::Neutral`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Style {
    Aggressive,
    Passive,
    #[default]
    Neutral,
}

impl Style {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Passive => "passive",
            Self::Neutral => "neutral",
        }
    }
}

impl From<String> for Style {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for Style {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("aggressive") {
            Self::Aggressive
        } else if value.eq_ignore_ascii_case("passive") {
            Self::Passive
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub abbrev: String,
    #[serde(default)]
    pub offense: Option<u8>,
    #[serde(default)]
    pub defense: Option<u8>,
    #[serde(default)]
    pub off_style: Option<Style>,
    #[serde(default)]
    pub def_style: Option<Style>,
}

impl Model {
    #[inline]
    pub fn offense(&self) -> u8 {
        self.offense.unwrap_or(constants::DEFAULT_RATING)
    }

    #[inline]
    pub fn defense(&self) -> u8 {
        self.defense.unwrap_or(constants::DEFAULT_RATING)
    }

    #[inline]
    pub fn off_style(&self) -> Style {
        self.off_style.unwrap_or_default()
    }

    #[inline]
    pub fn def_style(&self) -> Style {
        self.def_style.unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct New {
    pub league_id: Uuid,
    pub name: String,
    pub abbrev: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn style_is_case_insensitive() {
        let style: Style = serde_json::from_value(json!("AGGRESSIVE")).unwrap();
        assert_eq!(style, Style::Aggressive);

        let style: Style = serde_json::from_value(json!("Passive")).unwrap();
        assert_eq!(style, Style::Passive);
    }

    #[test]
    fn unknown_style_is_neutral() {
        let style: Style = serde_json::from_value(json!("blitz-happy")).unwrap();
        assert_eq!(style, Style::Neutral);
    }

    #[test]
    fn missing_ratings_use_defaults() {
        let team: Model = serde_json::from_value(json!({
            "id": Uuid::nil(),
            "league_id": Uuid::nil(),
            "name": "Tulsa Rust",
            "abbrev": "TRS",
        }))
        .unwrap();

        assert_eq!(team.offense(), constants::DEFAULT_RATING);
        assert_eq!(team.defense(), constants::DEFAULT_RATING);
        assert_eq!(team.off_style(), Style::Neutral);
        assert_eq!(team.def_style(), Style::Neutral);
    }
}
