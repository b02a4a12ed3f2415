use super::odds::Odds;
use entity::{teams, Style};
use rand::Rng;
use std::fmt;

/// Regulation possessions per side.
pub const POSSESSIONS: u32 = 12;
/// Extra possession pairs played while the game is level. The game can
/// still end tied after them.
pub const OVERTIME_ROUNDS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strength {
    pub offense: f64,
    pub defense: f64,
    pub off_style: Style,
    pub def_style: Style,
}

impl Strength {
    pub fn new(offense: u8, defense: u8) -> Self {
        Self {
            offense: f64::from(offense),
            defense: f64::from(defense),
            off_style: Style::Neutral,
            def_style: Style::Neutral,
        }
    }

    pub fn with_styles(mut self, off_style: Style, def_style: Style) -> Self {
        self.off_style = off_style;
        self.def_style = def_style;
        self
    }
}

impl Default for Strength {
    fn default() -> Self {
        let rating = teams::constants::DEFAULT_RATING;
        Self::new(rating, rating)
    }
}

impl From<&teams::Model> for Strength {
    fn from(team: &teams::Model) -> Self {
        Self::new(team.offense(), team.defense()).with_styles(team.off_style(), team.def_style())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Side<'a> {
    pub name: &'a str,
    pub strength: Strength,
}

impl<'a> Side<'a> {
    pub fn new(name: &'a str, strength: Strength) -> Self {
        Self { name, strength }
    }
}

impl<'a> From<&'a teams::Model> for Side<'a> {
    fn from(team: &'a teams::Model) -> Self {
        Self::new(&team.name, Strength::from(team))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Turnover,
    Touchdown,
    FieldGoal,
    Punt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drive {
    pub outcome: Outcome,
    pub yards: u32,
}

impl Drive {
    #[inline]
    pub fn touchdowns(&self) -> u32 {
        u32::from(self.outcome == Outcome::Touchdown)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub touchdowns: u32,
    pub yards: u32,
}

impl Tally {
    fn add(&mut self, drive: Drive) {
        self.touchdowns += drive.touchdowns();
        self.yards += drive.yards;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub home: Tally,
    pub away: Tally,
    /// Overtime possession pairs that were needed, at most [`OVERTIME_ROUNDS`].
    pub overtime: u32,
    /// Play-by-play, one line per possession plus kickoff, overtime and
    /// final score lines.
    pub log: Vec<String>,
}

impl GameResult {
    #[inline]
    pub fn is_tied(&self) -> bool {
        self.home.touchdowns == self.away.touchdowns
    }
}

struct Line<'a>(&'a str, Drive);

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line(team, Drive { outcome, yards }) = self;

        match outcome {
            Outcome::Turnover => write!(f, "{team} turns it over after {yards} yards."),
            Outcome::Touchdown => write!(f, "{team} scores a touchdown! ({yards} yards)"),
            Outcome::FieldGoal => write!(f, "{team} stalls and kicks a field goal. ({yards} yards)"),
            Outcome::Punt => write!(f, "{team} punts. ({yards} yards)"),
        }
    }
}

/// Resolves one possession of `offense` against `defense`.
pub fn drive<R: Rng + ?Sized>(offense: &Strength, defense: &Strength, rng: &mut R) -> Drive {
    let odds = Odds::new(
        offense.offense,
        defense.defense,
        offense.off_style,
        defense.def_style,
    );

    let roll: f64 = rng.gen();

    if roll < odds.turnover {
        return Drive {
            outcome: Outcome::Turnover,
            yards: rng.gen_range(5..35),
        };
    }

    if roll < odds.turnover + odds.touchdown {
        // only a meaningful big play chance opens up the long range
        let yards = if odds.big_play > 0.20 && rng.gen_bool(odds.big_play) {
            rng.gen_range(45..80)
        } else {
            rng.gen_range(55..80)
        };

        return Drive {
            outcome: Outcome::Touchdown,
            yards,
        };
    }

    if roll < odds.turnover + odds.touchdown + odds.field_goal {
        return Drive {
            outcome: Outcome::FieldGoal,
            yards: rng.gen_range(35..70),
        };
    }

    Drive {
        outcome: Outcome::Punt,
        yards: rng.gen_range(5..30),
    }
}

/// Plays a full game, home side possessing first in every round.
pub fn simulate<R: Rng + ?Sized>(home: &Side, away: &Side, rng: &mut R) -> GameResult {
    let mut log = vec![format!("Kickoff: {} at {}", away.name, home.name)];
    let mut score = (Tally::default(), Tally::default());

    for _ in 0..POSSESSIONS {
        play_round(home, away, &mut score, &mut log, rng);
    }

    let mut overtime = 0;
    while score.0.touchdowns == score.1.touchdowns && overtime < OVERTIME_ROUNDS {
        overtime += 1;
        log.push(format!("Overtime possession {overtime}"));
        play_round(home, away, &mut score, &mut log, rng);
    }

    let (home_tally, away_tally) = score;

    log.push(format!(
        "Final: {} {} TD, {} yds; {} {} TD, {} yds",
        away.name,
        away_tally.touchdowns,
        away_tally.yards,
        home.name,
        home_tally.touchdowns,
        home_tally.yards,
    ));

    GameResult {
        home: home_tally,
        away: away_tally,
        overtime,
        log,
    }
}

fn play_round<R: Rng + ?Sized>(
    home: &Side,
    away: &Side,
    (home_tally, away_tally): &mut (Tally, Tally),
    log: &mut Vec<String>,
    rng: &mut R,
) {
    let home_drive = drive(&home.strength, &away.strength, rng);
    log.push(Line(home.name, home_drive).to_string());
    home_tally.add(home_drive);

    let away_drive = drive(&away.strength, &home.strength, rng);
    log.push(Line(away.name, away_drive).to_string());
    away_tally.add(away_drive);
}
