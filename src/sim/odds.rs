use entity::Style;

pub const MIN_DRIVE_SUCCESS: f64 = 0.10;
pub const MAX_DRIVE_SUCCESS: f64 = 0.90;

const CURVE_GAIN: f64 = 0.45;
const CURVE_KNEE: f64 = 2.5;

/// Chance that an offense rated `offense` puts together a successful drive
/// against a defense rated `defense`.
///
/// The rating gap is measured in tens of points and saturates: a 20 point
/// edge gives about 0.70, a 50 point edge about 0.80. Swapping the sides
/// gives the complementary chance.
pub fn drive_success(offense: f64, defense: f64) -> f64 {
    let delta = (offense - defense) / 10.0;
    let edge = delta.abs();

    let mut p = CURVE_GAIN.mul_add(edge / (edge + CURVE_KNEE), 0.5);
    if delta < 0.0 {
        p = 1.0 - p;
    }

    p.clamp(MIN_DRIVE_SUCCESS, MAX_DRIVE_SUCCESS)
}

/// Multipliers the two coaching styles facing each other apply to the
/// touchdown, turnover and big play chances of a possession.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleMods {
    pub touchdown: f64,
    pub turnover: f64,
    pub big_play: f64,
}

impl StyleMods {
    pub fn new(offense: Style, defense: Style) -> Self {
        let mut mods = Self {
            touchdown: 1.0,
            turnover: 1.0,
            big_play: 1.0,
        };

        match offense {
            Style::Aggressive => mods.scale(1.12, 1.18, 1.20),
            Style::Passive => mods.scale(0.92, 0.82, 0.85),
            Style::Neutral => {}
        }

        // an aggressive defense gambles: fewer touchdowns, more big plays
        match defense {
            Style::Aggressive => mods.scale(0.94, 1.15, 1.10),
            Style::Passive => mods.scale(0.97, 0.90, 0.85),
            Style::Neutral => {}
        }

        mods
    }

    fn scale(&mut self, touchdown: f64, turnover: f64, big_play: f64) {
        self.touchdown *= touchdown;
        self.turnover *= turnover;
        self.big_play *= big_play;
    }
}

/// Outcome probabilities of a single possession.
///
/// `turnover`, `touchdown` and `field_goal` are mutually exclusive; a punt
/// takes whatever probability is left. `big_play` gates the long touchdown
/// yardage range and is not part of that partition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Odds {
    pub drive_success: f64,
    pub turnover: f64,
    pub touchdown: f64,
    pub field_goal: f64,
    pub big_play: f64,
}

impl Odds {
    pub fn new(offense: f64, defense: f64, off_style: Style, def_style: Style) -> Self {
        let p = drive_success(offense, defense);
        let mods = StyleMods::new(off_style, def_style);

        Self {
            drive_success: p,
            turnover: ((1.0 - p) * 0.35 * mods.turnover).clamp(0.03, 0.22),
            touchdown: (p * 0.32 * mods.touchdown).clamp(0.10, 0.55),
            field_goal: (p * 0.22).clamp(0.05, 0.35),
            big_play: (p * 0.18 * mods.big_play).clamp(0.05, 0.45),
        }
    }

    #[inline]
    pub fn punt(&self) -> f64 {
        (1.0 - self.turnover - self.touchdown - self.field_goal).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: [Style; 3] = [Style::Aggressive, Style::Passive, Style::Neutral];

    #[test]
    fn drive_success_is_bounded() {
        for offense in 0..=100 {
            for defense in 0..=100 {
                let p = drive_success(f64::from(offense), f64::from(defense));
                assert!((MIN_DRIVE_SUCCESS..=MAX_DRIVE_SUCCESS).contains(&p));
            }
        }
    }

    #[test]
    fn drive_success_is_symmetric() {
        for offense in (0..=100).step_by(5) {
            for defense in (0..=100).step_by(5) {
                let p = drive_success(f64::from(offense), f64::from(defense));
                let q = drive_success(f64::from(defense), f64::from(offense));
                assert!((p + q - 1.0).abs() < 1e-12, "{offense} vs {defense}");
            }
        }
    }

    #[test]
    fn drive_success_curve() {
        assert!((drive_success(55.0, 55.0) - 0.5).abs() < 1e-12);
        assert!((drive_success(70.0, 50.0) - 0.70).abs() < 0.01);
        assert!((drive_success(100.0, 50.0) - 0.80).abs() < 0.01);
        assert!(drive_success(60.0, 50.0) > 0.5);
        assert!(drive_success(40.0, 50.0) < 0.5);
    }

    #[test]
    fn odds_stay_in_their_ranges() {
        for offense in (0..=100).step_by(10) {
            for defense in (0..=100).step_by(10) {
                for off_style in STYLES {
                    for def_style in STYLES {
                        let odds = Odds::new(
                            f64::from(offense),
                            f64::from(defense),
                            off_style,
                            def_style,
                        );

                        assert!((0.03..=0.22).contains(&odds.turnover));
                        assert!((0.10..=0.55).contains(&odds.touchdown));
                        assert!((0.05..=0.35).contains(&odds.field_goal));
                        assert!((0.05..=0.45).contains(&odds.big_play));
                        assert!(odds.punt() >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn aggressive_offense_scores_and_gives_away_more() {
        let neutral = Odds::new(60.0, 60.0, Style::Neutral, Style::Neutral);
        let aggressive = Odds::new(60.0, 60.0, Style::Aggressive, Style::Neutral);
        let passive = Odds::new(60.0, 60.0, Style::Passive, Style::Neutral);

        assert!(aggressive.touchdown > neutral.touchdown);
        assert!(aggressive.turnover > neutral.turnover);
        assert!(aggressive.big_play > neutral.big_play);

        assert!(passive.touchdown < neutral.touchdown);
        assert!(passive.turnover < neutral.turnover);
        assert!(passive.big_play < neutral.big_play);
    }

    #[test]
    fn defensive_styles() {
        let neutral = Odds::new(60.0, 60.0, Style::Neutral, Style::Neutral);
        let aggressive = Odds::new(60.0, 60.0, Style::Neutral, Style::Aggressive);
        let passive = Odds::new(60.0, 60.0, Style::Neutral, Style::Passive);

        assert!(aggressive.touchdown < neutral.touchdown);
        assert!(aggressive.turnover > neutral.turnover);
        assert!(aggressive.big_play > neutral.big_play);

        assert!(passive.turnover < neutral.turnover);
        assert!(passive.big_play < neutral.big_play);
        // field goals ignore style
        assert_eq!(passive.field_goal, neutral.field_goal);
    }
}
