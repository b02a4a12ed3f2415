//! Daily season progression.
//!
//! A season moves through: no schedule, partial schedule, week in progress,
//! week complete and finally complete. One trigger window advances it by at
//! most one week, and the stored `last_sim_local_date` keeps a second
//! invocation on the same civil date from doing anything.

use crate::{
    error::{self, Result},
    league::TEAMS_PER_LEAGUE,
    schedule,
    sim::{self, Side, Strength},
    standings::{self, Decision},
    store::{Direction, Query, StoreTrait},
    trigger::{self, Gate},
    SharedTrait,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use entity::{
    game_logs, games,
    seasons::{self, constants::FIRST_WEEK, constants::LAST_WEEK, Status},
    teams,
};
use futures::future::join_all;
use rand::Rng;
use std::collections::{BTreeSet, HashMap, HashSet};
use uuid::Uuid;

/// What one invocation did to one season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The season was already advanced on this civil date.
    AlreadyAdvanced,
    /// The season is complete and was left alone.
    Inactive,
    /// `played` games of `week` were simulated and the week pointer moved to
    /// `week`.
    Advanced { week: i32, played: usize },
    /// The last week was already played; the season is now complete.
    Completed,
}

#[derive(Debug)]
pub struct SeasonOutcome {
    pub season_id: Uuid,
    pub result: Result<Progress>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Whether the trigger window was open.
    pub fired: bool,
    pub seasons: Vec<SeasonOutcome>,
}

impl BatchReport {
    /// Seasons that stopped on a persistence error.
    pub fn failures(&self) -> usize {
        self.seasons
            .iter()
            .filter(|outcome| matches!(&outcome.result, Err(error) if error.is_persistence()))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    pub fn outcome(&self, season_id: Uuid) -> Option<&Result<Progress>> {
        self.seasons
            .iter()
            .find(|outcome| outcome.season_id == season_id)
            .map(|outcome| &outcome.result)
    }
}

/// One batch run as of `now`.
///
/// Outside the trigger window this does nothing at all. Inside it every
/// active season is advanced independently: a failing season does not stop
/// the others.
pub async fn run_at<S: SharedTrait>(shared: &S, now: DateTime<Tz>) -> Result<BatchReport> {
    let gate = Gate::from_config(shared.config());
    let now = gate.localize(now);

    if !gate.is_open(&now) {
        info!(
            "Not sim time. {} now {}",
            shared.config().timezone,
            now.format("%Y-%m-%d %H:%M")
        );
        return Ok(BatchReport::default());
    }

    let active: Vec<seasons::Model> = shared
        .store()
        .select(
            seasons::TABLE,
            &Query::new().is_in(seasons::columns::STATUS, Status::ACTIVE),
        )
        .await?;

    if active.is_empty() {
        info!("No active seasons.");
    }

    let outcomes = join_all(active.iter().map(|season| async move {
        let result = advance(shared, season, now).await;
        log_outcome(season, now.date_naive(), &result);

        SeasonOutcome {
            season_id: season.id,
            result,
        }
    }))
    .await;

    Ok(BatchReport {
        fired: true,
        seasons: outcomes,
    })
}

/// Advances one season by one week as of `now`, which must already be in
/// the trigger zone.
pub async fn advance<S: SharedTrait>(
    shared: &S,
    season: &seasons::Model,
    now: DateTime<Tz>,
) -> Result<Progress> {
    let today = now.date_naive();

    if season.status.is_terminal() {
        return Ok(Progress::Inactive);
    }

    if trigger::already_advanced(season, today) {
        return Ok(Progress::AlreadyAdvanced);
    }

    let store = shared.store();
    let next_week = season.week() + 1;

    if next_week > LAST_WEEK {
        let patch = seasons::Patch {
            status: Some(Status::Complete),
            last_sim_local_date: Some(today),
            ..Default::default()
        };
        update_season(store, season, &patch).await?;

        return Ok(Progress::Completed);
    }

    let mut rng = shared.rng();

    let teams = load_teams(store, season.league_id).await?;
    ensure_schedule(store, season, &teams, &mut rng).await?;

    let games: Vec<games::Model> = store
        .select(
            games::TABLE,
            &Query::new()
                .eq(games::columns::SEASON_ID, season.id)
                .eq(games::columns::WEEK, next_week),
        )
        .await?;

    if games.is_empty() {
        warn!(season_id = %season.id, "No games found for week {next_week}.");
    }

    ensure_recorded(store, &games).await?;

    let teams: HashMap<Uuid, &teams::Model> = teams.iter().map(|team| (team.id, team)).collect();
    let played_at = now.with_timezone(&Utc);
    let mut played = 0;

    for game in games.iter().filter(|game| !game.is_played()) {
        if play_game(store, game, &teams, played_at, &mut rng).await? {
            played += 1;
        }
    }

    let patch = seasons::Patch {
        week: Some(next_week),
        last_sim_local_date: Some(today),
        ..Default::default()
    };
    update_season(store, season, &patch).await?;

    Ok(Progress::Advanced {
        week: next_week,
        played,
    })
}

async fn load_teams<St: StoreTrait>(store: &St, league_id: Uuid) -> Result<Vec<teams::Model>> {
    let teams: Vec<teams::Model> = store
        .select(
            teams::TABLE,
            &Query::new()
                .eq(teams::columns::LEAGUE_ID, league_id)
                .order(teams::columns::NAME, Direction::Asc),
        )
        .await?;

    if teams.len() != TEAMS_PER_LEAGUE {
        warn!(
            %league_id,
            "League has {} teams; expected {TEAMS_PER_LEAGUE}.",
            teams.len()
        );
        return Err(error::WRONG_TEAM_COUNT);
    }

    Ok(teams)
}

/// Inserts the games of every week that has none yet. Returns how many
/// games were inserted.
pub async fn ensure_schedule<St, R>(
    store: &St,
    season: &seasons::Model,
    teams: &[teams::Model],
    rng: &mut R,
) -> Result<usize>
where
    St: StoreTrait,
    R: Rng + ?Sized,
{
    let existing: Vec<games::WeekOnly> = store
        .select(
            games::TABLE,
            &Query::new()
                .columns("id,week")
                .eq(games::columns::SEASON_ID, season.id)
                .gte(games::columns::WEEK, FIRST_WEEK)
                .lte(games::columns::WEEK, LAST_WEEK),
        )
        .await?;

    let scheduled: BTreeSet<i32> = existing.iter().map(|game| game.week).collect();

    if (FIRST_WEEK..=LAST_WEEK).all(|week| scheduled.contains(&week)) {
        return Ok(0);
    }

    info!(season_id = %season.id, "Generating schedule weeks {FIRST_WEEK}-{LAST_WEEK}.");

    let team_ids: Vec<Uuid> = teams.iter().map(|team| team.id).collect();
    let rounds = schedule::season(&team_ids, rng)?;

    let inserts: Vec<games::New> = (FIRST_WEEK..=LAST_WEEK)
        .zip(rounds)
        .filter(|(week, _)| !scheduled.contains(week))
        .flat_map(|(week, round)| {
            round.into_iter().map(move |(home, away)| games::New {
                season_id: season.id,
                week,
                home_team_id: home,
                away_team_id: away,
            })
        })
        .collect();

    let _: Vec<games::WeekOnly> = store.insert(games::TABLE, &inserts).await?;

    Ok(inserts.len())
}

/// Fails if a played game of the week has no log lines, which means its
/// result was claimed but never fully recorded. The season stays on this
/// week until the game is repaired.
async fn ensure_recorded<St: StoreTrait>(store: &St, games: &[games::Model]) -> Result {
    let played: Vec<Uuid> = games
        .iter()
        .filter(|game| game.is_played())
        .map(|game| game.id)
        .collect();

    if played.is_empty() {
        return Ok(());
    }

    let logged: Vec<game_logs::GameOnly> = store
        .select(
            game_logs::TABLE,
            &Query::new()
                .columns(game_logs::columns::GAME_ID)
                .is_in(game_logs::columns::GAME_ID, &played),
        )
        .await?;
    let logged: HashSet<Uuid> = logged.iter().map(|log| log.game_id).collect();

    if let Some(game_id) = played.iter().find(|id| !logged.contains(*id)) {
        error!(%game_id, "game is marked played but its result was never recorded");
        return Err(error::UNRECORDED_GAME);
    }

    Ok(())
}

fn side<'a>(teams: &HashMap<Uuid, &'a teams::Model>, id: Uuid, fallback: &'a str) -> Side<'a> {
    match teams.get(&id) {
        Some(team) => Side::from(*team),
        None => {
            warn!(team_id = %id, "team is not part of the league");
            Side::new(fallback, Strength::default())
        }
    }
}

/// Simulates one game and records it. Returns `false` if another run
/// claimed the game first, in which case nothing is written.
///
/// The result is claimed on the game row first. If the standings or the
/// log cannot be written afterwards, the claim is released so the game is
/// played again on the next run.
async fn play_game<St, R>(
    store: &St,
    game: &games::Model,
    teams: &HashMap<Uuid, &teams::Model>,
    played_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<bool>
where
    St: StoreTrait,
    R: Rng + ?Sized,
{
    let home = side(teams, game.home_team_id, "Home");
    let away = side(teams, game.away_team_id, "Away");

    let result = sim::simulate(&home, &away, rng);

    let patch = games::ResultPatch {
        home_tds: result.home.touchdowns,
        away_tds: result.away.touchdowns,
        home_yards: result.home.yards,
        away_yards: result.away.yards,
        played_at,
    };

    let recorded: Vec<games::Model> = store
        .patch(
            games::TABLE,
            &Query::new()
                .eq(games::columns::ID, game.id)
                .is_null(games::columns::PLAYED_AT),
            &patch,
        )
        .await?;

    if recorded.is_empty() {
        warn!(game_id = %game.id, "game was already played, skipping");
        return Ok(false);
    }

    let decision = match record_result(store, game, &result).await {
        Ok(decision) => decision,
        Err(error) => {
            release(store, game).await;
            return Err(error);
        }
    };

    if decision == Decision::Tie {
        info!(
            game_id = %game.id,
            "{} at {} ended level after {} overtime possessions",
            away.name,
            home.name,
            result.overtime
        );
    }

    debug!(
        game_id = %game.id,
        "{} {} - {} {}",
        home.name,
        result.home.touchdowns,
        result.away.touchdowns,
        away.name
    );

    Ok(true)
}

/// Applies the standings and stores the log of a claimed game. Either both
/// land or the standings are taken back out.
async fn record_result<St: StoreTrait>(
    store: &St,
    game: &games::Model,
    result: &sim::GameResult,
) -> Result<Decision> {
    let home = (game.home_team_id, &result.home);
    let away = (game.away_team_id, &result.away);

    let decision = standings::apply(store, game.season_id, home, away).await?;

    let lines: Vec<game_logs::New> = result
        .log
        .iter()
        .take(game_logs::constants::MAX_LINES)
        .map(|message| game_logs::New {
            game_id: game.id,
            message: message.clone(),
        })
        .collect();

    let inserted: Result<Vec<game_logs::Model>> = store.insert(game_logs::TABLE, &lines).await;

    if let Err(error) = inserted {
        if let Err(undo) = standings::revert(store, game.season_id, home, away).await {
            error!(game_id = %game.id, "failed to take back the standings of the game: {undo}");
        }
        return Err(error);
    }

    Ok(decision)
}

/// Puts a claimed game back to unplayed.
async fn release<St: StoreTrait>(store: &St, game: &games::Model) {
    let released: Result<Vec<games::Model>> = store
        .patch(
            games::TABLE,
            &Query::new().eq(games::columns::ID, game.id),
            &games::Unplayed::default(),
        )
        .await;

    match released {
        Ok(_) => warn!(game_id = %game.id, "game result was not recorded, it will be played again"),
        Err(error) => error!(
            game_id = %game.id,
            "game stays marked played without a recorded result: {error}"
        ),
    }
}

/// Patches the season only if its week pointer still holds the value that
/// was read, so two overlapping runs cannot both move it.
async fn update_season<St: StoreTrait>(
    store: &St,
    season: &seasons::Model,
    patch: &seasons::Patch,
) -> Result {
    let query = Query::new().eq(seasons::columns::ID, season.id);
    let query = match season.week {
        Some(week) => query.eq(seasons::columns::WEEK, week),
        None => query.is_null(seasons::columns::WEEK),
    };

    let updated: Vec<seasons::Model> = store.patch(seasons::TABLE, &query, patch).await?;

    if updated.is_empty() {
        warn!(season_id = %season.id, "season moved on during this run, not updated");
    }

    Ok(())
}

fn log_outcome(season: &seasons::Model, today: NaiveDate, result: &Result<Progress>) {
    let season_id = season.id;

    match result {
        Ok(Progress::AlreadyAdvanced) => {
            info!(%season_id, "Season already simmed for {today}.")
        }
        Ok(Progress::Inactive) => debug!(%season_id, "season is complete"),
        Ok(Progress::Advanced { week, played }) => {
            info!(%season_id, "Simulated {played} games, season is at week {week}.")
        }
        Ok(Progress::Completed) => info!(
            %season_id,
            "Regular season complete (week {}). Playoffs are not simulated.",
            season.week()
        ),
        Err(error) if error.is_validation() => warn!(%season_id, "season skipped: {error}"),
        Err(error) => error!(%season_id, "season failed: {error}"),
    }
}
