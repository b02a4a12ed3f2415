use crate::{
    sim::Tally,
    store::{Query, StoreTrait},
    Result,
};
use entity::season_teams::{self, Counters};
use std::cmp::Ordering;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    HomeWin,
    AwayWin,
    Tie,
}

impl Decision {
    pub fn of(home: &Tally, away: &Tally) -> Self {
        match home.touchdowns.cmp(&away.touchdowns) {
            Ordering::Greater => Self::HomeWin,
            Ordering::Less => Self::AwayWin,
            Ordering::Equal => Self::Tie,
        }
    }
}

/// What one game adds to the home and the away record.
pub fn deltas(home: &Tally, away: &Tally) -> (Counters, Counters) {
    let decision = Decision::of(home, away);

    let home_delta = Counters {
        wins: u32::from(decision == Decision::HomeWin),
        losses: u32::from(decision == Decision::AwayWin),
        ties: u32::from(decision == Decision::Tie),
        tds_for: home.touchdowns,
        tds_against: away.touchdowns,
        yards_for: home.yards,
        yards_against: away.yards,
    };

    let away_delta = Counters {
        wins: home_delta.losses,
        losses: home_delta.wins,
        ties: home_delta.ties,
        tds_for: away.touchdowns,
        tds_against: home.touchdowns,
        yards_for: away.yards,
        yards_against: home.yards,
    };

    (home_delta, away_delta)
}

/// Adds one game's totals to both teams' season records.
///
/// If the away record cannot be written the home delta is taken back out,
/// so either both records change or neither does.
pub async fn apply<S: StoreTrait>(
    store: &S,
    season_id: Uuid,
    (home_id, home): (Uuid, &Tally),
    (away_id, away): (Uuid, &Tally),
) -> Result<Decision> {
    let (home_delta, away_delta) = deltas(home, away);

    add_to_record(store, season_id, home_id, home_delta).await?;

    if let Err(error) = add_to_record(store, season_id, away_id, away_delta).await {
        if let Err(undo) = remove_from_record(store, season_id, home_id, home_delta).await {
            error!(%season_id, team_id = %home_id, "failed to take back a game delta: {undo}");
        }
        return Err(error);
    }

    Ok(Decision::of(home, away))
}

/// Takes one game's totals back out of both teams' season records.
pub async fn revert<S: StoreTrait>(
    store: &S,
    season_id: Uuid,
    (home_id, home): (Uuid, &Tally),
    (away_id, away): (Uuid, &Tally),
) -> Result {
    let (home_delta, away_delta) = deltas(home, away);

    remove_from_record(store, season_id, home_id, home_delta).await?;
    remove_from_record(store, season_id, away_id, away_delta).await?;

    Ok(())
}

fn record_query(season_id: Uuid, team_id: Uuid) -> Query {
    Query::new()
        .eq(season_teams::columns::SEASON_ID, season_id)
        .eq(season_teams::columns::TEAM_ID, team_id)
}

/// Reads the current record and writes back `record + delta`. A missing
/// record is created with `delta` as its totals.
pub async fn add_to_record<S: StoreTrait>(
    store: &S,
    season_id: Uuid,
    team_id: Uuid,
    delta: Counters,
) -> Result<Counters> {
    let query = record_query(season_id, team_id);

    let records: Vec<season_teams::Model> = store
        .select(season_teams::TABLE, &query.clone().limit(1))
        .await?;

    let Some(record) = records.into_iter().next() else {
        warn!(%season_id, %team_id, "no season record, creating one");

        let row = season_teams::Model {
            season_id,
            team_id,
            counters: delta,
        };
        let _: Vec<season_teams::Model> = store.insert(season_teams::TABLE, &[row]).await?;

        return Ok(delta);
    };

    let mut counters = record.counters;
    counters += delta;

    let _: Vec<season_teams::Model> = store
        .patch(season_teams::TABLE, &query, &counters)
        .await?;

    Ok(counters)
}

/// Reads the current record and writes back `record - delta`.
pub async fn remove_from_record<S: StoreTrait>(
    store: &S,
    season_id: Uuid,
    team_id: Uuid,
    delta: Counters,
) -> Result<Counters> {
    let query = record_query(season_id, team_id);

    let records: Vec<season_teams::Model> = store
        .select(season_teams::TABLE, &query.clone().limit(1))
        .await?;

    let Some(record) = records.into_iter().next() else {
        return Ok(Counters::default());
    };

    let mut counters = record.counters;
    counters -= delta;

    let _: Vec<season_teams::Model> = store
        .patch(season_teams::TABLE, &query, &counters)
        .await?;

    Ok(counters)
}

/// Orders a season table: wins, then fewest losses, then touchdown and
/// yardage difference.
pub fn rank(records: &mut [season_teams::Model]) {
    records.sort_by(|a, b| {
        let (a, b) = (&a.counters, &b.counters);

        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then(b.td_diff().cmp(&a.td_diff()))
            .then(b.yard_diff().cmp(&a.yard_diff()))
    });
}
