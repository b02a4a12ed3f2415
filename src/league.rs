use crate::{
    error::{self, Result},
    store::StoreTrait,
};
use entity::{leagues, season_teams, seasons, teams};
use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

pub const DEFAULT_NAME: &str = "HBFL: Has Beens Football League";
pub const TEAMS_PER_LEAGUE: usize = 8;

/// Names and abbreviations new leagues draw their teams from.
pub const TEAM_POOL: [(&str, &str); 16] = [
    ("Tulsa Rust", "TRS"),
    ("OKC Outlaws", "OKO"),
    ("Broken Arrow Blitz", "BAB"),
    ("Norman Nightshift", "NNF"),
    ("Wichita Wranglers", "WWR"),
    ("KC Thunder", "KCT"),
    ("Dallas Last Call", "DLC"),
    ("Fort Worth Fugitives", "FWF"),
    ("Little Rock Rewinds", "LRR"),
    ("Memphis Misfits", "MMF"),
    ("Austin Afterhours", "AAH"),
    ("Houston Hangovers", "HHG"),
    ("St. Louis Slowpokes", "SLP"),
    ("Springfield Specials", "SPS"),
    ("Omaha Old Heads", "OOH"),
    ("Des Moines Dust", "DMD"),
];

#[derive(Clone, Debug)]
pub struct Created {
    pub league: leagues::Model,
    pub teams: Vec<teams::Model>,
    pub season: seasons::Model,
}

/// Creates a league with eight teams drawn from [`TEAM_POOL`], its first
/// season at week 0 and a zeroed record for every team.
pub async fn create<S, R>(
    store: &S,
    rng: &mut R,
    name: &str,
    commissioner: Option<Uuid>,
) -> Result<Created>
where
    S: StoreTrait,
    R: Rng + ?Sized,
{
    let league: leagues::Model = first(
        store
            .insert(
                leagues::TABLE,
                &[leagues::New {
                    name: name.to_owned(),
                    commissioner,
                }],
            )
            .await?,
    )?;

    let new_teams: Vec<teams::New> = TEAM_POOL
        .choose_multiple(rng, TEAMS_PER_LEAGUE)
        .map(|(name, abbrev)| teams::New {
            league_id: league.id,
            name: (*name).to_owned(),
            abbrev: (*abbrev).to_owned(),
        })
        .collect();

    let teams: Vec<teams::Model> = store.insert(teams::TABLE, &new_teams).await?;

    let season: seasons::Model = first(
        store
            .insert(
                seasons::TABLE,
                &[seasons::New {
                    league_id: league.id,
                    season_no: 1,
                    status: seasons::Status::Regular,
                    week: 0,
                }],
            )
            .await?,
    )?;

    let records: Vec<season_teams::Model> = teams
        .iter()
        .map(|team| season_teams::Model::zeroed(season.id, team.id))
        .collect();

    let _: Vec<season_teams::Model> = store.insert(season_teams::TABLE, &records).await?;

    info!(league_id = %league.id, season_id = %season.id, "created league {}", league.name);

    Ok(Created {
        league,
        teams,
        season,
    })
}

fn first<T>(rows: Vec<T>) -> Result<T> {
    rows.into_iter().next().ok_or(error::STORE_EMPTY_INSERT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Query};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[tokio::test]
    async fn seeds_a_playable_league() {
        let store = MemoryStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let created = create(&store, &mut rng, DEFAULT_NAME, None).await.unwrap();

        assert_eq!(created.teams.len(), TEAMS_PER_LEAGUE);
        assert_eq!(created.season.week(), 0);
        assert_eq!(created.season.status, seasons::Status::Regular);
        assert_eq!(created.season.last_sim_local_date, None);

        let names: HashSet<&str> = created.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), TEAMS_PER_LEAGUE);

        let records: Vec<season_teams::Model> = store
            .select(
                season_teams::TABLE,
                &Query::new().eq(season_teams::columns::SEASON_ID, created.season.id),
            )
            .await
            .unwrap();

        assert_eq!(records.len(), TEAMS_PER_LEAGUE);
        assert!(records.iter().all(|r| r.counters.games() == 0));
    }
}
