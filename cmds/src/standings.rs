use anyhow::Context;
use dotenvy::dotenv;
use entity::{season_teams, teams};
use hbfl_sim::{
    standings,
    store::{Query, RestStore, StoreTrait},
    Config,
};
use std::{collections::HashMap, env::args};
use uuid::Uuid;

/// Usage: `standings SEASON_ID`
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let season_id = args().nth(1).context("no season id given")?;
    let season_id = Uuid::parse_str(&season_id)?;

    let config = Config::from_env()?;
    let store = RestStore::new(&config)?;

    let mut records: Vec<season_teams::Model> = store
        .select(
            season_teams::TABLE,
            &Query::new().eq(season_teams::columns::SEASON_ID, season_id),
        )
        .await?;

    let teams: Vec<teams::Model> = store
        .select(
            teams::TABLE,
            &Query::new().is_in(teams::columns::ID, records.iter().map(|r| r.team_id)),
        )
        .await?;
    let names: HashMap<Uuid, &str> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();

    standings::rank(&mut records);

    println!(
        "{:<24} {:>3} {:>3} {:>3} {:>5} {:>6}",
        "team", "W", "L", "T", "TD+/-", "YDS+/-"
    );

    for record in &records {
        let counters = &record.counters;

        println!(
            "{:<24} {:>3} {:>3} {:>3} {:>+5} {:>+6}",
            names.get(&record.team_id).copied().unwrap_or("?"),
            counters.wins,
            counters.losses,
            counters.ties,
            counters.td_diff(),
            counters.yard_diff(),
        );
    }

    Ok(())
}
