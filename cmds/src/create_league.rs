use dotenvy::dotenv;
use hbfl_sim::{
    league::{self, DEFAULT_NAME},
    store::RestStore,
    Config,
};
use std::env::args;
use uuid::Uuid;

/// Usage: `create_league [NAME] [COMMISSIONER_ID]`
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let name = args().nth(1).unwrap_or_else(|| DEFAULT_NAME.to_owned());
    let commissioner = args().nth(2).map(|id| Uuid::parse_str(&id)).transpose()?;

    let config = Config::from_env()?;
    let store = RestStore::new(&config)?;

    let created = league::create(&store, &mut rand::thread_rng(), &name, commissioner).await?;

    println!("league {} ({})", created.league.name, created.league.id);
    println!("season {} ({})", created.season.season_no, created.season.id);

    for team in &created.teams {
        println!("  {:<4} {}", team.abbrev, team.name);
    }

    Ok(())
}
