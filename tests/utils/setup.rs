use hbfl_sim::{
    league::{self, Created, DEFAULT_NAME},
    store::{MemoryStore, Query, StoreTrait},
    Config, SharedTrait,
};
use entity::{games, season_teams, seasons};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use uuid::Uuid;

/// Shared state backed by the in-memory store and seeded randomness.
#[derive(Clone)]
pub struct Env {
    store: MemoryStore,
    config: Config,
    seed: Arc<AtomicU64>,
}

impl SharedTrait for Env {
    type Store = MemoryStore;
    type Rand = ChaCha8Rng;

    fn store(&self) -> &Self::Store {
        &self.store
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn rng(&self) -> Self::Rand {
        ChaCha8Rng::seed_from_u64(self.seed.fetch_add(1, Ordering::Relaxed))
    }
}

#[allow(unused)]
pub fn setup() -> Env {
    let config = Config::new(
        "http://store.invalid".parse().unwrap(),
        "service-role-key",
    );

    Env {
        store: MemoryStore::new(),
        config,
        seed: Arc::new(AtomicU64::new(0)),
    }
}

impl Env {
    #[allow(unused)]
    pub fn memory(&self) -> &MemoryStore {
        &self.store
    }

    #[allow(unused)]
    pub async fn create_league(&self) -> Created {
        league::create(&self.store, &mut self.rng(), DEFAULT_NAME, None)
            .await
            .unwrap()
    }

    #[allow(unused)]
    pub async fn season(&self, id: Uuid) -> seasons::Model {
        let seasons: Vec<seasons::Model> = self
            .store
            .select(seasons::TABLE, &Query::new().eq(seasons::columns::ID, id))
            .await
            .unwrap();

        seasons.into_iter().next().expect("no such season")
    }

    #[allow(unused)]
    pub async fn games(&self, season_id: Uuid) -> Vec<games::Model> {
        self.store
            .select(
                games::TABLE,
                &Query::new().eq(games::columns::SEASON_ID, season_id),
            )
            .await
            .unwrap()
    }

    #[allow(unused)]
    pub async fn records(&self, season_id: Uuid) -> Vec<season_teams::Model> {
        self.store
            .select(
                season_teams::TABLE,
                &Query::new().eq(season_teams::columns::SEASON_ID, season_id),
            )
            .await
            .unwrap()
    }
}
