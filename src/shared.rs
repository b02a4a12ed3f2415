use crate::{
    config::Config,
    store::{RestStore, StoreTrait},
    Result,
};
use rand::{
    rngs::{adapter::ReseedingRng, OsRng},
    Rng, SeedableRng,
};
use rand_chacha::ChaCha20Core;
use std::sync::Arc;

/// What a batch run needs: a store, its configuration and a source of
/// randomness for the schedule and the game simulator.
pub trait SharedTrait: Send + Sync + Clone + 'static {
    type Store: StoreTrait;
    type Rand: Rng;

    fn store(&self) -> &Self::Store;
    fn config(&self) -> &Config;
    fn rng(&self) -> Self::Rand;
}

pub struct Shared {
    store: RestStore,
    config: Config,
}

impl Shared {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let store = RestStore::new(&config)?;

        Ok(Arc::new(Self { store, config }))
    }
}

thread_local! {
    static CHACHA_THREAD_RNG: ReseedingRng<ChaCha20Core, OsRng> = {
        let rng = ChaCha20Core::from_entropy();
        ReseedingRng::new(rng, 1024*64, OsRng)
    }
}

impl SharedTrait for Arc<Shared> {
    type Store = RestStore;
    type Rand = ReseedingRng<ChaCha20Core, OsRng>;

    fn store(&self) -> &Self::Store {
        &self.store
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn rng(&self) -> Self::Rand {
        CHACHA_THREAD_RNG.with(|x| x.clone())
    }
}
