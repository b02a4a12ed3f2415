#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod league;
pub mod schedule;
pub mod season;
mod shared;
pub mod sim;
pub mod standings;
pub mod store;
pub mod trigger;

pub use config::Config;
pub use error::{Error, Result};
pub use season::{BatchReport, Progress};
pub use shared::*;

/// Runs one batch as of the current time in the configured zone.
pub async fn run<S: SharedTrait>(shared: S) -> anyhow::Result<BatchReport> {
    let now = trigger::Gate::from_config(shared.config()).now();

    let report = season::run_at(&shared, now).await?;

    if report.fired {
        info!(
            "Batch finished: {} seasons, {} failed",
            report.seasons.len(),
            report.failures()
        );
    }

    Ok(report)
}
