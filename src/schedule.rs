//! Round robin schedule generation with the circle method.

use crate::error::{self, Result};
use rand::Rng;

/// One week of games as `(home, away)` pairs.
pub type Round<T> = Vec<(T, T)>;

/// Every team meets every other team exactly once over `N - 1` rounds.
///
/// The first team stays fixed while the rest rotate one place per round;
/// home and away flip with the round parity.
pub fn round_robin<T: Clone>(teams: &[T]) -> Result<Vec<Round<T>>> {
    let n = teams.len();

    if n % 2 != 0 {
        return Err(error::ODD_TEAM_COUNT);
    }
    if n < 2 {
        return Err(error::TOO_FEW_TEAMS);
    }

    let half = n / 2;
    let fixed = &teams[0];
    let mut ring: Vec<&T> = teams[1..].iter().collect();

    let mut rounds = Vec::with_capacity(n - 1);

    for round in 0..n - 1 {
        let left = std::iter::once(fixed).chain(ring[..half - 1].iter().copied());
        let right = ring[half - 1..].iter().rev().copied();

        let pairs = left
            .zip(right)
            .map(|(a, b)| {
                if round % 2 == 0 {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                }
            })
            .collect();

        rounds.push(pairs);
        ring.rotate_right(1);
    }

    Ok(rounds)
}

/// A full regular season: the round robin plus one extra week that replays
/// a random round with home and away swapped.
///
/// The extra week means one pairing per team is played twice.
pub fn season<T, R>(teams: &[T], rng: &mut R) -> Result<Vec<Round<T>>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut rounds = round_robin(teams)?;

    let replay = rng.gen_range(0..rounds.len());
    let rematch = rounds[replay]
        .iter()
        .map(|(home, away)| (away.clone(), home.clone()))
        .collect();

    rounds.push(rematch);

    Ok(rounds)
}
