//! Coin toss: the call, the flip, and the winner's choice.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::{Rng, SeedableRng, TryRngCore};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::roster::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinFace {
    Heads,
    Tails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossState {
    pub caller: Option<Side>,
    pub call: Option<CoinFace>,
    pub outcome: Option<CoinFace>,
    pub winner: Option<Side>,
    pub decision: Option<TossDecision>,
}

/// The caller wins when the call matches the coin, otherwise the other side does.
pub fn toss_winner(caller: Side, call: CoinFace, outcome: CoinFace) -> Side {
    if call == outcome {
        caller
    } else {
        caller.other()
    }
}

/// Flip a fair coin, independent of any call.
///
/// Draws from the operating system's CSPRNG. If that is unavailable, falls
/// back to a ChaCha generator seeded from the wall clock.
pub fn flip_coin() -> CoinFace {
    match OsRng.try_next_u32() {
        Ok(value) => face_from_bits(value),
        Err(err) => {
            warn!(error = %err, "OS randomness unavailable, using clock-seeded fallback");
            let mut rng = ChaCha8Rng::seed_from_u64(clock_seed());
            flip_coin_with(&mut rng)
        }
    }
}

/// Flip using a caller-supplied generator (deterministic in tests).
pub fn flip_coin_with<R: Rng + ?Sized>(rng: &mut R) -> CoinFace {
    if rng.random::<bool>() {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    }
}

fn face_from_bits(value: u32) -> CoinFace {
    if value & 1 == 0 {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}
