//! Temporary player id allocation
//!
//! Rejection sampling over `[min_id, max_id]` (default `[1, 2^31-1]`): draw a
//! candidate, retry on collision, give up after `max_attempts` draws.
//! Configured bounds are clamped into `[1, 2^31-1]`; an empty range is
//! reported as exhaustion without drawing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::config::{AllocatorConfig, DEFAULT_MAX_ID};
use crate::error::{Result, RosterError};
use crate::models::{HasPlayerId, PlayerId};

#[derive(Debug)]
pub struct IdAllocator {
    config: AllocatorConfig,
    rng: ChaCha8Rng,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(AllocatorConfig::default())
    }
}

impl IdAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(AllocatorConfig { seed: Some(seed), ..AllocatorConfig::default() })
    }

    /// Returns an id present in neither collection.
    pub fn allocate<A, B>(&mut self, existing_a: &[A], existing_b: &[B]) -> Result<PlayerId>
    where
        A: HasPlayerId,
        B: HasPlayerId,
    {
        let taken: HashSet<PlayerId> = existing_a
            .iter()
            .map(HasPlayerId::player_id)
            .chain(existing_b.iter().map(HasPlayerId::player_id))
            .collect();

        let min_id = self.config.min_id.max(1);
        let max_id = self.config.max_id.min(DEFAULT_MAX_ID);
        if min_id > max_id {
            warn!(
                min_id = self.config.min_id,
                max_id = self.config.max_id,
                "temporary id range is empty"
            );
            return Err(RosterError::AllocationExhausted { attempts: 0 });
        }

        for attempt in 1..=self.config.max_attempts {
            let candidate = self.rng.gen_range(min_id..=max_id);
            if !taken.contains(&candidate) {
                debug!(id = candidate, attempt, "allocated temporary player id");
                return Ok(candidate);
            }
        }

        warn!(
            attempts = self.config.max_attempts,
            excluded = taken.len(),
            "temporary id allocation exhausted"
        );
        Err(RosterError::AllocationExhausted { attempts: self.config.max_attempts })
    }
}

/// One-shot allocation with default settings and an entropy-seeded RNG.
pub fn allocate_temporary_id<A, B>(existing_a: &[A], existing_b: &[B]) -> Result<PlayerId>
where
    A: HasPlayerId,
    B: HasPlayerId,
{
    IdAllocator::default().allocate(existing_a, existing_b)
}
