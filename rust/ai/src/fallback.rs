use fivedraw_engine::policy::{Decision, PolicyAction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Uniformly random action with full strength. Used when a policy has no
/// answer for a hand.
#[derive(Debug, Clone)]
pub struct RandomFallback {
    rng: ChaCha20Rng,
}

impl RandomFallback {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn decide(&mut self) -> Decision {
        let i = self.rng.random_range(0..PolicyAction::ALL.len());
        Decision {
            action: PolicyAction::ALL[i],
            strength: 1.0,
        }
    }
}
