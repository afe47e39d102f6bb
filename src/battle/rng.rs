use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of every random decision made during a battle.
///
/// `reason` labels the draw; it shows up in trace logs and in the panic message
/// of the scripted oracle when it runs dry.
pub trait BattleRng {
    /// A uniform value in `[0, 1)`.
    fn unit(&mut self, reason: &str) -> f64;

    /// A uniform integer in `[low, high]`.
    fn int_inclusive(&mut self, low: i32, high: i32, reason: &str) -> i32;
}

impl<R: BattleRng + ?Sized> BattleRng for &mut R {
    fn unit(&mut self, reason: &str) -> f64 {
        (**self).unit(reason)
    }

    fn int_inclusive(&mut self, low: i32, high: i32, reason: &str) -> i32 {
        (**self).int_inclusive(low, high, reason)
    }
}

/// Seeded ChaCha stream. Identical seeds give identical battles on every
/// platform.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Derives an independent stream for one battle, so battles can run in
    /// any order (or in parallel) and still reproduce.
    pub fn for_battle(seed: u64, battle_id: u64) -> Self {
        let mixed = seed ^ battle_id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::new(mixed)
    }
}

impl BattleRng for SeededRng {
    fn unit(&mut self, reason: &str) -> f64 {
        let value: f64 = self.inner.random();
        tracing::trace!(value, reason, "rng draw");
        value
    }

    fn int_inclusive(&mut self, low: i32, high: i32, reason: &str) -> i32 {
        let value = if low >= high {
            low
        } else {
            self.inner.random_range(low..=high)
        };
        tracing::trace!(value, low, high, reason, "rng draw");
        value
    }
}

/// Pre-scripted outcomes for tests.
///
/// Every draw consumes one value in `[0, 1)`. `unit` returns it directly and
/// `int_inclusive` maps it onto the range as `low + floor(u * len)`.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<f64>,
    index: usize,
    cycle: bool,
}

impl ScriptedRng {
    /// Panics when more draws are requested than values supplied.
    pub fn new(outcomes: Vec<f64>) -> Self {
        Self {
            outcomes,
            index: 0,
            cycle: false,
        }
    }

    /// Wraps around to the first value when the script runs out.
    pub fn cycling(outcomes: Vec<f64>) -> Self {
        assert!(!outcomes.is_empty(), "a cycling script needs at least one value");
        Self {
            outcomes,
            index: 0,
            cycle: true,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }

    fn next_outcome(&mut self, reason: &str) -> f64 {
        if self.index >= self.outcomes.len() {
            if self.cycle {
                self.index = 0;
            } else {
                panic!(
                    "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more scripted values.",
                    reason
                );
            }
        }
        let outcome = self.outcomes[self.index];
        self.index += 1;
        if self.cycle && self.index == self.outcomes.len() {
            self.index = 0;
        }
        outcome
    }
}

impl BattleRng for ScriptedRng {
    fn unit(&mut self, reason: &str) -> f64 {
        self.next_outcome(reason)
    }

    fn int_inclusive(&mut self, low: i32, high: i32, reason: &str) -> i32 {
        let outcome = self.next_outcome(reason);
        if low >= high {
            return low;
        }
        let span = (high - low + 1) as f64;
        let offset = (outcome.clamp(0.0, 1.0) * span).floor() as i32;
        (low + offset).min(high)
    }
}
