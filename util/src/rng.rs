use std::fmt;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand_xorshift::XorShiftRng;

/// Construct a throwaway random number generator seeded by a noise value.
///
/// Good for short-term use in immutable contexts given a varying source of
/// noise like map position coordinates.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

/// Deciban log-odds type.
///
/// Expresses a probability, but in a form that is easier to reason about and
/// calculate with in some conditions.
///
/// Inner value is integer because video games, YAGNI more precision.
///
/// See <https://en.wikipedia.org/wiki/Hartley_(unit)>
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Odds(pub i32);

impl Odds {
    pub fn prob(self) -> f32 {
        1.0 - 1.0 / (1.0 + 10.0f32.powf(self.0 as f32 / 10.0))
    }
}

impl Distribution<bool> for Odds {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_range(0.0..1.0) < self.prob()
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
