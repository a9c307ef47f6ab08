//! Unopinionated standalone utilities.

mod geom;
pub use geom::{dda_line, VecExt, DIR_8};

mod interpolate;
pub use interpolate::segment_interpolation;

mod rng;
pub use rng::{srng, Odds};

pub type FastHasher = rustc_hash::FxHasher;

type DefaultHashBuilder = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

/// Insertion order preserving map with an efficient hash function.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, DefaultHashBuilder>;

/// Good default concrete rng.
pub type GameRng = rand_xorshift::XorShiftRng;
