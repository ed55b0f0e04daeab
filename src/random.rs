//! The source of randomness used to pick item quantities and synthetic prices.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Produces the random values used when generating grocery items.
///
/// List generation never calls a global random function directly so that
/// tests can substitute fixed values.
pub trait RandomSource {
    /// A factor in `[0.5, 2.0)` that scales the base quantity of an item.
    fn scale_factor(&mut self) -> f64;

    /// A made-up price per unit in `[2.0, 10.0)` for items that come without
    /// pricing information.
    fn unit_price(&mut self) -> f64;
}

/// A [RandomSource] backed by a `rand` RNG.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// An RNG seeded from the operating system. It is `Send`, so it can be held
    /// across `.await` points in request handlers.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn scale_factor(&mut self) -> f64 {
        self.rng.gen_range(0.5..2.0)
    }

    fn unit_price(&mut self) -> f64 {
        self.rng.gen_range(2.0..10.0)
    }
}

/// The quantity multiplier for a household: one unit per two people, but
/// never less than one.
pub fn base_multiplier(household_size: u8) -> f64 {
    f64::max(1.0, f64::from(household_size) / 2.0)
}

/// Draw a whole-number quantity of at least one.
pub fn draw_quantity(base_multiplier: f64, random: &mut impl RandomSource) -> u32 {
    let quantity = (base_multiplier * random.scale_factor()).ceil();

    quantity.max(1.0) as u32
}
