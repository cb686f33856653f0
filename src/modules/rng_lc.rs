use crate::constants::rand48;
use crate::types::error::SolveError;
use crate::types::jump::Jump;
use crate::types::types::*;

/// Linear congruential generator over a power-of-two modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngLC {
    multiplier: u64,
    increment: u64,
    modulus_bits: u32,
    inverse_multiplier: u64,
}

impl RngLC {
    /// The 48-bit `drand48` generator.
    pub fn new() -> Self {
        Self {
            multiplier: rand48::MULTIPLIER,
            increment: rand48::INCREMENT,
            modulus_bits: rand48::MODULUS_BITS,
            inverse_multiplier: 0xdfe05bcb1365,
        }
    }

    pub fn with_params(multiplier: u64, increment: u64, modulus_bits: u32) -> Result<Self, SolveError> {
        if !(2..=62).contains(&modulus_bits) {
            return Err(SolveError::InvalidGenerator {
                reason: "modulus must be 2^2 ..= 2^62",
            });
        }

        let mask = (1u64 << modulus_bits) - 1;

        if multiplier & 1 == 0 || multiplier > mask {
            return Err(SolveError::InvalidGenerator {
                reason: "multiplier must be odd and below the modulus",
            });
        }

        if increment > mask {
            return Err(SolveError::InvalidGenerator {
                reason: "increment must be below the modulus",
            });
        }

        // Newton iteration doubles the correct low bits each round; odd a is its own inverse mod 8.
        let mut inverse = multiplier;
        for _ in 0..5 {
            inverse = inverse.wrapping_mul(2u64.wrapping_sub(multiplier.wrapping_mul(inverse)));
        }

        return Ok(Self {
            multiplier,
            increment,
            modulus_bits,
            inverse_multiplier: inverse & mask,
        });
    }

    pub fn multiplier(&self) -> u64 {
        return self.multiplier;
    }

    pub fn increment(&self) -> u64 {
        return self.increment;
    }

    pub fn modulus_bits(&self) -> u32 {
        return self.modulus_bits;
    }

    pub fn inverse_multiplier(&self) -> u64 {
        return self.inverse_multiplier;
    }

    pub fn modulus(&self) -> u64 {
        return 1u64 << self.modulus_bits;
    }

    pub fn mask(&self) -> u64 {
        return self.modulus() - 1;
    }

    pub fn next(&self, seed: Seed) -> Seed {
        return self.multiplier.wrapping_mul(seed).wrapping_add(self.increment) & self.mask();
    }

    pub fn prev(&self, seed: Seed) -> Seed {
        return self.inverse_multiplier.wrapping_mul(seed.wrapping_sub(self.increment)) & self.mask();
    }

    /// `floor(seed * modulus / m)`, computed exactly.
    pub fn roll(&self, seed: Seed, modulus: Modulus) -> Roll {
        return ((seed as u128 * modulus as u128) >> self.modulus_bits) as Roll;
    }

    pub fn step(&self) -> Jump {
        return Jump {
            multiplier: self.multiplier,
            increment: self.increment,
        };
    }

    pub fn inverse_step(&self) -> Jump {
        return Jump {
            multiplier: self.inverse_multiplier,
            increment: self.inverse_multiplier.wrapping_mul(self.increment).wrapping_neg() & self.mask(),
        };
    }

    /// Closed form of `n` steps, by repeated squaring.
    pub fn jump(&self, n: Steps) -> Jump {
        return self.compose_power(self.step(), n);
    }

    pub fn inverse_jump(&self, n: Steps) -> Jump {
        return self.compose_power(self.inverse_step(), n);
    }

    pub fn advance(&self, seed: Seed, n: Steps) -> Seed {
        return self.jump(n).apply(seed, self.mask());
    }

    pub fn rewind(&self, seed: Seed, n: Steps) -> Seed {
        return self.inverse_jump(n).apply(seed, self.mask());
    }

    fn compose_power(&self, unit: Jump, n: Steps) -> Jump {
        let mask = self.mask();
        let mut unit = unit;
        let mut result = Jump::IDENTITY;
        let mut remaining = n;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.then(&unit, mask);
            }
            unit = unit.then(&unit, mask);
            remaining >>= 1;
        }

        return result;
    }
}

impl Default for RngLC {
    fn default() -> Self {
        Self::new()
    }
}
