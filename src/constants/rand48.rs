pub const MULTIPLIER: u64 = 0x5deece66d;
pub const INCREMENT: u64 = 0xb;
pub const MODULUS_BITS: u32 = 48;

// 2^48 leaves float64 about 4 bits of headroom, so 5 epsilons of outward
// rounding keep every exact bound inside the computed interval.
// Re-derive this if MODULUS_BITS grows.
pub const EPSILON_MARGIN: f64 = 5.0 * f64::EPSILON;
