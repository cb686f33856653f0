pub type Seed = u64;
pub type Roll = u64;
pub type Modulus = u64;
pub type Steps = u64;

pub type OriginSeed = Seed; // before the anchor observation's calls
pub type AnchorSeed = Seed; // state that produced the anchor roll
