pub mod mob;
pub mod valuation;

/// Agents closer than or equal to this range link into the same mob.
pub const DEFAULT_LINK_RANGE: u32 = 2;
