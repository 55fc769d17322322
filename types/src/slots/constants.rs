/// Credits granted to a freshly created session
pub const STARTING_CREDITS: u64 = 10;

/// Credits deducted for every roll
pub const PLAY_COST: u64 = 1;

/// Number of reels (symbols) in a roll
pub const REELS: usize = 3;

/// Projected balance below which a win is never suppressed
pub const SUPPRESSION_LOW_THRESHOLD: u64 = 40;

/// Projected balance above which the high suppression rate applies (inclusive
/// upper bound of the low band)
pub const SUPPRESSION_HIGH_THRESHOLD: u64 = 60;

/// Chance a win is suppressed when the projected balance is in [40, 60]
pub const SUPPRESSION_CHANCE_LOW: f64 = 0.3;

/// Chance a win is suppressed when the projected balance is above 60
pub const SUPPRESSION_CHANCE_HIGH: f64 = 0.6;

/// Upper bound on roll records returned by a single audit lookup
pub const MAX_ROLLS_PER_LOOKUP: u64 = 10_000;

/// Error codes for SlotsError
pub const ERROR_SESSION_NOT_FOUND: u8 = 1;
pub const ERROR_SESSION_NOT_FOUND_OR_INACTIVE: u8 = 2;
pub const ERROR_INSUFFICIENT_CREDITS: u8 = 3;
pub const ERROR_INTERNAL: u8 = 255;
