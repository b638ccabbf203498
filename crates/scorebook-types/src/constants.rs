//! System-wide constants for the Scorebook engine.

/// Legal balls in one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Default over limit for a limited-overs innings (T20).
pub const DEFAULT_MATCH_OVER_LIMIT: u32 = 20;

/// Wickets that end an innings.
pub const DEFAULT_MAX_WICKETS: u32 = 10;

/// Maximum runs credited off the bat on a single delivery.
pub const MAX_RUNS_OFF_BAT: u8 = 6;

/// Innings per match in the supported limited-overs format.
pub const INNINGS_PER_MATCH: u8 = 2;

/// Entries kept on the Orange Cap / Purple Cap leaderboards.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Award points per run scored as batter.
pub const DEFAULT_RUN_POINTS: u32 = 1;

/// Award points per wicket taken as bowler.
pub const DEFAULT_WICKET_POINTS: u32 = 20;

/// Single-innings score that counts as a century.
pub const CENTURY_THRESHOLD: u32 = 100;

/// Single-innings score that counts as a half-century.
pub const HALF_CENTURY_THRESHOLD: u32 = 50;

/// Single-innings wickets that count as a five-wicket haul.
pub const FIVE_WICKET_HAUL_THRESHOLD: u32 = 5;

/// Decimal places used for every rate and average handed to callers.
pub const RATE_DECIMAL_PLACES: u32 = 2;

/// League points for a win.
pub const POINTS_FOR_WIN: u32 = 2;

/// League points for a tie, no result or abandoned match.
pub const POINTS_FOR_NO_RESULT: u32 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Scorebook";
