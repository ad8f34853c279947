//! Time constants and pure time functions (§6). Internally all time is an
//! integer millisecond count; ISO-8601 strings exist only at the
//! serialization boundary (see [`crate::request`]).

/// Length of one in-game "hour" in real milliseconds.
pub const GAME_HOUR_MS: i64 = 10 * 60 * 1000;

/// Length of one in-game "day" (24 in-game hours) in real milliseconds.
pub const GAME_DAY_MS: i64 = 24 * GAME_HOUR_MS;

/// Milliseconds an NPC waits after finishing a walk before acting.
pub const WAIT_AFTER_WALK_MS: i64 = 2000;

/// Milliseconds an NPC waits after a harvest completes before picking up
/// the spawned item.
pub const WAIT_AFTER_PICKUP_MS: i64 = 2000;

/// Milliseconds of simulated time per pixel of Manhattan travel.
pub const MS_PER_PIXEL: i64 = 10;

/// How far the scan clock jumps forward when no NPC is ready to act.
pub const IDLE_SCAN_STEP_MS: i64 = 1000;

/// Day/night time: milliseconds since midnight, modulo the 4-hour day.
/// A pure function over wall-clock time, used only for NPC scheduling.
pub fn day_time_ms(wall_clock_ms: i64) -> i64 {
    wall_clock_ms.rem_euclid(GAME_DAY_MS)
}
