//=========================================================================
// Time Base
//=========================================================================
//
// Maps platform timestamps into the shared epoch timescale
// (microseconds since the Unix epoch).
//
// Architecture:
//   Timestamp::Uptime / UptimeNanos → + (wall_now − uptime_now) skew → µs
//   Timestamp::WallClock            → × 1000                        → µs
//
// The skew is sampled per conversion. Both clock samples are taken back
// to back to bound the error.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Instant, SystemTime, UNIX_EPOCH};

//=== Internal Dependencies ===============================================

use super::event::Timestamp;

//=== Pure Conversions ====================================================

/// Converts an uptime-domain millisecond timestamp to epoch microseconds.
///
/// `1000 * (wall_now + event_uptime − uptime_now)`
pub fn to_epoch_micros(event_uptime_ms: i64, wall_now_ms: i64, uptime_now_ms: i64) -> i64 {
    1000 * (wall_now_ms + event_uptime_ms - uptime_now_ms)
}

/// Converts an uptime-domain nanosecond timestamp to epoch microseconds.
pub fn nanos_to_epoch_micros(event_uptime_ns: i64, wall_now_ms: i64, uptime_now_ms: i64) -> i64 {
    1000 * (wall_now_ms - uptime_now_ms) + event_uptime_ns / 1000
}

/// Converts a wall-clock millisecond timestamp to epoch microseconds.
pub fn wall_clock_to_micros(wall_ms: i64) -> i64 {
    1000 * wall_ms
}

//=== Clock ===============================================================

/// Source of the two "now" samples needed for skew correction.
pub trait Clock: Send {
    /// Milliseconds since the Unix epoch.
    fn wall_clock_millis(&self) -> i64;

    /// Milliseconds on the same clock the platform stamps input with.
    fn uptime_millis(&self) -> i64;
}

/// Default clock backed by `SystemTime` and a monotonic `Instant` origin.
///
/// Uptime is measured from the moment the clock was created. Hosts whose
/// input timestamps use a different origin (e.g. time since boot) should
/// supply their own [`Clock`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wall_clock_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn uptime_millis(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}

//=== TimeBase ============================================================

/// Stateful converter used on a single callback thread.
///
/// Keeps one high-water mark per uptime domain so skew jitter between two
/// clock samples never yields a timestamp earlier than one already emitted
/// from the same source. Input (`Uptime`) and sensor (`UptimeNanos`) stamps
/// come from different platform clocks and never clamp each other.
/// Wall-clock timestamps pass through unclamped: a last known location fix
/// is legitimately older.
pub struct TimeBase {
    clock: Box<dyn Clock>,
    last_micros: [i64; 2],
}

#[derive(Debug, Clone, Copy)]
enum Domain {
    Input = 0,
    Sensor = 1,
}

impl TimeBase {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_micros: [i64::MIN; 2],
        }
    }

    /// Converts `timestamp` to epoch microseconds.
    pub fn normalize(&mut self, timestamp: Timestamp) -> i64 {
        match timestamp {
            Timestamp::WallClock(ms) => wall_clock_to_micros(ms),
            Timestamp::Uptime(ms) => {
                let (wall, uptime) = self.sample();
                self.clamp(Domain::Input, to_epoch_micros(ms, wall, uptime))
            }
            Timestamp::UptimeNanos(ns) => {
                let (wall, uptime) = self.sample();
                self.clamp(Domain::Sensor, nanos_to_epoch_micros(ns, wall, uptime))
            }
        }
    }

    fn sample(&self) -> (i64, i64) {
        let wall = self.clock.wall_clock_millis();
        let uptime = self.clock.uptime_millis();
        (wall, uptime)
    }

    fn clamp(&mut self, domain: Domain, micros: i64) -> i64 {
        let last = &mut self.last_micros[domain as usize];
        *last = (*last).max(micros);
        *last
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
