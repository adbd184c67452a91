//! Monotonic timestamp source for forwarded packets.

use std::sync::OnceLock;
use std::time::Instant;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Get the current monotonic time in nanoseconds.
///
/// On Linux this reads `CLOCK_MONOTONIC`, so timestamps match other
/// tooling on the same host. Elsewhere (and if the clock read fails)
/// it falls back to nanoseconds since the first call in this process.
/// Values are non-decreasing within one gateway's uptime and are not
/// comparable across machines or restarts.
pub fn now_ns() -> u64 {
    #[cfg(target_os = "linux")]
    {
        use nix::time::{ClockId, clock_gettime};

        if let Ok(ts) = clock_gettime(ClockId::CLOCK_MONOTONIC) {
            return ts.tv_sec() as u64 * NANOS_PER_SEC + ts.tv_nsec() as u64;
        }
    }

    fallback_ns()
}

fn fallback_ns() -> u64 {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = ORIGIN.get_or_init(Instant::now);
    let nanos = origin.elapsed().as_nanos();
    u64::try_from(nanos).unwrap_or(u64::MAX)
}
