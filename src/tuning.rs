//! Best-effort host tuning for low forwarding latency.
//!
//! These steps only affect latency jitter, never correctness: a
//! failure degrades real-time behavior and nothing else, so each
//! attempt yields a warning value instead of an error.

use thread_priority::{ThreadPriority, set_current_thread_priority};

/// A host tuning step that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningWarning {
    /// Elevated scheduling priority was refused.
    RealtimePriority(String),
    /// Locking the process address space into RAM was refused.
    MemoryLock(String),
}

impl std::fmt::Display for TuningWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RealtimePriority(reason) => {
                write!(
                    f,
                    "Failed to set real-time priority: {reason} (run as root or grant CAP_SYS_NICE for best latency)"
                )
            }
            Self::MemoryLock(reason) => {
                write!(
                    f,
                    "Failed to lock memory: {reason} (run as root for best real-time behavior)"
                )
            }
        }
    }
}

/// Apply all best-effort tuning steps once, before the loop starts.
///
/// Returns the warnings for every step that failed; an empty vector
/// means the host accepted all of them.
pub fn apply_realtime_tuning() -> Vec<TuningWarning> {
    let mut warnings = Vec::new();

    if let Err(w) = lock_memory() {
        warnings.push(w);
    }
    if let Err(w) = set_realtime_priority() {
        warnings.push(w);
    }

    warnings
}

/// Request the maximum scheduling priority for the current thread.
pub fn set_realtime_priority() -> Result<(), TuningWarning> {
    set_current_thread_priority(ThreadPriority::Max)
        .map_err(|e| TuningWarning::RealtimePriority(format!("{e:?}")))
}

/// Lock current and future pages into RAM to avoid page faults.
#[cfg(target_os = "linux")]
pub fn lock_memory() -> Result<(), TuningWarning> {
    use nix::sys::mman::{MlockAllFlags, mlockall};

    mlockall(MlockAllFlags::MCL_CURRENT | MlockAllFlags::MCL_FUTURE)
        .map_err(|e| TuningWarning::MemoryLock(e.to_string()))
}

/// Memory locking is unavailable on this platform.
#[cfg(not(target_os = "linux"))]
pub fn lock_memory() -> Result<(), TuningWarning> {
    Err(TuningWarning::MemoryLock(
        "not supported on this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = TuningWarning::MemoryLock("EPERM".to_string());
        assert_eq!(
            format!("{w}"),
            "Failed to lock memory: EPERM (run as root for best real-time behavior)"
        );
    }

    #[test]
    fn test_apply_never_panics() {
        // Outcome depends on privileges; only the warning shape is stable.
        for warning in apply_realtime_tuning() {
            assert!(!format!("{warning}").is_empty());
        }
    }
}
