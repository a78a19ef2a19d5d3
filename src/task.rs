//! Holds the [`TaskId`] and [`TaskFn`] types and the tick arithmetic

/// The platform's monotonic time unit.
///
/// Hardware tick counters wrap modulo 2^32; all comparisons on `Tick` values
/// go through [`is_due`] so that wrapping is handled.
pub type Tick = u32;

/// A deferred callback.
///
/// The closure carries whatever state it captured, runs to completion
/// exactly once per due occurrence, and is always invoked with the critical
/// section released. `Sync` because the same reference may be observed from
/// interrupt and thread context.
pub type TaskFn<'a> = &'a (dyn Fn() + Sync);

/// Is `at` at or before `now` on the wrapping tick circle?
///
/// Reinterpreting the difference as signed keeps this correct across counter
/// wraparound, for outstanding delays of up to half the tick range (±2^31).
pub(crate) fn is_due(now: Tick, at: Tick) -> bool {
    now.wrapping_sub(at) as i32 >= 0
}

/// Identifies a pending task, for cancellation and replacement.
///
/// Minted by [`Scheduler::schedule`](crate::Scheduler::schedule); ids count
/// up from 1 and stay unique among pending tasks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskId(pub(crate) u32);

#[cfg(feature = "defmt")]
impl defmt::Format for TaskId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "T{=u32:03}", self.0);
    }
}

impl core::fmt::Display for TaskId {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "T{:03}", self.0)
    }
}

/// One entry in the task store
#[derive(Copy, Clone)]
pub(crate) struct Task<'a> {
    /// Absolute tick at which the task becomes due
    pub(crate) run_at: Tick,
    /// What to call when it does
    pub(crate) callback: TaskFn<'a>,
    /// Handle for cancellation and replacement
    pub(crate) id: TaskId,
}

impl core::fmt::Debug for Task<'_> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fmt.debug_struct("Task")
            .field("run_at", &self.run_at)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
