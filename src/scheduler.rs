//! Contains the [`Scheduler`] type

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::cell::UnsafeCell;

use crate::platform::Platform;
use crate::queue::TaskQueue;
use crate::task::{Task, TaskFn, TaskId, Tick};

/// Error returned when the task store has no free slot.
///
/// The request is dropped without touching any pending task; re-submitting
/// is the caller's job.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

impl core::fmt::Display for QueueFull {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "no free task slot")
    }
}

/// State shared between execution contexts.
///
/// Only ever touched inside the platform's critical section.
struct Inner<'a, const N: usize> {
    /// Pending tasks, sorted by due time
    queue: TaskQueue<'a, N>,
    /// Next id to mint
    next_id: u32,
}

/// A deferred-call scheduler.
///
/// Holds up to `N` pending callbacks and runs each one once its tick
/// deadline passes, from [`Scheduler::poll`] on the main loop. Tasks can be
/// scheduled and cancelled from interrupt handlers as well as from thread
/// code, including from inside a running callback; the platform's critical
/// section keeps the store consistent, and is always released before a
/// callback runs, so interrupts stay enabled while user code executes.
///
/// Deadlines use the platform's wrapping tick counter and stay correct
/// across counter wraparound for delays up to half the tick range. A delay
/// is a minimum: a due task runs at the next `poll`, so jitter is bounded
/// by how often the main loop polls.
pub struct Scheduler<'a, P, const N: usize> {
    /// Where we get ticks, critical sections and sleep from
    platform: P,
    /// Everything the critical section protects
    inner: UnsafeCell<Inner<'a, N>>,
}

/// SAFETY: the inner state is only ever accessed inside
/// [`Platform::critical_section`], which excludes interrupt-context and
/// thread-context mutators from one another, and callbacks only run from
/// `poll` after the section is released.
unsafe impl<'a, P: Sync, const N: usize> Sync for Scheduler<'a, P, N> {}

impl<'a, P: Platform, const N: usize> Scheduler<'a, P, N> {
    /// Build a scheduler on top of the given platform.
    ///
    /// `N` is the most tasks that can be pending at once, fixed for the
    /// lifetime of the scheduler. Everything is stored inline; nothing
    /// here allocates.
    pub const fn new(platform: P) -> Scheduler<'a, P, N> {
        Scheduler {
            platform,
            inner: UnsafeCell::new(Inner {
                queue: TaskQueue::new(),
                next_id: 1,
            }),
        }
    }

    /// Run `f` on the inner state, inside the critical section.
    fn locked<R>(&self, f: impl FnOnce(&mut Inner<'a, N>) -> R) -> R {
        self.platform.critical_section(|| {
            // SAFETY: the critical section makes this the only live access,
            // and no user callback runs while it is held, so `f` cannot
            // re-enter.
            f(unsafe { &mut *self.inner.get() })
        })
    }

    /// Schedule `callback` to run `delay` ticks from now.
    ///
    /// A `delay` of zero means "run on the next poll". Returns the id to
    /// use for [`Scheduler::unschedule`] or [`Scheduler::reschedule`], or
    /// [`QueueFull`] if all `N` slots are taken - in which case nothing is
    /// stored and pending tasks are unaffected.
    ///
    /// Callable from interrupt context. Never invokes the callback itself.
    ///
    /// Ids are minted from a counter that wraps after 2^32 - 1 schedules;
    /// a wrapped counter could in principle mint an id equal to one still
    /// pending. No guard is attempted - at any realistic schedule rate the
    /// window is of no practical concern.
    pub fn schedule(&self, delay: Tick, callback: TaskFn<'a>) -> Result<TaskId, QueueFull> {
        let run_at = self.platform.now().wrapping_add(delay);
        let result = self.locked(|inner| {
            let id = TaskId(inner.next_id);
            inner
                .queue
                .insert(Task {
                    run_at,
                    callback,
                    id,
                })
                .map_err(|_| QueueFull)?;
            inner.next_id = inner.next_id.wrapping_add(1);
            Ok(id)
        });
        match result {
            Ok(id) => trace!("scheduled {} to run at {}", id, run_at),
            Err(_) => warn!("task store full, request dropped"),
        }
        result
    }

    /// Replace whatever is pending under `id` with a fresh deadline and
    /// callback, keeping the id.
    ///
    /// The removal and the insertion happen in one critical section, so no
    /// observer can see the id missing in between. If nothing is pending
    /// under `id` this degrades to a fresh schedule under that same id.
    /// Returns [`QueueFull`] if the store is full and `id` was not in it.
    pub fn reschedule(
        &self,
        id: TaskId,
        delay: Tick,
        callback: TaskFn<'a>,
    ) -> Result<TaskId, QueueFull> {
        let run_at = self.platform.now().wrapping_add(delay);
        let result = self.locked(|inner| {
            inner.queue.remove(id);
            inner
                .queue
                .insert(Task {
                    run_at,
                    callback,
                    id,
                })
                .map_err(|_| QueueFull)?;
            Ok(id)
        });
        match result {
            Ok(id) => trace!("rescheduled {} to run at {}", id, run_at),
            Err(_) => warn!("task store full, request dropped"),
        }
        result
    }

    /// Cancel the task pending under `id`.
    ///
    /// Quietly does nothing if there isn't one, so cancelling twice (or
    /// after the task has run) is fine. A cancellation racing `poll` over
    /// the same task either wins (the task never runs) or loses (it runs
    /// normally); callers needing more than that must synchronise outside
    /// the scheduler.
    pub fn unschedule(&self, id: TaskId) {
        let removed = self.locked(|inner| inner.queue.remove(id));
        if removed {
            debug!("cancelled {}", id);
        }
    }

    /// Run every task that is due, and return how many ran.
    ///
    /// Call this from the main loop, and only from there. The tick is read
    /// once at entry; each due task is copied out of the store under the
    /// critical section, then invoked after the section is released, so the
    /// callback runs with interrupts enabled and may schedule or cancel
    /// freely. Once the store drains empty the poll ends - work queued by a
    /// callback after that point waits for the next poll.
    pub fn poll(&self) -> usize {
        let now = self.platform.now();
        let mut ran = 0;
        loop {
            let popped = self.locked(|inner| {
                inner
                    .queue
                    .pop_due(now)
                    .map(|task| (task, inner.queue.len()))
            });
            let Some((task, left)) = popped else {
                break;
            };
            trace!("running {} at {}", task.id, now);
            // Interrupts are live again from here
            (task.callback)();
            ran += 1;
            if left == 0 {
                break;
            }
        }
        ran
    }

    /// How many tasks are pending
    pub fn pending(&self) -> usize {
        self.locked(|inner| inner.queue.len())
    }

    /// Is anything pending?
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// The most tasks that can be pending at once
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The tick at which the earliest pending task becomes due.
    ///
    /// Lets a main loop pick how long to sleep before the next poll.
    pub fn next_deadline(&self) -> Option<Tick> {
        self.locked(|inner| inner.queue.next_deadline())
    }
}


// End of File
