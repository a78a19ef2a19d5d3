//! Holds the [`Platform`] trait and the Cortex-M implementation

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::task::Tick;

/// The hardware capabilities a [`Scheduler`](crate::Scheduler) needs.
///
/// The scheduler is generic over this trait, so firmware hands it the real
/// hardware and tests hand it a scripted fake. Every method may be called
/// from both interrupt and thread context.
pub trait Platform {
    /// Return the current tick.
    ///
    /// A momentary read of a wrapping, monotonic counter; never requires
    /// the critical section.
    fn now(&self) -> Tick;

    /// Run `f` with all other task-store mutators excluded.
    ///
    /// Must mutually exclude interrupt-context and thread-context callers
    /// for the duration of `f`. The scheduler never nests these sections
    /// and never runs a user callback inside one, so an implementation that
    /// cannot nest is fine.
    fn critical_section<R>(&self, f: impl FnOnce() -> R) -> R;

    /// Idle until something may have happened.
    ///
    /// Not used by the scheduler itself; main loops call it between polls.
    fn sleep(&self);
}

impl<P: Platform> Platform for &P {
    fn now(&self) -> Tick {
        (**self).now()
    }

    fn critical_section<R>(&self, f: impl FnOnce() -> R) -> R {
        (**self).critical_section(f)
    }

    fn sleep(&self) {
        (**self).sleep()
    }
}

/// A [`Platform`] for Arm Cortex-M parts.
///
/// The tick counter lives here and is advanced by the application's
/// periodic interrupt calling [`CortexM::advance`] - typically from the
/// SysTick handler. Critical sections mask interrupts for the whole core.
#[cfg(target_arch = "arm")]
pub struct CortexM {
    /// Current tick count
    ticks: core::sync::atomic::AtomicU32,
}

#[cfg(target_arch = "arm")]
impl CortexM {
    /// Build a platform with the tick counter at zero
    pub const fn new() -> CortexM {
        CortexM {
            ticks: core::sync::atomic::AtomicU32::new(0),
        }
    }

    /// Advance the tick counter by one.
    ///
    /// Call this from your SysTick (or other periodic) interrupt handler.
    pub fn advance(&self) {
        use core::sync::atomic::Ordering;

        #[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
        self.ticks.fetch_add(1, Ordering::Relaxed);

        // No atomic read-modify-write on these cores
        #[cfg(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))]
        cortex_m::interrupt::free(|_| {
            self.ticks.store(
                self.ticks.load(Ordering::Relaxed).wrapping_add(1),
                Ordering::Relaxed,
            );
        });
    }
}

#[cfg(target_arch = "arm")]
impl Platform for CortexM {
    fn now(&self) -> Tick {
        self.ticks.load(core::sync::atomic::Ordering::Relaxed)
    }

    fn critical_section<R>(&self, f: impl FnOnce() -> R) -> R {
        cortex_m::interrupt::free(|_| f())
    }

    fn sleep(&self) {
        cortex_m::asm::wfi();
    }
}

#[cfg(target_arch = "arm")]
impl Default for CortexM {
    fn default() -> CortexM {
        CortexM::new()
    }
}

// End of File
