//! Run a callback in N ticks' time.
//!
//! A fixed-capacity deferred-call scheduler for interrupt-driven
//! microcontroller firmware. Code anywhere - the main loop, an interrupt
//! handler, a running callback - asks for "call this in `delay` ticks", and
//! the main loop drains whatever has come due by calling
//! [`Scheduler::poll`]. Callbacks run to completion, in due-time order,
//! with interrupts enabled.
//!
//! There is no allocation anywhere: the pending-task store is an inline
//! array whose capacity is a const generic, and a full store rejects new
//! work rather than growing. Deadlines survive tick-counter wraparound for
//! delays up to half the counter range.
//!
//! The scheduler is generic over a [`Platform`], which supplies the tick
//! counter and the critical section that fences interrupt handlers off the
//! task store. [`CortexM`] implements it for Arm parts; tests and other
//! targets can supply their own.
//!
//! ```
//! use core::sync::atomic::{AtomicU32, Ordering};
//! use snooze::{Platform, Scheduler, Tick};
//!
//! struct Clock(AtomicU32);
//!
//! impl Platform for Clock {
//!     fn now(&self) -> Tick {
//!         self.0.load(Ordering::Relaxed)
//!     }
//!     fn critical_section<R>(&self, f: impl FnOnce() -> R) -> R {
//!         // single-threaded example; real hardware masks interrupts here
//!         f()
//!     }
//!     fn sleep(&self) {}
//! }
//!
//! fn beep() {
//!     // called at tick 10
//! }
//!
//! let clock = Clock(AtomicU32::new(0));
//! let scheduler: Scheduler<&Clock, 8> = Scheduler::new(&clock);
//! scheduler.schedule(10, &beep).unwrap();
//!
//! clock.0.store(9, Ordering::Relaxed);
//! assert_eq!(scheduler.poll(), 0);
//! clock.0.store(10, Ordering::Relaxed);
//! assert_eq!(scheduler.poll(), 1);
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so the other modules see its macros
#[macro_use]
mod fmt;

mod platform;
mod queue;
mod scheduler;
mod task;

#[cfg(target_arch = "arm")]
pub use platform::CortexM;
pub use platform::Platform;
pub use scheduler::{QueueFull, Scheduler};
pub use task::{TaskFn, TaskId, Tick};
