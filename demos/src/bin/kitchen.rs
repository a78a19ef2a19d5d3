//! A kitchen timer built from deferred calls
//!
//! SysTick advances the platform's tick counter; the main loop drains due
//! callbacks and sleeps. The short timer re-arms itself each time it rings.

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]
#![no_main]

use snooze::{CortexM, Platform, Scheduler};

use snooze_demos as _;

const SYSTICKS_PER_SCHED_TICK: u32 = 100_000;

static PLATFORM: CortexM = CortexM::new();

static SCHEDULER: Scheduler<'static, &'static CortexM, 8> = Scheduler::new(&PLATFORM);

#[cortex_m_rt::entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();

    let mut syst = cp.SYST;
    syst.set_reload(SYSTICKS_PER_SCHED_TICK);
    syst.set_clock_source(cortex_m::peripheral::syst::SystClkSource::Core);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    defmt::info!("kitchen timer up, {=usize} slots", SCHEDULER.capacity());

    SCHEDULER.schedule(5, &ding).unwrap();
    SCHEDULER.schedule(30, &dong).unwrap();

    loop {
        if SCHEDULER.poll() == 0 {
            PLATFORM.sleep();
        }
    }
}

/// Rings every five ticks
fn ding() {
    defmt::info!("ding!");
    // re-arm; if the store is somehow full, skip a beat
    let _ = SCHEDULER.schedule(5, &ding);
}

/// Rings once
fn dong() {
    defmt::info!("DONG - the egg is ready");
}

/// SysTick handler - one scheduler tick per interrupt
#[cortex_m_rt::exception]
fn SysTick() {
    PLATFORM.advance();
}

// Log scheduler ticks in the defmt logs
defmt::timestamp!("{=u32:010}", PLATFORM.now());

// End of File
