//! # Synchronization
//!
//! Interrupt-safe critical section wrapper for the Cortex-M3. After boot
//! the SysTick handler is the sole reader and writer of scheduler state,
//! so the only critical section in the system guards the boot-time frame
//! building that happens before the tick is armed.

use cortex_m::interrupt;

/// Execute a closure with interrupts disabled, restoring them on exit.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&interrupt::CriticalSection) -> R,
{
    interrupt::free(f)
}
