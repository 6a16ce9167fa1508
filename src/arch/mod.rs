//! # Architecture Abstraction Layer
//!
//! Hardware boundary of the scheduler. The Cortex-M3 port holds all
//! inline assembly and memory-mapped register access and is compiled only
//! for the embedded target; the tick arithmetic below is plain `core`
//! code so it stays testable on the host.

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod cortex_m3;

/// SysTick reload count for a desired tick rate: the counter runs from
/// `reload` down to zero inclusive, hence the minus one.
pub const fn systick_reload(clock_hz: u32, tick_hz: u32) -> u32 {
    clock_hz / tick_hz - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SYSTEM_CLOCK_HZ, TICK_HZ};

    #[test]
    fn test_reload_for_1khz_at_8mhz() {
        assert_eq!(systick_reload(8_000_000, 1000), 7999);
        assert_eq!(systick_reload(SYSTEM_CLOCK_HZ, TICK_HZ), 7999);
    }
}
