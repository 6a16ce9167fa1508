//! # Configuration
//!
//! Compile-time constants governing the scheduler and the memory layout.
//! Everything is fixed at build time — the task set, the stack carving and
//! the tick rate cannot change while the system runs.

use crate::frame::FRAME_WORDS;
use crate::task::StackRegion;

/// Number of task slots. The scheduler rotates over exactly this many
/// tasks; there is no dynamic registration and no idle fallback.
pub const MAX_TASKS: usize = 4;

/// SysTick frequency in Hz. Every tick performs one context switch, so
/// this is also the task quantum (1 kHz = 1 ms per task).
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz. The STM32F103 runs from the 8 MHz HSI
/// out of reset, and SysTick uses the core clock as its time base.
pub const SYSTEM_CLOCK_HZ: u32 = 8_000_000;

/// Per-task stack size in bytes. Must hold at least one full execution
/// frame (16 words); anything beyond that is the task's working space.
pub const STACK_SIZE: usize = 1024;

/// One past the last byte of SRAM (20 KiB on the STM32F103C8T6).
/// Task stacks are carved downward from here.
pub const SRAM_END: usize = 0x2000_0000 + 20 * 1024;

/// Top of the handler-mode (MSP) stack: everything below the task stacks.
/// memory.x limits the linker's RAM to this same address, so the stack the
/// kernel and the exception handlers run on never touches a task stack.
pub const SCHED_STACK_START: usize = SRAM_END - MAX_TASKS * STACK_SIZE;

/// Stack region for a task slot: `STACK_SIZE` slices packed downward from
/// the end of SRAM. Slot 0 gets the topmost slice.
pub const fn task_stack(slot: usize) -> StackRegion {
    StackRegion::new(SRAM_END - (slot + 1) * STACK_SIZE, STACK_SIZE)
}

// A stack that cannot hold the fabricated frame is a configuration error,
// not a runtime condition.
const _: () = assert!(STACK_SIZE >= FRAME_WORDS * core::mem::size_of::<u32>());
const _: () = assert!(STACK_SIZE % 8 == 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_stacks_disjoint() {
        for i in 0..MAX_TASKS {
            for j in 0..MAX_TASKS {
                if i != j {
                    assert!(!task_stack(i).overlaps(&task_stack(j)));
                }
            }
        }
    }

    #[test]
    fn test_handler_stack_below_task_stacks() {
        for i in 0..MAX_TASKS {
            assert!(task_stack(i).base >= SCHED_STACK_START);
        }
    }

    #[test]
    fn test_slot_zero_topmost() {
        assert_eq!(task_stack(0).top(), SRAM_END);
        assert_eq!(task_stack(MAX_TASKS - 1).base, SCHED_STACK_START);
    }

    #[test]
    fn test_handler_stack_is_the_reset_msp() {
        // memory.x ends RAM at this address, so the reset-vector MSP and
        // the scheduler stack top are the same thing. Boot runs on that
        // stack until the launch rehomes MSP to the identical value; the
        // boot path stays valid only while these stay equal.
        assert_eq!(SCHED_STACK_START, 0x2000_4000);
        assert_eq!(SCHED_STACK_START, SRAM_END - 4 * 1024);
    }
}
