//! # Stack Frame Builder
//!
//! Fabricates the initial execution frame for a task that has never run,
//! so that the very first "resume" of the task is indistinguishable from
//! a resume after a real preemption that happened to land on its first
//! instruction.
//!
//! ## Frame Layout (top = high address, growing down)
//!
//! ```text
//! [Hardware-restored half]     popped by the exception return
//!   xPSR  (Thumb bit set)
//!   PC    (task entry point)
//!   LR    (EXC_RETURN sentinel: thread mode, process stack)
//!   R12   (0)
//!   R3    (0)
//!   R2    (0)
//!   R1    (0)
//!   R0    (0)
//! [Software-restored half]     popped by the SysTick handler
//!   R11   (0)
//!   ...
//!   R4    (0)                <- pointer returned by `build`
//! ```
//!
//! The two halves are a matched pair: the context-switch handler pushes
//! and pops exactly the software half, the hardware pushes and pops
//! exactly its own half. An unpaired save or restore corrupts the task's
//! stack permanently.

/// Registers the switch handler saves and restores by hand (R4–R11).
pub const SW_FRAME_WORDS: usize = 8;

/// Registers the exception entry/return machinery stacks automatically
/// (R0–R3, R12, LR, PC, xPSR).
pub const HW_FRAME_WORDS: usize = 8;

/// Full execution frame, both halves.
pub const FRAME_WORDS: usize = SW_FRAME_WORDS + HW_FRAME_WORDS;

/// Initial xPSR: only the Thumb bit. Cortex-M executes Thumb-2 exclusively
/// and faults on an exception return that clears this bit.
pub const INITIAL_XPSR: u32 = 0x0100_0000;

/// EXC_RETURN value meaning "resume in thread mode using the process
/// stack pointer". Placed in the frame's LR slot, so a task starts with
/// this sentinel in LR; tasks never return, so it is never branched to.
pub const EXC_RETURN_THREAD_PSP: u32 = 0xFFFF_FFFD;

// Word indices relative to the pointer `build` returns.
const LR_SLOT: usize = SW_FRAME_WORDS + 5;
const PC_SLOT: usize = SW_FRAME_WORDS + 6;
const XPSR_SLOT: usize = SW_FRAME_WORDS + 7;

/// Write a task's initial execution frame below `stack_top` and return
/// the resulting stack pointer.
///
/// `stack_top` is aligned down to 8 bytes first (AAPCS stack alignment).
/// The returned pointer is what gets recorded as the task's saved PSP:
/// installing it and performing an exception return (after the handler
/// pops the software half) transfers control to `entry` with a zeroed
/// register set.
///
/// # Safety
/// `stack_top` must be the top of a writable region at least
/// `FRAME_WORDS` words deep (validated at configuration time, see
/// `config.rs`), exclusively owned by the task being built.
pub unsafe fn build(stack_top: *mut u32, entry: usize) -> *mut u32 {
    let aligned_top = (stack_top as usize) & !0x07;
    let frame = (aligned_top as *mut u32).sub(FRAME_WORDS);

    // Both halves zeroed, then the three meaningful hardware slots.
    for i in 0..FRAME_WORDS {
        frame.add(i).write(0);
    }
    frame.add(LR_SLOT).write(EXC_RETURN_THREAD_PSP);
    frame.add(PC_SLOT).write(entry as u32);
    frame.add(XPSR_SLOT).write(INITIAL_XPSR);

    frame
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
