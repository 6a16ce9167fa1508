//! # Cortex-M3 Port Layer
//!
//! Hardware-specific code for the STM32F103's Cortex-M3 core: SysTick
//! configuration, MSP/PSP stack discipline, the context-switch exception
//! handler and fault-trap enabling.
//!
//! ## Context Switch Mechanism
//!
//! The Cortex-M3 uses a split-stack model:
//! - **MSP** (Main Stack Pointer): used by boot code and all handlers
//! - **PSP** (Process Stack Pointer): used by tasks in Thread mode
//!
//! On exception entry the hardware stacks R0–R3, R12, LR, PC and xPSR
//! onto the process stack. The SysTick handler saves and restores R4–R11
//! by hand, which completes the full context — the switch happens inside
//! the tick itself, there is no deferred PendSV stage because every tick
//! rotates the task set unconditionally.

use core::arch::{asm, naked_asm};

use cortex_m::peripheral::syst::SystClkSource;

use crate::arch::systick_reload;
use crate::config::{SYSTEM_CLOCK_HZ, TICK_HZ};

// ---------------------------------------------------------------------------
// SysTick configuration
// ---------------------------------------------------------------------------

/// Arm the scheduler tick.
///
/// Programs SysTick to fire at `TICK_HZ` from the core clock and enables
/// both the exception request and the counter. Once this returns the
/// `SysTick` handler below preempts whatever runs, forever — there is no
/// disarm or reconfigure path.
pub fn configure_systick(syst: &mut cortex_m::peripheral::SYST) {
    syst.set_reload(systick_reload(SYSTEM_CLOCK_HZ, TICK_HZ));
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_interrupt();
    syst.enable_counter();
}

// ---------------------------------------------------------------------------
// Fault trap enabling
// ---------------------------------------------------------------------------

/// Enable the three classifiable fault traps (mem-manage, bus, usage).
///
/// Without these SHCSR enable bits the corresponding errors escalate to
/// the undifferentiated HardFault handler.
pub fn enable_processor_faults() {
    // System Handler Control and State Register: 0xE000_ED24
    // Bit 16 = MEMFAULTENA, bit 17 = BUSFAULTENA, bit 18 = USGFAULTENA
    const SHCSR: *mut u32 = 0xE000_ED24 as *mut u32;
    unsafe {
        let val = core::ptr::read_volatile(SHCSR);
        core::ptr::write_volatile(SHCSR, val | (1 << 16) | (1 << 17) | (1 << 18));
    }
}

// ---------------------------------------------------------------------------
// First task launch
// ---------------------------------------------------------------------------

/// Enter task 0 by consuming its fabricated execution frame.
///
/// First rehomes MSP onto the dedicated scheduler stack: the write must
/// happen inside this asm block, after the last sp-relative access the
/// compiler emitted for the caller — hoisting SP above the caller's live
/// frame from Rust code would leave subsequent local accesses pointing
/// into task 3's stack region. From the write onward the main stack is
/// empty and is touched again only by exception entries.
///
/// Then flips CONTROL.SPSEL so Thread mode runs on the process stack and
/// consumes the frame the way an exception return would: R4–R11 and
/// R0–R3 zeroed, LR holding the EXC_RETURN sentinel, PC at the entry
/// point. One deviation from the `SysTick` restore path: R12 is the
/// scratch that carries the entry address, so the task starts with R12
/// holding its own entry point instead of the frame's zero, and the
/// xPSR slot is not materialized (the Thumb state is already in force).
/// Every later entry into any task is bit-exact per the frame.
///
/// # Safety
/// Must be called once, from the boot path, with a pointer produced by
/// the frame builder and the handler-stack top from `config`. Abandons
/// the caller's stack; never returns.
pub unsafe fn start_first_task(psp: *mut u32, msp_top: usize) -> ! {
    asm!(
        // Handler-mode stack for every future exception.
        "msr msp, r1",
        "msr psp, r0",
        // Thread mode onto the process stack (CONTROL.SPSEL = 1,
        // still privileged).
        "movs r0, #2",
        "msr control, r0",
        "isb",
        // Software half: R4-R11, zeroed by the frame builder.
        "pop {{r4-r11}}",
        // Hardware half: R0-R3 by popping, LR/PC by load, R12 and xPSR
        // slots discarded (R12 is the scratch that carries the entry).
        "pop {{r0-r3}}",
        "ldr lr, [sp, #4]",
        "ldr r12, [sp, #8]",
        "add sp, #16",
        "cpsie i",
        "bx r12",
        in("r0") psp,
        in("r1") msp_top,
        options(noreturn)
    );
}

// ---------------------------------------------------------------------------
// SysTick handler (context switch)
// ---------------------------------------------------------------------------

/// SysTick exception handler — the context switch itself.
///
/// Atomic interrupt-service operation; its complete side-effect contract:
/// reads the interrupted task's PSP, pushes R4–R11 onto that task's
/// stack, records the pointer, advances the round-robin index, pops
/// R4–R11 from the next task's saved pointer, installs it as PSP and
/// performs the exception return. LR holds EXC_RETURN on entry and the
/// two `bl`s below would destroy it, so it is parked on the main stack
/// across the calls. Must run to completion before the next tick fires;
/// the tick period is the unenforced bound.
#[allow(non_snake_case)]
#[no_mangle]
#[unsafe(naked)]
pub unsafe extern "C" fn SysTick() {
    naked_asm!(
        // Save: hardware already stacked its half onto the task stack.
        "mrs r0, psp",
        "stmdb r0!, {{r4-r11}}",
        // R4 is dead once stored above; pushing it alongside LR keeps the
        // handler stack 8-aligned across the calls.
        "push {{r4, lr}}",
        "bl {save}",
        // Select + fetch: next task's saved pointer comes back in r0.
        "bl {next}",
        "pop {{r4, lr}}",
        // Restore the software half and hand the stack to the new task.
        "ldmia r0!, {{r4-r11}}",
        "msr psp, r0",
        "bx lr",
        save = sym save_current_psp,
        next = sym select_next_psp,
    );
}

/// Record the preempted task's stack pointer. Called from `SysTick` with
/// the pointer value after the software half was pushed.
unsafe extern "C" fn save_current_psp(psp: *mut u32) {
    let sched = &mut *crate::kernel::SCHEDULER_PTR;
    sched.save_current(psp);
}

/// Advance the round robin and return the new task's saved stack
/// pointer. Called from `SysTick` right after `save_current_psp`.
unsafe extern "C" fn select_next_psp() -> *mut u32 {
    let sched = &mut *crate::kernel::SCHEDULER_PTR;
    sched.advance();
    sched.current_pointer()
}
