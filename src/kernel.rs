//! # Kernel
//!
//! Owns the global scheduler instance and runs the boot sequence.
//!
//! ## Startup Sequence
//!
//! ```text
//! reset_handler (cortex-m-rt)
//!   └─► main()
//!         ├─► kernel::init()           ← wire the scheduler pointer
//!         └─► kernel::start()          ← no return
//!               ├─► enable fault traps
//!               ├─► fabricate every task's initial frame
//!               ├─► arm SysTick
//!               └─► arch::start_first_task(): MSP onto the scheduler
//!                   stack, then flip to PSP and enter task 0
//! ```
//!
//! Once `start` hands control to task 0, the only code that ever touches
//! the scheduler again is the SysTick handler.

use crate::scheduler::Scheduler;

// ---------------------------------------------------------------------------
// Global scheduler instance
// ---------------------------------------------------------------------------

/// The one scheduler this core runs. Lives for the whole process; all
/// mutation happens through `SCHEDULER_PTR`.
static mut SCHEDULER: Scheduler = Scheduler::new();

/// Raw pointer to the global scheduler for the arch layer — the SysTick
/// handler's shims cannot carry a borrow across an exception boundary.
///
/// # Safety
/// Set once by `init()` before the tick source is armed, read afterwards
/// only from ISR context.
#[no_mangle]
pub static mut SCHEDULER_PTR: *mut Scheduler = core::ptr::null_mut();

// ---------------------------------------------------------------------------
// Kernel API
// ---------------------------------------------------------------------------

/// Wire up the global scheduler. Must run exactly once, before `start`.
pub fn init() {
    unsafe {
        SCHEDULER_PTR = core::ptr::addr_of_mut!(SCHEDULER);
    }
}

/// Boot the scheduler over the given task table. **Does not return.**
///
/// The steps run unconditionally, non-retryably and in this exact
/// order: fault traps armed, initial frames fabricated, SysTick armed,
/// then the launch — MSP rehomed onto the dedicated scheduler stack,
/// active stack selection flipped to PSP, task 0 entered. The MSP write
/// lives inside `start_first_task`'s asm block because this function
/// still runs on the main stack it would invalidate; until then the
/// reset-vector MSP (already `SCHED_STACK_START` via memory.x) is in
/// force. The tick source is live before the stack switch; preemption
/// begins with the first tick.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub fn start(tasks: &crate::task::TaskTable, mut core_peripherals: cortex_m::Peripherals) -> ! {
    use crate::arch::cortex_m3;
    use crate::config::SCHED_STACK_START;
    use crate::sync;

    cortex_m3::enable_processor_faults();

    let first = sync::critical_section(|_cs| unsafe {
        let sched = &mut *SCHEDULER_PTR;
        sched.build_initial_frames(tasks);
        sched.current_pointer()
    });

    cortex_m3::configure_systick(&mut core_peripherals.SYST);

    unsafe { cortex_m3::start_first_task(first, SCHED_STACK_START) }
}
