//! # Scheduler
//!
//! Round-robin scheduling state and its three bookkeeping operations.
//! The policy is strict cyclic order over the fixed task set: no
//! priorities, no skipping, no time-slice accounting — every tick moves
//! to the next slot.
//!
//! All code here is architecture-independent and runs on the host under
//! `cargo test`. The hardware side (register save/restore, PSP install,
//! exception return) lives in `arch::cortex_m3` and reaches this state
//! only through `save_current`, `advance` and `current_pointer`.

use crate::config::MAX_TASKS;
use crate::frame;
use crate::task::TaskTable;

/// The single scheduler instance's state: which task is current and where
/// each task's stack pointer was last left.
///
/// Every slot in `psp` holds a value produced either by the frame builder
/// (task has never run) or by a prior save (task was preempted before) —
/// after `build_initial_frames`, never anything else.
pub struct Scheduler {
    /// Last saved process stack pointer, per task slot.
    psp: [*mut u32; MAX_TASKS],
    /// Index of the task whose state is (or is about to be) on the CPU.
    current: usize,
}

impl Scheduler {
    /// Scheduler with no frames built yet. Task 0 is current, so the boot
    /// sequence launches it first.
    pub const fn new() -> Self {
        Self {
            psp: [core::ptr::null_mut(); MAX_TASKS],
            current: 0,
        }
    }

    /// Fabricate the initial execution frame for every task in the
    /// registry and record the resulting stack pointers.
    ///
    /// Runs once during boot, before the tick source is armed.
    ///
    /// # Safety
    /// Each descriptor's stack region must be writable, exclusively owned
    /// by that task and disjoint from every other region.
    pub unsafe fn build_initial_frames(&mut self, tasks: &TaskTable) {
        for (slot, task) in tasks.iter().enumerate() {
            let top = task.stack.top() as *mut u32;
            self.psp[slot] = frame::build(top, task.entry as usize);
        }
    }

    /// Record the current task's stack pointer.
    ///
    /// Must be called with the value taken *after* the software register
    /// half was pushed — the recorded pointer is what the restore side
    /// pops that half from.
    #[inline]
    pub fn save_current(&mut self, psp: *mut u32) {
        self.psp[self.current] = psp;
    }

    /// Move to the next task in strict cyclic order.
    #[inline]
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % MAX_TASKS;
    }

    /// The saved stack pointer of the current task. Used right after
    /// `advance` to fetch where the next task left off.
    #[inline]
    pub fn current_pointer(&self) -> *mut u32 {
        self.psp[self.current]
    }

    /// Index of the current task.
    #[inline]
    pub fn current_task(&self) -> usize {
        self.current
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STACK_SIZE;
    use crate::task::{StackRegion, TaskDescriptor};

    extern "C" fn spin() -> ! {
        loop {}
    }

    fn ptr(addr: usize) -> *mut u32 {
        addr as *mut u32
    }

    #[test]
    fn test_advance_is_cyclic() {
        // N advances from any starting point land back on it.
        for start in 0..MAX_TASKS {
            let mut sched = Scheduler::new();
            for _ in 0..start {
                sched.advance();
            }
            assert_eq!(sched.current_task(), start);
            for _ in 0..MAX_TASKS {
                sched.advance();
            }
            assert_eq!(sched.current_task(), start);
        }
    }

    #[test]
    fn test_tick_sequence_from_task_zero() {
        // 4 tasks, starting at task 0: five ticks visit 1, 2, 3, 0, 1.
        let mut sched = Scheduler::new();
        let mut seen = [0usize; 5];
        for s in seen.iter_mut() {
            sched.advance();
            *s = sched.current_task();
        }
        assert_eq!(seen, [1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut sched = Scheduler::new();
        for i in 0..MAX_TASKS {
            sched.save_current(ptr(0x2000_4000 + i * 0x40));
            sched.advance();
        }
        for i in 0..MAX_TASKS {
            assert_eq!(sched.current_pointer(), ptr(0x2000_4000 + i * 0x40));
            sched.advance();
        }
    }

    #[test]
    fn test_switch_cycle_restores_saved_pointer() {
        // A full save -> advance -> restore cycle hands back exactly the
        // pointer most recently saved for the newly-current task.
        let mut sched = Scheduler::new();
        sched.save_current(ptr(0x2000_4fc0)); // task 0, pre-seeded
        sched.advance();
        sched.save_current(ptr(0x2000_4bc0)); // task 1 preempted here
        sched.advance();
        sched.advance();
        sched.advance();
        assert_eq!(sched.current_task(), 0);
        assert_eq!(sched.current_pointer(), ptr(0x2000_4fc0));
        sched.advance();
        assert_eq!(sched.current_pointer(), ptr(0x2000_4bc0));
    }

    #[repr(align(8))]
    struct Stack([u8; STACK_SIZE]);

    #[test]
    fn test_initial_frames_distinct_and_in_region() {
        let mut stacks = [
            Stack([0; STACK_SIZE]),
            Stack([0; STACK_SIZE]),
            Stack([0; STACK_SIZE]),
            Stack([0; STACK_SIZE]),
        ];
        let mut regions = [StackRegion::new(0, 0); MAX_TASKS];
        for (i, s) in stacks.iter_mut().enumerate() {
            regions[i] = StackRegion::new(s.0.as_ptr() as usize, STACK_SIZE);
        }
        let tasks: TaskTable = [
            TaskDescriptor::new(spin, regions[0]),
            TaskDescriptor::new(spin, regions[1]),
            TaskDescriptor::new(spin, regions[2]),
            TaskDescriptor::new(spin, regions[3]),
        ];

        let mut sched = Scheduler::new();
        unsafe { sched.build_initial_frames(&tasks) };

        let mut saved = [core::ptr::null_mut(); MAX_TASKS];
        for (i, s) in saved.iter_mut().enumerate() {
            assert_eq!(sched.current_task(), i);
            *s = sched.current_pointer();
            sched.advance();
        }

        for i in 0..MAX_TASKS {
            assert!(!saved[i].is_null());
            assert!(regions[i].contains(saved[i] as usize));
            // Full frame sits within the region too.
            assert!(regions[i].contains(saved[i] as usize + frame::FRAME_WORDS * 4));
            for j in 0..MAX_TASKS {
                if i != j {
                    assert_ne!(saved[i], saved[j]);
                }
            }
        }
    }

    #[test]
    fn test_initial_frame_resumes_at_entry() {
        let mut stack = Stack([0; STACK_SIZE]);
        let region = StackRegion::new(stack.0.as_ptr() as usize, STACK_SIZE);
        let tasks: TaskTable = [TaskDescriptor::new(spin, region); MAX_TASKS];

        let mut sched = Scheduler::new();
        // All four descriptors alias one buffer here; the frames they
        // build are identical, so inspecting one stands for all.
        unsafe { sched.build_initial_frames(&tasks) };

        let sp = sched.current_pointer();
        let words = unsafe { core::slice::from_raw_parts(sp, frame::FRAME_WORDS) };
        assert_eq!(words[14], spin as extern "C" fn() -> ! as usize as u32);
        assert_eq!(words[13], frame::EXC_RETURN_THREAD_PSP);
        assert!(words[..8].iter().all(|&w| w == 0));
    }
}
