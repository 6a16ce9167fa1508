//! # Task Registry
//!
//! The static task model: each task is a slot index into a fixed table,
//! and each slot carries an entry point plus a dedicated stack region.
//! Tasks never terminate, never block and are never created or destroyed
//! at runtime — the registry is the whole lifecycle.

use crate::config::MAX_TASKS;

// ---------------------------------------------------------------------------
// Stack regions
// ---------------------------------------------------------------------------

/// A task's dedicated stack memory, `[base, base + size)`.
///
/// Regions are externally supplied memory-layout constants (see
/// `config::task_stack`); this crate never computes them, only checks
/// that saved stack pointers stay inside them. A full descending stack
/// pointer is valid anywhere in `[base, top]` — `top` itself is the
/// empty-stack position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackRegion {
    /// Lowest address belonging to the region.
    pub base: usize,
    /// Region size in bytes.
    pub size: usize,
}

impl StackRegion {
    pub const fn new(base: usize, size: usize) -> Self {
        Self { base, size }
    }

    /// One past the highest address: the initial (empty) stack pointer.
    #[inline]
    pub const fn top(&self) -> usize {
        self.base + self.size
    }

    /// Whether `addr` is a valid stack-pointer value for this region.
    #[inline]
    pub const fn contains(&self, addr: usize) -> bool {
        addr >= self.base && addr <= self.top()
    }

    /// Whether two regions share any byte.
    pub const fn overlaps(&self, other: &StackRegion) -> bool {
        self.base < other.top() && other.base < self.top()
    }
}

// ---------------------------------------------------------------------------
// Task descriptors
// ---------------------------------------------------------------------------

/// Configuration-time description of one task slot.
///
/// The entry point takes no arguments and must never return: there is no
/// exit path, no join, and returning from a task has no defined behavior.
#[derive(Clone, Copy)]
pub struct TaskDescriptor {
    /// Where execution starts the first time the task is resumed.
    pub entry: extern "C" fn() -> !,
    /// The task's dedicated stack. Must not overlap any other task's
    /// region or the handler-mode stack.
    pub stack: StackRegion,
}

impl TaskDescriptor {
    pub const fn new(entry: extern "C" fn() -> !, stack: StackRegion) -> Self {
        Self { entry, stack }
    }
}

/// The fixed task set. Index in this table is the task's identity.
pub type TaskTable = [TaskDescriptor; MAX_TASKS];

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bounds() {
        let r = StackRegion::new(0x2000_4c00, 1024);
        assert_eq!(r.top(), 0x2000_5000);
        assert!(r.contains(0x2000_4c00));
        assert!(r.contains(0x2000_5000)); // empty-stack position
        assert!(r.contains(0x2000_4fc0));
        assert!(!r.contains(0x2000_4bff));
        assert!(!r.contains(0x2000_5001));
    }

    #[test]
    fn test_region_overlap() {
        let a = StackRegion::new(0x2000_4000, 1024);
        let b = StackRegion::new(0x2000_4400, 1024);
        let c = StackRegion::new(0x2000_4800, 1024);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&c));
        assert!(a.overlaps(&StackRegion::new(0x2000_43fc, 8)));
        assert!(a.overlaps(&a));
    }
}
