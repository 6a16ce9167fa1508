//! # Fault Traps
//!
//! Fatal, non-recoverable handlers for the processor-detected fault
//! kinds. The policy is fail-fast: one fixed diagnostic line over
//! semihosting, then the core parks forever — no task, including the
//! faulting one, ever runs again. The scheduler has no way to isolate or
//! restart a single task, so any fault is total-system failure.
//!
//! Internal scheduler corruption (say, a mismatched save/restore pair)
//! has no dedicated detector; it surfaces as one of these faults and is
//! treated identically.

/// The four trap classes. Hard is the undifferentiated fallback that
/// catches everything the three classifiable kinds are not armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Hard,
    MemManage,
    Bus,
    Usage,
}

impl FaultKind {
    /// Fixed human-readable identifier emitted with each trap.
    pub const fn label(self) -> &'static str {
        match self {
            FaultKind::Hard => "Hard fault exception",
            FaultKind::MemManage => "MemManage exception",
            FaultKind::Bus => "Bus fault exception",
            FaultKind::Usage => "Usage fault exception",
        }
    }
}

/// The Usage Fault Status Register is the upper halfword of CFSR; only
/// those 16 bits carry fault flags and only they get reported.
pub const fn usage_fault_bits(raw: u32) -> u32 {
    raw & 0xFFFF
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod handlers {
    use cortex_m::asm;
    use cortex_m_rt::{exception, ExceptionFrame};
    use cortex_m_semihosting::hprintln;

    use super::{usage_fault_bits, FaultKind};

    /// Configurable Fault Status Register: MMFSR | BFSR | UFSR.
    const CFSR: *const u32 = 0xE000_ED28 as *const u32;

    fn halt(kind: FaultKind) -> ! {
        hprintln!("{}", kind.label());
        loop {
            asm::wfi();
        }
    }

    #[exception]
    unsafe fn HardFault(_frame: &ExceptionFrame) -> ! {
        halt(FaultKind::Hard)
    }

    #[exception]
    fn MemoryManagement() {
        halt(FaultKind::MemManage)
    }

    #[exception]
    fn BusFault() {
        halt(FaultKind::Bus)
    }

    #[exception]
    fn UsageFault() {
        let ufsr = unsafe { core::ptr::read_volatile(CFSR) >> 16 };
        hprintln!("{}", FaultKind::Usage.label());
        hprintln!("UFSR : {:X}", usage_fault_bits(ufsr));
        loop {
            asm::wfi();
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_fault_status_masked_to_low_16() {
        assert_eq!(usage_fault_bits(0x0001_A2B4), 0xA2B4);
        assert_eq!(usage_fault_bits(0xFFFF_FFFF), 0xFFFF);
        assert_eq!(usage_fault_bits(0x0000_0002), 0x0002);
    }

    #[test]
    fn test_labels_fixed() {
        assert_eq!(FaultKind::Hard.label(), "Hard fault exception");
        assert_eq!(FaultKind::MemManage.label(), "MemManage exception");
        assert_eq!(FaultKind::Bus.label(), "Bus fault exception");
        assert_eq!(FaultKind::Usage.label(), "Usage fault exception");
    }
}
