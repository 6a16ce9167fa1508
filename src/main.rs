//! # rrtos Demo Firmware
//!
//! Four tasks on the STM32F103 bluepill, each an endless loop printing
//! its name over semihosting. With the 1 kHz tick every task gets a 1 ms
//! slice in strict rotation: the console interleaves `task1 task2 task3
//! task4 task1 ...` forever. None of the tasks ever yields, blocks or
//! returns — preemption is the only thing that moves execution between
//! them.
//!
//! The vector table, semihosting and the boot path only exist on the
//! embedded target; host builds (`cargo test`) get a stub `main` so the
//! binary target still links.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod firmware {
    use cortex_m_rt::entry;
    use cortex_m_semihosting::hprintln;
    use panic_halt as _;

    use rrtos::config;
    use rrtos::kernel;
    use rrtos::task::{TaskDescriptor, TaskTable};

    // -----------------------------------------------------------------------
    // Task entry points
    // -----------------------------------------------------------------------

    extern "C" fn task1() -> ! {
        loop {
            hprintln!("task1");
        }
    }

    extern "C" fn task2() -> ! {
        loop {
            hprintln!("task2");
        }
    }

    extern "C" fn task3() -> ! {
        loop {
            hprintln!("task3");
        }
    }

    extern "C" fn task4() -> ! {
        loop {
            hprintln!("task4");
        }
    }

    /// The fixed task set: slot index is task identity, stacks are the
    /// four 1 KiB slices at the top of SRAM.
    static TASKS: TaskTable = [
        TaskDescriptor::new(task1, config::task_stack(0)),
        TaskDescriptor::new(task2, config::task_stack(1)),
        TaskDescriptor::new(task3, config::task_stack(2)),
        TaskDescriptor::new(task4, config::task_stack(3)),
    ];

    // -----------------------------------------------------------------------
    // Entry point
    // -----------------------------------------------------------------------

    #[entry]
    fn main() -> ! {
        let cp = cortex_m::Peripherals::take().unwrap();

        kernel::init();
        kernel::start(&TASKS, cp)
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
