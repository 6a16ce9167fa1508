//! # rrtos — Round-Robin Task Scheduler
//!
//! A bare-metal, single-core, preemptive round-robin scheduler for a
//! fixed set of non-terminating tasks on the STM32F103 bluepill
//! (Cortex-M3, no operating system underneath).
//!
//! ## Overview
//!
//! Each task gets the illusion of continuous, independent execution: a
//! 1 kHz SysTick interrupt transparently swaps which task's register
//! state is live, cycling through the task table in strict order. There
//! are no priorities, no blocking, no sleeping, no inter-task signaling
//! and no task termination — round robin over a static, always-runnable
//! task set is the entire policy.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Application Tasks (main.rs)            │
//! ├─────────────────────────────────────────────────────┤
//! │                Kernel (kernel.rs)                   │
//! │            init() · start() · boot order            │
//! ├───────────────┬─────────────────┬───────────────────┤
//! │  Scheduler    │  Frame Builder  │   Fault Traps     │
//! │  scheduler.rs │  frame.rs       │   fault.rs        │
//! │  ─ save       │  ─ fabricated   │   ─ report once   │
//! │  ─ advance    │    initial      │   ─ halt forever  │
//! │  ─ restore    │    frames       │                   │
//! ├───────────────┴─────────────────┴───────────────────┤
//! │          Task Registry (task.rs, config.rs)         │
//! │       entry points · stack regions · constants      │
//! ├─────────────────────────────────────────────────────┤
//! │           Arch Port (arch/cortex_m3.rs)             │
//! │   SysTick switch · MSP/PSP discipline · first task  │
//! ├─────────────────────────────────────────────────────┤
//! │           ARM Cortex-M3 Hardware (Thumb-2)          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Context Switch
//!
//! On every tick the SysTick handler, running on the main stack:
//! 1. reads the interrupted task's PSP (hardware already stacked
//!    R0–R3, R12, LR, PC, xPSR there),
//! 2. pushes R4–R11 onto the same stack and records the pointer,
//! 3. advances the round-robin index,
//! 4. pops R4–R11 from the next task's saved pointer, installs it as
//!    PSP and exception-returns — the hardware pops its half and the
//!    next task resumes mid-instruction-stream, or, for a task that has
//!    never run, steps into its entry point through the fabricated frame.
//!
//! ## Memory Model
//!
//! - **No heap, no `alloc`**: all state is statically placed
//! - **Fixed task table**: `[TaskDescriptor; MAX_TASKS]`, compile-time
//! - **Per-task stacks**: externally supplied 1 KiB regions at the top
//!   of SRAM, disjoint from each other and from the handler (MSP) stack
//! - **One scheduler per core**: a single global instance whose only
//!   post-boot accessor is the SysTick handler

#![no_std]

pub mod arch;
pub mod config;
pub mod fault;
pub mod frame;
pub mod kernel;
pub mod scheduler;
pub mod sync;
pub mod task;
