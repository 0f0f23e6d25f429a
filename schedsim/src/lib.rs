//! A scheduling simulation library.
//!
//! This library simulates the classic single-CPU scheduling policies
//! (FCFS, SJF, SRTF, priority with and without preemption, round robin,
//! round robin with priority aging) over a discrete logical clock and
//! reports average turnaround time, average waiting time, context switch
//! counts and a per-tick execution diagram.
//!
//! There is no real concurrency here: every policy runs to completion
//! synchronously over its own cloned copy of the process list, so running
//! several policies over the same input never shares mutable state.

mod process;
pub use process::{Process, ProcessState};

mod config;
pub use config::SimConfig;

mod error;
pub use error::SimError;

mod tie_break;

mod diagram;
pub use diagram::{Diagram, ProcessTimeline, TickState};

mod report;
pub use report::{ProcessReport, RunReport};

mod schedulers;

mod simulator;
pub use simulator::{Simulator, POLICY_NAMES};
