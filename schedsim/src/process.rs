use serde::Serialize;

/// Lifecycle of a simulated process.
///
/// A process is `New` until its arrival tick, oscillates between `Ready`
/// and `Running` while it still has service left, and ends `Completed`
/// once its remaining time reaches zero. At most one process is `Running`
/// at any tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Completed,
}

/// Mutable simulation record for one task.
///
/// The identity fields (`id`, `creation_time`, `duration`,
/// `static_priority`) never change after construction; everything else is
/// bookkeeping owned by a single simulation run. Each policy invocation
/// operates on its own cloned copy of the original list.
#[derive(Clone, Debug)]
pub struct Process {
    pub(crate) id: String,
    pub(crate) creation_time: usize,
    pub(crate) duration: usize,
    pub(crate) static_priority: i32,

    pub(crate) remaining_time: usize,
    pub(crate) current_priority: i32,
    /// Tick of the first dispatch, `None` until it happens.
    pub(crate) start_time: Option<usize>,
    pub(crate) completion_time: usize,
    pub(crate) turnaround_time: usize,
    pub(crate) waiting_time: usize,
    /// Ticks consumed in the current quantum, round-robin only.
    pub(crate) quantum_slice: usize,
    pub(crate) status: ProcessState,
}

impl Process {
    /// Creates a process with all dynamic fields reset.
    ///
    /// * `id` - unique identifier, stable for a simulation run
    /// * `creation_time` - arrival tick
    /// * `duration` - total CPU service required, must be positive
    ///   (enforced by the input adapter, not here)
    /// * `priority` - static priority, lower value = higher priority
    pub fn new(id: impl Into<String>, creation_time: usize, duration: usize, priority: i32) -> Process {
        Process {
            id: id.into(),
            creation_time,
            duration,
            static_priority: priority,
            remaining_time: duration,
            current_priority: priority,
            start_time: None,
            completion_time: 0,
            turnaround_time: 0,
            waiting_time: 0,
            quantum_slice: 0,
            status: ProcessState::New,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn creation_time(&self) -> usize {
        self.creation_time
    }

    pub fn duration(&self) -> usize {
        self.duration
    }

    pub fn static_priority(&self) -> i32 {
        self.static_priority
    }

    pub fn remaining_time(&self) -> usize {
        self.remaining_time
    }

    pub fn status(&self) -> ProcessState {
        self.status
    }
}
