use serde::Serialize;

use crate::diagram::Diagram;

/// Final accounting for one completed process.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    pub id: String,
    /// Tick of the first dispatch.
    pub start_time: usize,
    pub completion_time: usize,
    /// `completion_time - creation_time`.
    pub turnaround_time: usize,
    /// `turnaround_time - duration`.
    pub waiting_time: usize,
}

/// Result of running one policy over a process set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub avg_turnaround_time: f64,
    pub avg_waiting_time: f64,
    pub context_switches: usize,
    pub processes: Vec<ProcessReport>,
    pub diagram: Diagram,
}

impl RunReport {
    /// Looks up the report of a single process by id.
    pub fn process(&self, id: &str) -> Option<&ProcessReport> {
        self.processes.iter().find(|p| p.id == id)
    }
}
