use std::collections::VecDeque;

use log::debug;

use crate::diagram::{Diagram, TickState};
use crate::process::{Process, ProcessState};
use crate::report::{ProcessReport, RunReport};
use crate::SimError;

/// Per-run bookkeeping shared by all simulation loops.
///
/// Processes are stored once, sorted by id (the diagram column order),
/// and referenced everywhere else by index. The fixed per-tick sequence
/// is: admit arrivals, make the dispatch decision, record the diagram
/// row, execute one unit, check completion or quantum expiry.
pub(crate) struct RunState {
    pub(crate) procs: Vec<Process>,
    /// Not-yet-arrived indices, ordered by `(creation_time, id)`.
    pending: VecDeque<usize>,
    /// Ready indices, in insertion order. Round robin treats this as a
    /// strict FIFO; the other loops scan it.
    pub(crate) ready: VecDeque<usize>,
    pub(crate) running: Option<usize>,
    pub(crate) clock: usize,
    completed: usize,
    /// One row per tick, one cell per process, aligned with `procs`.
    rows: Vec<Vec<TickState>>,
}

impl RunState {
    pub(crate) fn new(mut procs: Vec<Process>) -> RunState {
        procs.sort_by(|a, b| a.id.cmp(&b.id));

        let mut pending: Vec<usize> = (0..procs.len()).collect();
        pending.sort_by(|&a, &b| {
            (procs[a].creation_time, &procs[a].id).cmp(&(procs[b].creation_time, &procs[b].id))
        });

        RunState {
            procs,
            pending: pending.into(),
            ready: VecDeque::new(),
            running: None,
            clock: 0,
            completed: 0,
            rows: Vec::new(),
        }
    }

    pub(crate) fn all_done(&self) -> bool {
        self.completed == self.procs.len()
    }

    /// Moves every process with `creation_time <= clock` into the ready
    /// collection, in arrival order.
    pub(crate) fn admit_arrivals(&mut self) {
        while let Some(&front) = self.pending.front() {
            if self.procs[front].creation_time > self.clock {
                break;
            }
            self.pending.pop_front();
            self.procs[front].status = ProcessState::Ready;
            self.ready.push_back(front);
        }
    }

    /// Advances the clock straight to the next arrival, emitting idle
    /// rows for the skipped interval. Nothing can happen while the CPU
    /// is idle and the ready set is empty, so this is exact. Returns
    /// false when no arrivals remain.
    pub(crate) fn jump_to_next_arrival(&mut self) -> bool {
        let Some(&front) = self.pending.front() else {
            return false;
        };
        let next_arrival = self.procs[front].creation_time;

        for _ in self.clock..next_arrival {
            self.rows.push(vec![TickState::Idle; self.procs.len()]);
        }
        self.clock = next_arrival;
        true
    }

    /// Assigns the CPU to `idx`: removes it from ready, resets its
    /// quantum slice and stamps `start_time` on first dispatch.
    pub(crate) fn dispatch(&mut self, idx: usize) {
        self.ready.retain(|&i| i != idx);

        let proc = &mut self.procs[idx];
        proc.status = ProcessState::Running;
        proc.quantum_slice = 0;
        if proc.start_time.is_none() {
            proc.start_time = Some(self.clock);
        }
        debug!("tick {}: dispatching {}", self.clock, proc.id);

        self.running = Some(idx);
    }

    /// Records this tick's diagram row. Ready processes show as waiting,
    /// the running one as running, everyone else (not yet arrived or
    /// already finished) as idle.
    pub(crate) fn record_row(&mut self) {
        let mut row = vec![TickState::Idle; self.procs.len()];
        for &i in &self.ready {
            row[i] = TickState::Waiting;
        }
        if let Some(r) = self.running {
            row[r] = TickState::Running;
        }
        self.rows.push(row);
    }

    /// Executes one unit of service for the running process and handles
    /// completion. Returns true when the process finished this tick.
    pub(crate) fn execute_tick(&mut self) -> bool {
        let Some(r) = self.running else {
            return false;
        };

        let proc = &mut self.procs[r];
        proc.remaining_time -= 1;
        proc.quantum_slice += 1;

        if proc.remaining_time > 0 {
            return false;
        }

        proc.status = ProcessState::Completed;
        proc.completion_time = self.clock + 1;
        proc.turnaround_time = proc.completion_time - proc.creation_time;
        proc.waiting_time = proc.turnaround_time - proc.duration;
        debug!("tick {}: {} completed", self.clock, proc.id);

        self.running = None;
        self.completed += 1;
        true
    }

    /// Reduces the finished run to its report, verifying on the way out
    /// that every process actually consumed its full service.
    pub(crate) fn finish(self, context_switches: usize) -> Result<RunReport, SimError> {
        let mut reports = Vec::with_capacity(self.procs.len());
        for proc in &self.procs {
            let Some(start_time) = proc.start_time else {
                return Err(SimError::IncompleteRun {
                    id: proc.id.clone(),
                    remaining_time: proc.remaining_time,
                });
            };
            if proc.remaining_time > 0 || proc.status != ProcessState::Completed {
                return Err(SimError::IncompleteRun {
                    id: proc.id.clone(),
                    remaining_time: proc.remaining_time,
                });
            }
            reports.push(ProcessReport {
                id: proc.id.clone(),
                start_time,
                completion_time: proc.completion_time,
                turnaround_time: proc.turnaround_time,
                waiting_time: proc.waiting_time,
            });
        }

        let n = self.procs.len();
        let (avg_turnaround_time, avg_waiting_time) = if n == 0 {
            (0.0, 0.0)
        } else {
            let total_tt: usize = self.procs.iter().map(|p| p.turnaround_time).sum();
            let total_wt: usize = self.procs.iter().map(|p| p.waiting_time).sum();
            (total_tt as f64 / n as f64, total_wt as f64 / n as f64)
        };

        let ids: Vec<String> = self.procs.iter().map(|p| p.id.clone()).collect();

        Ok(RunReport {
            avg_turnaround_time,
            avg_waiting_time,
            context_switches,
            processes: reports,
            diagram: Diagram::from_rows(&ids, &self.rows),
        })
    }
}
