use log::debug;

use super::{select_min, RunState, SelectionKey};
use crate::process::{Process, ProcessState};
use crate::report::RunReport;
use crate::SimError;

/// Generic loop for policies that re-evaluate the dispatch decision
/// every tick over the union of the ready set and the current occupant.
///
/// A context switch is counted only when the actual occupant of the CPU
/// changes identity, not when the incumbent is re-selected as itself.
pub(crate) fn run_preemptive<K: SelectionKey>(procs: Vec<Process>) -> Result<RunReport, SimError> {
    let mut state = RunState::new(procs);
    let mut switches = 0usize;
    let mut last_occupant: Option<usize> = None;

    while !state.all_done() {
        state.admit_arrivals();

        let mut candidates: Vec<usize> = state.ready.iter().copied().collect();
        if let Some(r) = state.running {
            candidates.push(r);
        }
        if candidates.is_empty() {
            if !state.jump_to_next_arrival() {
                break;
            }
            continue;
        }

        let next = select_min::<K>(&state.procs, &candidates, state.running)?;
        if state.running != Some(next) {
            if let Some(prev) = state.running.take() {
                state.procs[prev].status = ProcessState::Ready;
                state.ready.push_back(prev);
                debug!(
                    "tick {}: {} preempted by {}",
                    state.clock, state.procs[prev].id, state.procs[next].id
                );
            }

            state.ready.retain(|&i| i != next);
            state.procs[next].status = ProcessState::Running;
            state.running = Some(next);

            if last_occupant != Some(next) {
                switches += 1;
                last_occupant = Some(next);
            }
        }

        // First occupancy, whether fresh or re-selected.
        if state.procs[next].start_time.is_none() {
            state.procs[next].start_time = Some(state.clock);
        }

        state.record_row();
        state.execute_tick();
        state.clock += 1;
    }

    state.finish(switches.saturating_sub(1))
}
