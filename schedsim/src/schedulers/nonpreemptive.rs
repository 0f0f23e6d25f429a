use super::{select_min, RunState, SelectionKey};
use crate::process::Process;
use crate::report::RunReport;
use crate::SimError;

/// Generic loop for policies that never revisit a dispatch decision:
/// once a process gets the CPU it runs to completion. The selection hook
/// only fires while the CPU is idle.
///
/// The first dispatch merely loads the CPU and is not counted as a
/// context switch.
pub(crate) fn run_non_preemptive<K: SelectionKey>(procs: Vec<Process>) -> Result<RunReport, SimError> {
    let mut state = RunState::new(procs);
    let mut dispatches = 0usize;

    while !state.all_done() {
        state.admit_arrivals();

        if state.running.is_none() {
            if state.ready.is_empty() {
                if !state.jump_to_next_arrival() {
                    break;
                }
                continue;
            }

            let ready: Vec<usize> = state.ready.iter().copied().collect();
            let next = select_min::<K>(&state.procs, &ready, None)?;
            state.dispatch(next);
            dispatches += 1;
        }

        state.record_row();
        state.execute_tick();
        state.clock += 1;
    }

    state.finish(dispatches.saturating_sub(1))
}
