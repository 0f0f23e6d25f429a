use log::debug;

use super::RunState;
use crate::process::{Process, ProcessState};
use crate::report::RunReport;
use crate::SimConfig;
use crate::SimError;

/// Round robin over a strict FIFO ready queue.
///
/// A dispatch holds the CPU until the process completes or its quantum
/// slice fills up, whichever comes first; on expiry the process rejoins
/// the tail of the queue. Context switches are counted against the
/// last-dispatched identity, so the sole ready process re-dispatching
/// itself after its own quantum expires is not a switch.
pub(crate) fn run(procs: Vec<Process>, config: &SimConfig) -> Result<RunReport, SimError> {
    let quantum = config.quantum.get();
    let mut state = RunState::new(procs);
    let mut switches = 0usize;
    let mut last_dispatched: Option<usize> = None;

    while !state.all_done() {
        state.admit_arrivals();

        if state.running.is_none() {
            if let Some(&head) = state.ready.front() {
                state.dispatch(head);
                if last_dispatched != Some(head) {
                    switches += 1;
                    last_dispatched = Some(head);
                }
            } else {
                if !state.jump_to_next_arrival() {
                    break;
                }
                continue;
            }
        }

        state.record_row();
        if !state.execute_tick() {
            expire_quantum(&mut state, quantum);
        }
        state.clock += 1;
    }

    state.finish(switches.saturating_sub(1))
}

/// Returns the running process to the FIFO tail once its slice is used
/// up. Completion is handled before this is called.
fn expire_quantum(state: &mut RunState, quantum: usize) {
    let Some(r) = state.running else {
        return;
    };
    if state.procs[r].quantum_slice < quantum {
        return;
    }

    debug!("tick {}: quantum expired for {}", state.clock, state.procs[r].id);
    state.procs[r].status = ProcessState::Ready;
    state.ready.push_back(r);
    state.running = None;
}
