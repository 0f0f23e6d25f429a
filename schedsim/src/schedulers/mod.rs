//! The scheduling policies and the simulation loops that drive them.
//!
//! The thin policies (FCFS, SJF, SRTF, PriorityNP, PriorityP) are
//! selection keys plugged into one of the two generic loop templates.
//! The round-robin variants own bespoke loops because their queue
//! discipline and quantum-driven preemption do not fit the templates.

mod run_state;
pub(crate) use run_state::RunState;

mod nonpreemptive;
pub(crate) use nonpreemptive::run_non_preemptive;

mod preemptive;
pub(crate) use preemptive::run_preemptive;

pub(crate) mod priority_round_robin;
pub(crate) mod round_robin;

use crate::process::Process;
use crate::tie_break;
use crate::SimError;

/// Strategy hook: the primary ordering key of a policy. Lower keys are
/// dispatched first.
pub(crate) trait SelectionKey {
    fn key(process: &Process) -> i64;
}

/// Arrival order, for FCFS.
pub(crate) struct ByCreationTime;

impl SelectionKey for ByCreationTime {
    fn key(process: &Process) -> i64 {
        process.creation_time as i64
    }
}

/// Total service demand, for SJF.
pub(crate) struct ByDuration;

impl SelectionKey for ByDuration {
    fn key(process: &Process) -> i64 {
        process.duration as i64
    }
}

/// Service still owed, for SRTF.
pub(crate) struct ByRemainingTime;

impl SelectionKey for ByRemainingTime {
    fn key(process: &Process) -> i64 {
        process.remaining_time as i64
    }
}

/// Declared priority, for both priority policies.
pub(crate) struct ByStaticPriority;

impl SelectionKey for ByStaticPriority {
    fn key(process: &Process) -> i64 {
        process.static_priority as i64
    }
}

/// Effective priority after aging, for RoundRobinPriorityAging.
pub(crate) struct ByCurrentPriority;

impl SelectionKey for ByCurrentPriority {
    fn key(process: &Process) -> i64 {
        process.current_priority as i64
    }
}

/// Picks one winner from `candidates`: minimum of the policy key, then
/// the tie-break rules.
pub(crate) fn select_min<K: SelectionKey>(
    procs: &[Process],
    candidates: &[usize],
    running: Option<usize>,
) -> Result<usize, SimError> {
    let min_key = candidates
        .iter()
        .map(|&i| K::key(&procs[i]))
        .min()
        .ok_or(SimError::EmptyCandidates)?;
    let tied: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| K::key(&procs[i]) == min_key)
        .collect();

    tie_break::resolve(procs, &tied, running)
}
