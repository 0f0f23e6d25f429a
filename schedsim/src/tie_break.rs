use crate::process::{Process, ProcessState};
use crate::SimError;

/// Resolves a tie between processes that are equal on a policy's primary
/// metric. `tied` holds indices into `procs`; `running` is the index of
/// the current CPU occupant, if any.
///
/// Rules, in order:
/// 1. if the running process is among the tied set and still running,
///    keep it (avoids needless switches when the incumbent is equally
///    good);
/// 2. otherwise pick the smallest remaining time;
/// 3. otherwise pick the smallest id.
///
/// Fails only on an empty tied set, which callers must rule out first.
pub(crate) fn resolve(
    procs: &[Process],
    tied: &[usize],
    running: Option<usize>,
) -> Result<usize, SimError> {
    if tied.is_empty() {
        return Err(SimError::EmptyCandidates);
    }

    if let Some(r) = running {
        if tied.contains(&r) && procs[r].status == ProcessState::Running {
            return Ok(r);
        }
    }

    let min_remaining = tied
        .iter()
        .map(|&i| procs[i].remaining_time)
        .min()
        .ok_or(SimError::EmptyCandidates)?;
    let mut shortest: Vec<usize> = tied
        .iter()
        .copied()
        .filter(|&i| procs[i].remaining_time == min_remaining)
        .collect();

    if shortest.len() > 1 {
        shortest.sort_by(|&a, &b| procs[a].id.cmp(&procs[b].id));
    }

    shortest.first().copied().ok_or(SimError::EmptyCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn procs() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 5, 1),
            Process::new("P2", 0, 3, 2),
            Process::new("P3", 0, 3, 3),
        ]
    }

    #[test]
    fn singleton_wins_regardless_of_running() {
        let procs = procs();
        assert_eq!(resolve(&procs, &[2], None).unwrap(), 2);
        assert_eq!(resolve(&procs, &[2], Some(0)).unwrap(), 2);
    }

    #[test]
    fn sticky_running_incumbent() {
        let mut procs = procs();
        procs[0].status = ProcessState::Running;
        // P1 has the largest remaining time but keeps the CPU.
        assert_eq!(resolve(&procs, &[0, 1, 2], Some(0)).unwrap(), 0);
    }

    #[test]
    fn incumbent_ignored_unless_running() {
        let procs = procs();
        // Running index is in the set but its status is not Running,
        // so the smallest remaining time wins.
        assert_eq!(resolve(&procs, &[0, 1], Some(0)).unwrap(), 1);
    }

    #[test]
    fn smallest_remaining_time_wins() {
        let procs = procs();
        assert_eq!(resolve(&procs, &[0, 1], None).unwrap(), 1);
    }

    #[test]
    fn id_breaks_remaining_time_tie() {
        let procs = procs();
        // P2 and P3 both have 3 units left.
        assert_eq!(resolve(&procs, &[2, 1], None).unwrap(), 1);
    }

    #[test]
    fn empty_set_is_a_contract_violation() {
        let procs = procs();
        assert_eq!(resolve(&procs, &[], None), Err(SimError::EmptyCandidates));
    }
}
