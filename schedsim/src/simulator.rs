use crate::process::Process;
use crate::report::RunReport;
use crate::schedulers::{
    priority_round_robin, round_robin, run_non_preemptive, run_preemptive, ByCreationTime,
    ByDuration, ByRemainingTime, ByStaticPriority,
};
use crate::SimConfig;
use crate::SimError;

/// The policy catalog, in presentation order.
pub const POLICY_NAMES: [&str; 7] = [
    "FCFS",
    "SJF",
    "SRTF",
    "PriorityNP",
    "PriorityP",
    "RoundRobin",
    "RoundRobinPriorityAging",
];

/// Simulation context: owns the process set and the configuration, and
/// dispatches one policy per request.
///
/// The context itself is immutable; every `run` clones the process list
/// so repeated or interleaved invocations cannot contaminate each other.
pub struct Simulator {
    processes: Vec<Process>,
    config: SimConfig,
}

impl Simulator {
    pub fn new(processes: Vec<Process>, config: SimConfig) -> Simulator {
        Simulator { processes, config }
    }

    /// Runs a single policy by its catalog name over a fresh clone of
    /// the process set.
    ///
    /// An empty process set produces empty zero statistics rather than
    /// an error; an unrecognized name is `SimError::UnknownPolicy`.
    pub fn run(&self, policy: &str) -> Result<RunReport, SimError> {
        let procs = self.processes.to_vec();
        match policy {
            "FCFS" => run_non_preemptive::<ByCreationTime>(procs),
            "SJF" => run_non_preemptive::<ByDuration>(procs),
            "SRTF" => run_preemptive::<ByRemainingTime>(procs),
            "PriorityNP" => run_non_preemptive::<ByStaticPriority>(procs),
            "PriorityP" => run_preemptive::<ByStaticPriority>(procs),
            "RoundRobin" => round_robin::run(procs, &self.config),
            "RoundRobinPriorityAging" => priority_round_robin::run(procs, &self.config),
            other => Err(SimError::UnknownPolicy(other.to_string())),
        }
    }

    /// Runs every catalogued policy and pairs each name with its result.
    pub fn run_all(&self) -> Vec<(&'static str, Result<RunReport, SimError>)> {
        POLICY_NAMES.iter().map(|&name| (name, self.run(name))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::TickState;

    fn workload() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 3, 2),
            Process::new("P2", 2, 6, 1),
            Process::new("P3", 4, 4, 3),
            Process::new("P4", 6, 5, 2),
        ]
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let sim = Simulator::new(workload(), SimConfig::default());
        assert_eq!(
            sim.run("LotteryScheduling").unwrap_err(),
            SimError::UnknownPolicy(String::from("LotteryScheduling"))
        );
    }

    #[test]
    fn empty_process_set_yields_zero_statistics() {
        let sim = Simulator::new(Vec::new(), SimConfig::default());
        for name in POLICY_NAMES {
            let report = sim.run(name).unwrap();
            assert_eq!(report.avg_turnaround_time, 0.0);
            assert_eq!(report.avg_waiting_time, 0.0);
            assert_eq!(report.context_switches, 0);
            assert!(report.processes.is_empty());
            assert_eq!(report.diagram.max_time, 0);
        }
    }

    #[test]
    fn accounting_identities_hold_for_every_policy() {
        let procs = workload();
        let sim = Simulator::new(procs.clone(), SimConfig::default());

        for (name, result) in sim.run_all() {
            let report = result.unwrap();
            for source in &procs {
                let p = report.process(source.id()).unwrap();
                assert_eq!(
                    p.waiting_time + source.duration(),
                    p.turnaround_time,
                    "{name}: waiting + duration != turnaround for {}",
                    p.id
                );
                assert_eq!(
                    p.turnaround_time,
                    p.completion_time - source.creation_time(),
                    "{name}: turnaround != completion - creation for {}",
                    p.id
                );
                assert!(p.start_time >= source.creation_time());
            }
        }
    }

    #[test]
    fn every_unit_of_service_runs_exactly_once() {
        let procs = workload();
        let total_service: usize = procs.iter().map(|p| p.duration()).sum();
        let sim = Simulator::new(procs, SimConfig::default());

        for (name, result) in sim.run_all() {
            let report = result.unwrap();
            let running_ticks = report
                .diagram
                .processes
                .iter()
                .flat_map(|p| &p.timeline)
                .filter(|s| **s == TickState::Running)
                .count();
            assert_eq!(running_ticks, total_service, "{name} lost or duplicated service");

            // Single CPU: never two running markers in one tick.
            for t in 0..report.diagram.max_time {
                let per_tick = report
                    .diagram
                    .processes
                    .iter()
                    .filter(|p| p.timeline[t] == TickState::Running)
                    .count();
                assert!(per_tick <= 1, "{name}: {per_tick} processes running at tick {t}");
            }
        }
    }

    #[test]
    fn runs_are_isolated_from_each_other() {
        let sim = Simulator::new(workload(), SimConfig::default());
        // SRTF mutates remaining times; a second run over the same
        // context must start from pristine state.
        let first = sim.run("SRTF").unwrap();
        let second = sim.run("SRTF").unwrap();
        assert_eq!(first.avg_turnaround_time, second.avg_turnaround_time);
        assert_eq!(first.context_switches, second.context_switches);
    }

    #[test]
    fn report_serializes_with_the_api_field_names() {
        let sim = Simulator::new(workload(), SimConfig::default());
        let report = sim.run("FCFS").unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["avgTurnaroundTime"].is_f64());
        assert!(json["avgWaitingTime"].is_f64());
        assert!(json["contextSwitches"].is_u64());
        assert!(json["diagram"]["maxTime"].is_u64());
        assert_eq!(json["processes"][0]["id"], "P1");
        assert!(json["processes"][0]["completionTime"].is_u64());
    }
}
