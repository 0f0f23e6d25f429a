use std::num::NonZeroUsize;

/// Default quantum for the round-robin policies.
pub const DEFAULT_QUANTUM: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(quantum) => quantum,
    None => panic!("default quantum must be non-zero"),
};

/// Default aging rate for `RoundRobinPriorityAging`.
pub const DEFAULT_AGING_RATE: i32 = 1;

/// Simulation configuration, consumed only by the round-robin policies.
///
/// The engine never reads configuration from a file itself; the runner
/// loads it and substitutes these defaults whenever parsing fails.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Maximum consecutive ticks a round-robin dispatch may hold the CPU.
    pub quantum: NonZeroUsize,
    /// Priority improvement applied to every waiting process each time a
    /// quantum expires.
    pub aging_rate: i32,
}

impl Default for SimConfig {
    fn default() -> SimConfig {
        SimConfig {
            quantum: DEFAULT_QUANTUM,
            aging_rate: DEFAULT_AGING_RATE,
        }
    }
}
