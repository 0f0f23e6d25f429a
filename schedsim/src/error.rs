use std::error::Error;
use std::fmt;

/// Errors surfaced by the simulation engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The requested policy name is not in the catalog.
    UnknownPolicy(String),
    /// The tie-break resolver received an empty eligible set. This is a
    /// caller contract violation: callers must check non-emptiness first.
    EmptyCandidates,
    /// A process left the engine without consuming all of its service,
    /// or was never dispatched. Indicates an internal defect.
    IncompleteRun { id: String, remaining_time: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownPolicy(name) => write!(f, "unknown scheduling policy '{name}'"),
            SimError::EmptyCandidates => write!(f, "tie-break invoked with no eligible processes"),
            SimError::IncompleteRun { id, remaining_time } => write!(
                f,
                "process {id} finished the run with {remaining_time} units of service left"
            ),
        }
    }
}

impl Error for SimError {}
