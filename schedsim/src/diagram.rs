use serde::Serialize;

/// What one process was doing during one tick.
///
/// `Idle` covers both "not yet arrived" and "already finished"; the
/// original renderer never distinguished them and consumers rely on the
/// merged behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickState {
    Running,
    Waiting,
    Idle,
}

impl TickState {
    fn marker(self) -> &'static str {
        match self {
            TickState::Running => "##",
            TickState::Waiting => "--",
            TickState::Idle => "  ",
        }
    }
}

/// Per-tick states of a single process over the whole run.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessTimeline {
    pub id: String,
    pub timeline: Vec<TickState>,
}

/// Execution diagram of a completed run: one column per process (sorted
/// by id), one row per simulated tick. All timelines have the same
/// length.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub processes: Vec<ProcessTimeline>,
    pub max_time: usize,
}

impl Diagram {
    /// Builds a diagram from row-major tick records, where `rows[t][i]`
    /// is the state of process `ids[i]` during tick `t`.
    pub(crate) fn from_rows(ids: &[String], rows: &[Vec<TickState>]) -> Diagram {
        let processes = ids
            .iter()
            .enumerate()
            .map(|(i, id)| ProcessTimeline {
                id: id.clone(),
                timeline: rows.iter().map(|row| row[i]).collect(),
            })
            .collect();

        Diagram {
            processes,
            max_time: rows.len(),
        }
    }

    /// Renders the fixed-width time table.
    ///
    /// One row per tick, one column per process; cells hold the running
    /// marker `##`, the waiting marker `--`, or blanks. Column widths fit
    /// the 2-character markers even for 1-character ids.
    pub fn render(&self) -> String {
        if self.processes.is_empty() {
            return String::from("no processes to display");
        }

        let widths: Vec<usize> = self.processes.iter().map(|p| p.id.len().max(2)).collect();

        let mut header: Vec<String> = vec![format!("{:<5}", "time")];
        for (p, &w) in self.processes.iter().zip(&widths) {
            header.push(format!("{:<w$}", p.id, w = w));
        }
        let header = header.join(" | ");

        let mut lines = vec![header.clone(), "-".repeat(header.len())];
        for t in 0..self.max_time {
            let mut row: Vec<String> = vec![format!("{:<5}", format!("{}-{}", t, t + 1))];
            for (p, &w) in self.processes.iter().zip(&widths) {
                row.push(format!("{:<w$}", p.timeline[t].marker(), w = w));
            }
            lines.push(row.join(" | "));
        }

        lines.join("\n")
    }
}
