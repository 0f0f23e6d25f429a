//! Command line front-end for the schedsim engine.
//!
//! Reads `creation duration priority` triplets from stdin, loads quantum
//! and aging settings from a configuration file, runs the requested
//! policies and prints their statistics and time diagrams.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use log::{error, info, warn};
use schedsim::{Process, RunReport, SimConfig, Simulator, POLICY_NAMES};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("schedsim")
        .about("Simulates single-CPU scheduling policies over processes read from stdin")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .default_value("config.txt")
                .help("Configuration file with 'quantum: N' and 'aging: N' lines"),
        )
        .arg(
            Arg::new("algorithm")
                .short('s')
                .long("algorithm")
                .value_name("NAME")
                .help("Run a single policy instead of the whole catalog"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit the structured reports as JSON instead of text"),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .context("missing configuration path")?;
    let config = load_config(Path::new(config_path));
    info!(
        "configuration: quantum={}, aging={}",
        config.quantum, config.aging_rate
    );

    let processes = parse_processes(io::stdin().lock());
    info!("{} processes loaded", processes.len());
    if processes.is_empty() {
        error!("no valid processes were supplied");
        return Ok(());
    }

    let simulator = Simulator::new(processes, config);
    let selected: Vec<&str> = match matches.get_one::<String>("algorithm") {
        Some(name) => vec![name.as_str()],
        None => POLICY_NAMES.to_vec(),
    };

    let as_json = matches.get_flag("json");
    let mut results = serde_json::Map::new();
    for name in selected {
        let report = simulator
            .run(name)
            .with_context(|| format!("running policy {name}"))?;
        if as_json {
            results.insert(name.to_string(), serde_json::to_value(&report)?);
        } else {
            print_report(name, &report);
        }
    }

    if as_json {
        let doc = serde_json::Value::Object(results);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    Ok(())
}

fn print_report(name: &str, report: &RunReport) {
    println!("\n--- {name} ---");
    println!("average turnaround time: {:.2}", report.avg_turnaround_time);
    println!("average waiting time: {:.2}", report.avg_waiting_time);
    println!("context switches: {}", report.context_switches);
    println!("time diagram:");
    println!("{}", report.diagram.render());
}

/// Loads the simulation configuration, absorbing every failure into the
/// documented defaults (quantum=2, aging=1). The engine never sees a
/// configuration error.
fn load_config(path: &Path) -> SimConfig {
    match File::open(path) {
        Ok(file) => parse_config(BufReader::new(file)),
        Err(err) => {
            warn!(
                "configuration file {} not readable ({err}); using defaults (quantum=2, aging=1)",
                path.display()
            );
            SimConfig::default()
        }
    }
}

fn parse_config(reader: impl BufRead) -> SimConfig {
    let mut config = SimConfig::default();

    for line in reader.lines() {
        let Ok(line) = line else {
            warn!("failed reading configuration; keeping current values");
            break;
        };
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "quantum" => match value.parse::<usize>().ok().and_then(NonZeroUsize::new) {
                Some(quantum) => config.quantum = quantum,
                None => warn!("ignoring invalid quantum '{value}'"),
            },
            "aging" => match value.parse::<i32>() {
                Ok(aging) if aging >= 0 => config.aging_rate = aging,
                _ => warn!("ignoring invalid aging rate '{value}'"),
            },
            other => warn!("ignoring unknown configuration key '{other}'"),
        }
    }

    config
}

/// Parses `creation duration priority` triplets, one per line. Ids are
/// assigned P1..Pn in acceptance order; malformed lines and non-positive
/// durations are skipped with a diagnostic.
fn parse_processes(reader: impl BufRead) -> Vec<Process> {
    let mut processes = Vec::new();
    let mut next_id = 1usize;

    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        if parts.len() != 3 {
            warn!("skipping malformed line (expected 3 values): {}", line.trim());
            continue;
        }

        match (
            parts[0].parse::<usize>(),
            parts[1].parse::<i64>(),
            parts[2].parse::<i32>(),
        ) {
            (Ok(creation), Ok(duration), Ok(priority)) => {
                if duration <= 0 {
                    warn!("skipping process with non-positive duration: {}", line.trim());
                    continue;
                }
                processes.push(Process::new(
                    format!("P{next_id}"),
                    creation,
                    duration as usize,
                    priority,
                ));
                next_id += 1;
            }
            _ => warn!("skipping malformed line (not integers): {}", line.trim()),
        }
    }

    processes
}
