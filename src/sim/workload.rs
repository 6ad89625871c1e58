//! Process-set sources: `pid ; arrival ; burst` text, JSON arrays and a
//! seeded random generator.

use rand::prelude::*;
use std::{fs, path::Path};
use tracing::debug;

use super::job::ProcessSpec;
use crate::{
    core::{ProcessId, Ticks},
    error::{InputError, SimResult},
};

/// Parses one `pid ; arrival ; burst` descriptor; whitespace around `;` is ignored.
pub fn parse_line(line: &str, line_no: usize) -> SimResult<ProcessSpec> {
    let malformed = |reason: String| InputError::Malformed {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    let [pid, arrival, burst] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected 'pid; arrival; burst', got {} field(s)",
            fields.len()
        ))
        .into());
    };

    let id = pid
        .parse::<ProcessId>()
        .map_err(|e| malformed(format!("pid '{pid}': {e}")))?;
    let arrival_time = arrival
        .parse::<i64>()
        .map_err(|e| malformed(format!("arrival '{arrival}': {e}")))?;
    let burst_time = burst
        .parse::<i64>()
        .map_err(|e| malformed(format!("burst '{burst}': {e}")))?;

    Ok(ProcessSpec::new(id, arrival_time, burst_time))
}

pub fn parse_text(text: &str) -> SimResult<Vec<ProcessSpec>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| parse_line(line, line_no))
        .collect()
}

pub fn parse_json(text: &str) -> SimResult<Vec<ProcessSpec>> {
    Ok(serde_json::from_str(text)?)
}

// `.json` is read as a JSON array, anything else as text
pub fn load_path(path: &Path) -> SimResult<Vec<ProcessSpec>> {
    let text = fs::read_to_string(path)?;
    let specs = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_json(&text)?,
        _ => parse_text(&text)?,
    };
    debug!(path = %path.display(), processes = specs.len(), "workload loaded");
    Ok(specs)
}

/// Each tick in `0..ticks` spawns a process with probability `p_arrival`,
/// short with probability `p_short` and long otherwise.
pub fn bernoulli_processes(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            specs.push(ProcessSpec::new(
                specs.len() as ProcessId + 1,
                t as i64,
                burst as i64,
            ));
        }
    }

    specs
}
