//! Command-line configuration for the `dynq-rr` binary.

use std::path::PathBuf;
use thiserror::Error;

use crate::{
    core::Ticks,
    error::{InputError, SimError, SimResult},
    scheduler::QuantumMode,
    sim::{
        ProcessSpec,
        workload::{bernoulli_processes, load_path, parse_line},
    },
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("{0}")]
    Process(#[from] SimError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomWorkload {
    pub ticks: Ticks,
    pub seed: u64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
}

impl RandomWorkload {
    pub fn new(ticks: Ticks) -> Self {
        Self {
            ticks,
            seed: 0,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
        }
    }

    pub fn generate(&self) -> Vec<ProcessSpec> {
        bernoulli_processes(
            self.ticks,
            self.p_arrival,
            self.p_short,
            self.short_ticks,
            self.long_ticks,
            self.seed,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    pub mode: QuantumMode,
    pub inputs: Vec<PathBuf>,
    pub processes: Vec<ProcessSpec>,
    pub random: Option<RandomWorkload>,
    pub compare: bool,
    pub csv: Option<PathBuf>,
    pub json: bool,
    pub events: bool,
}

impl RunConfig {
    // Files first, then `--process` rows, then the random generator
    pub fn load_specs(&self) -> SimResult<Vec<ProcessSpec>> {
        let mut specs = Vec::new();
        for path in &self.inputs {
            specs.extend(load_path(path)?);
        }
        specs.extend(self.processes.iter().copied());
        if let Some(random) = &self.random {
            specs.extend(random.generate());
        }
        if specs.is_empty() {
            return Err(InputError::Empty.into());
        }
        Ok(specs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunConfig),
    Help,
}

pub fn parse_args(args: &[String]) -> Result<Command, ConfigError> {
    let mut config = RunConfig::default();
    let mut seed = None;
    let mut i = 1;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--mode" | "-m" => {
                let value = value_for(args, &mut i, flag)?;
                config.mode = value.parse().map_err(|_| invalid(flag, value))?;
            }
            "--input" | "-i" => {
                config.inputs.push(PathBuf::from(value_for(args, &mut i, flag)?));
            }
            "--process" | "-p" => {
                let value = value_for(args, &mut i, flag)?;
                config
                    .processes
                    .push(parse_line(value, config.processes.len() + 1)?);
            }
            "--random" => {
                let value = value_for(args, &mut i, flag)?;
                let ticks = value.parse().map_err(|_| invalid(flag, value))?;
                config.random = Some(RandomWorkload::new(ticks));
            }
            "--seed" => {
                let value = value_for(args, &mut i, flag)?;
                seed = Some(value.parse().map_err(|_| invalid(flag, value))?);
            }
            "--csv" => {
                config.csv = Some(PathBuf::from(value_for(args, &mut i, flag)?));
            }
            "--compare" => config.compare = true,
            "--json" => config.json = true,
            "--events" => config.events = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    if let (Some(seed), Some(random)) = (seed, config.random.as_mut()) {
        random.seed = seed;
    }

    Ok(Command::Run(config))
}

fn value_for<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, ConfigError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -m, --mode <MODE>        arithmetic | geometric | harmonic (default arithmetic)\n\
         \x20 -i, --input <FILE>       read 'pid; arrival; burst' lines, or a JSON array if .json\n\
         \x20 -p, --process <ROW>      add one 'pid; arrival; burst' process (repeatable)\n\
         \x20     --random <TICKS>     generate Bernoulli arrivals over TICKS ticks\n\
         \x20     --seed <N>           seed for --random (default 0)\n\
         \x20     --compare            run all three modes and compare\n\
         \x20     --csv <FILE>         write per-process results as CSV\n\
         \x20     --json               print the report as JSON\n\
         \x20     --events             print every simulation event\n\
         \x20 -h, --help               show this help\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dynq-rr")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_full_command_line() {
        let Command::Run(config) = parse_args(&args(&[
            "--mode",
            "harmonic",
            "-p",
            "1; 0; 5",
            "-p",
            "2;1;3",
            "--random",
            "50",
            "--seed",
            "9",
            "--compare",
            "--csv",
            "out.csv",
        ]))
        .unwrap() else {
            panic!("expected run command");
        };

        assert_eq!(config.mode, QuantumMode::Harmonic);
        assert_eq!(config.processes, vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)]);
        assert_eq!(config.random.as_ref().map(|r| (r.ticks, r.seed)), Some((50, 9)));
        assert!(config.compare);
        assert_eq!(config.csv, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn rejects_bad_flags() {
        assert!(matches!(
            parse_args(&args(&["--mode", "median"])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_args(&args(&["--csv"])),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            parse_args(&args(&["--bogus"])),
            Err(ConfigError::UnknownOption(_))
        ));
        assert_eq!(parse_args(&args(&["-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn no_workload_is_empty_input() {
        let config = RunConfig::default();
        assert!(matches!(
            config.load_specs(),
            Err(SimError::InvalidInput(InputError::Empty))
        ));
    }
}
