use std::{env, process::ExitCode};
use tracing::{error, info};

use dynq_rr::{
    Sim, compare,
    config::{Command, RunConfig, parse_args, usage},
    logging::init_tracing,
    sim::export::{render_comparison, render_report, render_schedule, write_csv_file},
};

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("dynq-rr");

    let config = match parse_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print!("{}", usage(program));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprint!("{}", usage(program));
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    let specs = config.load_specs()?;
    info!(processes = specs.len(), mode = %config.mode, "workload ready");

    if config.compare {
        let outcomes = compare(&specs)?;
        if config.json {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        } else {
            print!("{}", render_comparison(&outcomes));
        }
        return Ok(());
    }

    let mut sim = Sim::new(&specs, config.mode)?;
    if config.events {
        for event in sim.events() {
            println!("{:?}", event?);
        }
    } else {
        sim.run()?;
    }
    let report = sim.report()?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_schedule(sim.schedule()));
        println!();
        print!("{}", render_report(&report));
    }

    if let Some(path) = &config.csv {
        write_csv_file(&report, path)?;
        info!(path = %path.display(), "results written");
    }

    Ok(())
}
