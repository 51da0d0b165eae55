use std::path::PathBuf;
use std::process::ExitCode;

use eigshow::{run_demo, DemoConfig, EigError};

const CONFIG_ENV: &str = "EIGSHOW_CONFIG";

fn load_config() -> Result<DemoConfig, EigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => DemoConfig::load(&PathBuf::from(path)),
        None => Ok(DemoConfig::default()),
    }
}

fn run() -> Result<(), EigError> {
    let config = load_config()?;
    let output = run_demo(&config)?;

    println!("two-site Heisenberg Hamiltonian");
    for line in &output.lines {
        println!("{line}");
    }
    println!("V^T H V ={}", output.diagonal_form);

    for (backend, lines) in &output.degenerate_lines {
        println!("degenerate sample ({backend} backend)");
        for line in lines {
            println!("{line}");
        }
    }
    for entry in &output.comparison.subspaces {
        println!(
            "E = {:.3} x{}: projector distance {:.1e}, component difference {:.3}",
            entry.eigenvalue,
            entry.block.multiplicity,
            entry.projector_distance,
            entry.max_component_difference
        );
    }
    println!(
        "backends equivalent: {}",
        if output.comparison.equivalent { "yes" } else { "no" }
    );
    Ok(())
}

fn main() -> ExitCode {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
