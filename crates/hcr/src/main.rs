//! Helios Conformance Runner (hcr)
//!
//! Executes a declarative TestScript document and reports per-test results
//! as JSON. Without a configured target the run is a dry run: operations
//! are no-ops and the report reflects script structure and fixture
//! resolution only.

use clap::Parser;
use tracing::info;

use helios_conformance::{FsFixtureLoader, ScriptRunner};
use helios_testscript::load_script;

mod config;

use config::RunnerConfig;

/// Initializes the tracing subscriber for logging.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("hcr={},helios_conformance={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = RunnerConfig::parse();
    init_logging(&config.log_level);

    let script = load_script(&config.script)?;
    info!(
        script = %script.id,
        tests = script.tests.len(),
        "Loaded script document"
    );

    let loader = FsFixtureLoader::new(&config.fixture_dir);
    // The wire-level client is an external collaborator; the command line
    // runner always executes in dry-run mode.
    let runner = ScriptRunner::new(&script, &loader, None)?;

    let results = if config.tests.is_empty() {
        runner.run()?
    } else {
        let ids: Vec<&str> = config.tests.iter().map(String::as_str).collect();
        runner.run_selected(&ids)?
    };

    let report = if config.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{}", report);

    if results.iter().all(|r| r.is_pass()) {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
