//! Runner configuration.
//!
//! Configured via command line arguments with environment variable
//! overrides:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HCR_SCRIPT` | - | Script document to execute |
//! | `HCR_FIXTURE_DIR` | . | Directory fixture locators resolve against |
//! | `HCR_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |

use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration for the conformance runner.
#[derive(Debug, Clone, Parser)]
#[command(name = "hcr")]
#[command(about = "Helios Conformance Runner - executes declarative TestScript documents")]
pub struct RunnerConfig {
    /// Path to the script document to execute.
    #[arg(short, long, env = "HCR_SCRIPT")]
    pub script: PathBuf,

    /// Directory fixture locators are resolved against.
    #[arg(long, env = "HCR_FIXTURE_DIR", default_value = ".")]
    pub fixture_dir: PathBuf,

    /// Run only the named test cases (repeatable); all tests when omitted.
    #[arg(long = "test", value_name = "ID")]
    pub tests: Vec<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HCR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Pretty-print the JSON report.
    #[arg(long, env = "HCR_PRETTY", default_value = "false")]
    pub pretty: bool,
}
