//! # helios-conformance - TestScript Execution Engine
//!
//! This crate executes declarative conformance test scripts (modeled by
//! [`helios-testscript`](helios_testscript)) against a target service and
//! reports structured pass/fail/error outcomes per test case.
//!
//! The engine is a small interpreter: operations are its instruction set,
//! assertion parameters its micro-syntax, and the per-run
//! [`ExecutionContext`] its mutable state.
//!
//! ## Execution model
//!
//! A [`ScriptRunner`] is constructed from a script, a fixture loader, and
//! an optional target client:
//!
//! 1. **Construction** - every declared fixture is resolved through the
//!    [`FixtureLoader`]; a load failure aborts construction and no test
//!    runs.
//! 2. **Setup** - the setup phase's operations run in order. Faults are
//!    not caught: a setup failure is an environment-level problem and
//!    aborts the run.
//! 3. **Tests** - each selected test case runs in declaration order.
//!    Within a test, operations run strictly in order and the first
//!    assertion failure or fault ends the test (fail-fast). Failures map
//!    to status `fail`, faults to status `error`.
//! 4. **Teardown** - symmetric with setup.
//!
//! Setup, every test, and teardown share one [`ExecutionContext`]: the
//! reference map of created-resource identifiers and the most recent
//! response. Cross-test data flow through this context is part of the
//! documented contract.
//!
//! ## Dry-run mode
//!
//! With no target client configured, every operation is a no-op. This is
//! deliberate: it exercises fixture resolution and script structure
//! without touching a server.
//!
//! ## Failure tiers
//!
//! | Tier | Cause | Test status |
//! |------|-------|-------------|
//! | assertion failure | expected condition did not hold | `fail` |
//! | fault | unknown keyword, unresolved reference, client error, ... | `error` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use helios_conformance::{FsFixtureLoader, ScriptRunner};
//! use helios_testscript::load_script;
//!
//! let script = load_script("patient-crud.json".as_ref())?;
//! let loader = FsFixtureLoader::new("fixtures");
//! let runner = ScriptRunner::new(&script, &loader, Some(&client))?;
//! for result in runner.run()? {
//!     println!("{}: {}", result.id, result.status);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod assertions;
pub mod client;
pub mod context;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod runner;

// Re-export commonly used types
pub use assertions::Assertion;
pub use client::{ClientResponse, TestClient};
pub use context::{ExecutionContext, ReferenceMap};
pub use error::{ClientError, Fault, FixtureLoadError, OperationError, ScriptError};
pub use executor::OperationExecutor;
pub use fixtures::{FixtureLoader, FixtureStore, FsFixtureLoader};
pub use runner::{ScriptRunner, TestCaseRunner};
