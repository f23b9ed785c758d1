//! # helios-testscript - TestScript Document Model
//!
//! This crate provides the data model for declarative conformance test
//! scripts consumed by the Helios Conformance Runner. A script document
//! describes reusable data fixtures, an ordered setup phase, a list of
//! independently addressable test cases, and a teardown phase. Each test
//! case is an ordered list of operations: CRUD-style interactions against a
//! target service plus assertions evaluated against the most recent
//! response.
//!
//! The model is deliberately engine-agnostic: this crate knows nothing
//! about how operations are dispatched or how assertions are evaluated.
//! It covers three concerns:
//!
//! - [`script`] - The script document types ([`Script`], [`TestCase`],
//!   [`Operation`], ...)
//! - [`result`] - The [`TestResult`] output shape consumed by reporting
//!   layers
//! - [`loader`] - Loading script documents from JSON files
//!
//! ## Document format
//!
//! Script documents are JSON. Operations are tagged by `type`:
//!
//! ```json
//! {
//!   "id": "patient-crud",
//!   "name": "Patient CRUD",
//!   "fixtures": [{"id": "patient-1", "uri": "patient-example.json"}],
//!   "setup": {"operations": [{"type": "create", "source": "patient-1"}]},
//!   "tests": [
//!     {
//!       "id": "read-patient",
//!       "name": "Read Patient",
//!       "operations": [
//!         {"type": "read", "target": "patient-1"},
//!         {"type": "assertion", "parameter": "response_okay"}
//!       ]
//!     }
//!   ]
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod loader;
pub mod result;
pub mod script;

pub use loader::{ScriptLoadError, discover_scripts, load_script};
pub use result::{TestResult, TestStatus};
pub use script::{
    CapabilityRef, FixtureDecl, Operation, Phase, Script, TestCase, TestMetadata,
};
