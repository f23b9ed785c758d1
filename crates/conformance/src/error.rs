//! Error types for the conformance engine.
//!
//! The engine keeps two failure tiers strictly apart:
//!
//! - **Assertion failures** - an expected condition did not hold. These are
//!   domain-level outcomes and map to test status `fail`.
//! - **Faults** - anything systemic: unknown assertion keywords, unresolved
//!   references, client errors. These map to test status `error`.
//!
//! | Error | Raised by | Test status |
//! |-------|-----------|-------------|
//! | `OperationError::AssertionFailed` | assertion checks | fail |
//! | `OperationError::Fault` | everything else | error |
//! | `FixtureLoadError` | fixture resolution | aborts construction |
//! | `ScriptError` | script lifecycle | aborts the run |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Why a single operation did not complete.
#[derive(Error, Debug)]
pub enum OperationError {
    /// An assertion's expected condition did not hold.
    #[error("{message}")]
    AssertionFailed { message: String, data: String },

    /// A systemic fault that makes the outcome meaningless.
    #[error(transparent)]
    Fault(#[from] Fault),
}

/// Unexpected, systemic errors. Never conflated with assertion failures.
#[derive(Error, Debug)]
pub enum Fault {
    /// The assertion keyword is not in the supported table.
    #[error("unsupported assertion: {0}")]
    UnsupportedAssertion(String),

    /// The assertion parameter does not follow the compact encoding.
    #[error("malformed assertion parameter: {0}")]
    MalformedParameter(String),

    /// An assertion was evaluated before any operation produced a response.
    #[error("no response available to assert against")]
    NoResponse,

    /// An operation referenced a fixture the script never declared.
    #[error("unknown fixture: {0}")]
    UnknownFixture(String),

    /// A read or delete targeted a fixture with no created resource.
    #[error("no created resource is registered for fixture {0}")]
    UnresolvedReference(String),

    /// A create response carried no service-assigned identifier.
    #[error("create response for fixture {0} carried no resource id")]
    MissingCreatedId(String),

    /// The target client collaborator failed.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

/// Errors raised by the target client collaborator.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The interaction could not reach the target.
    #[error("transport error: {0}")]
    Transport(String),

    /// The target answered with something the client could not decode.
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

/// Errors resolving a declared fixture.
///
/// Any of these aborts script-instance construction; no test runs.
#[derive(Error, Debug)]
pub enum FixtureLoadError {
    /// The fixture source could not be read.
    #[error("fixture source {locator} could not be read: {message}")]
    Unreadable { locator: String, message: String },

    /// The fixture source is not a valid resource payload.
    #[error("fixture source {locator} is not a valid payload: {message}")]
    Invalid { locator: String, message: String },
}

/// Lifecycle-level failures that abort a script instance.
///
/// Setup and teardown faults are deliberately not converted into per-test
/// results: they are environment-level problems and propagate to the
/// caller, aborting the remaining lifecycle.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// A declared fixture could not be resolved at construction.
    #[error(transparent)]
    Fixture(#[from] FixtureLoadError),

    /// An operation failed during the setup phase.
    #[error("setup failed: {0}")]
    Setup(#[source] OperationError),

    /// An operation failed during the teardown phase.
    #[error("teardown failed: {0}")]
    Teardown(#[source] OperationError),
}
