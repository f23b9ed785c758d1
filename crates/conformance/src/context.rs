//! Per-run execution state.
//!
//! Exactly one [`ExecutionContext`] exists per script run. Setup, every
//! test case, and teardown observe and mutate the same value, so
//! identifiers created in one phase are visible to the next - cross-test
//! data flow is part of the documented contract, not a defect.

use std::collections::HashMap;

use crate::client::ClientResponse;

/// Mapping from fixture identifier to the identifier the target service
/// assigned on create.
///
/// Last-write-wins per key. Not safe for concurrent mutation; the engine
/// is single-threaded and never shares a map across runs.
#[derive(Debug, Default)]
pub struct ReferenceMap {
    entries: HashMap<String, String>,
}

impl ReferenceMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        ReferenceMap::default()
    }

    /// Records the service-assigned identifier for a fixture.
    pub fn put(&mut self, fixture_id: impl Into<String>, assigned_id: impl Into<String>) {
        self.entries.insert(fixture_id.into(), assigned_id.into());
    }

    /// Returns the service-assigned identifier for a fixture, if any.
    pub fn get(&self, fixture_id: &str) -> Option<&str> {
        self.entries.get(fixture_id).map(String::as_str)
    }

    /// Removes the entry for a fixture.
    pub fn remove(&mut self, fixture_id: &str) {
        self.entries.remove(fixture_id);
    }

    /// Returns true when no fixture has a recorded identifier.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable state threaded through every operation of one script run.
///
/// A context is created inside the runner when a run starts and dropped
/// when it finishes; it is never reused across runs, so created-resource
/// identifiers cannot leak between executions.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    /// Identifiers assigned by the target for created fixtures.
    pub references: ReferenceMap,

    /// Response of the most recent client interaction.
    pub last_response: Option<ClientResponse>,
}

impl ExecutionContext {
    /// Creates a fresh context with no references and no response.
    pub fn new() -> Self {
        ExecutionContext::default()
    }
}
