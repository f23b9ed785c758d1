//! Fixture resolution.
//!
//! Fixture payloads are loaded once, at script-instance construction,
//! through the [`FixtureLoader`] collaborator. A load failure aborts
//! construction; no test runs against a partially resolved store.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use helios_testscript::FixtureDecl;

use crate::error::FixtureLoadError;

/// Loads fixture payloads from source locators.
pub trait FixtureLoader {
    /// Loads the payload identified by `locator`.
    fn load(&self, locator: &str) -> Result<Value, FixtureLoadError>;
}

/// Filesystem-backed fixture loader.
///
/// Locators are resolved as paths relative to a root directory; payloads
/// are JSON files.
#[derive(Debug, Clone)]
pub struct FsFixtureLoader {
    root: PathBuf,
}

impl FsFixtureLoader {
    /// Creates a loader rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFixtureLoader { root: root.into() }
    }
}

impl FixtureLoader for FsFixtureLoader {
    fn load(&self, locator: &str) -> Result<Value, FixtureLoadError> {
        let path = self.root.join(locator);
        let content =
            std::fs::read_to_string(&path).map_err(|e| FixtureLoadError::Unreadable {
                locator: locator.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&content).map_err(|e| FixtureLoadError::Invalid {
            locator: locator.to_string(),
            message: e.to_string(),
        })
    }
}

/// Resolved fixture payloads for one script instance.
///
/// The store exclusively owns the resolved payload map; operations borrow
/// payloads from it for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct FixtureStore {
    payloads: HashMap<String, Value>,
}

impl FixtureStore {
    /// Resolves every declared fixture through the loader.
    pub fn resolve(
        declarations: &[FixtureDecl],
        loader: &dyn FixtureLoader,
    ) -> Result<Self, FixtureLoadError> {
        let mut payloads = HashMap::new();
        for decl in declarations {
            debug!(fixture = %decl.id, uri = %decl.uri, "Resolving fixture");
            let payload = loader.load(&decl.uri)?;
            payloads.insert(decl.id.clone(), payload);
        }
        Ok(FixtureStore { payloads })
    }

    /// Returns the payload for a fixture id.
    pub fn payload(&self, id: &str) -> Option<&Value> {
        self.payloads.get(id)
    }

    /// Returns the declared resource kind of a fixture's payload.
    pub fn resource_type(&self, id: &str) -> Option<&str> {
        self.payload(id)?.get("resourceType")?.as_str()
    }

    /// Number of resolved fixtures.
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Returns true when the script declared no fixtures.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
