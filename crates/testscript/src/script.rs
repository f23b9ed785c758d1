//! Script document types.
//!
//! A [`Script`] is immutable once loaded. Fixtures are declared up front and
//! resolved once per script instance; setup and teardown are optional phases
//! that bracket the test cases.

use serde::{Deserialize, Serialize};

/// A declarative conformance test script document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Script {
    /// Script identifier.
    pub id: String,

    /// Script name, also used as the author attribution in reports.
    pub name: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Description of what the script covers.
    #[serde(default)]
    pub description: String,

    /// Fixture declarations, resolved once per script instance.
    #[serde(default)]
    pub fixtures: Vec<FixtureDecl>,

    /// Operations executed once before any test case.
    #[serde(default)]
    pub setup: Option<Phase>,

    /// Test cases, in execution order.
    #[serde(default)]
    pub tests: Vec<TestCase>,

    /// Operations executed once after the last test case.
    #[serde(default)]
    pub teardown: Option<Phase>,
}

/// A named fixture and the locator its payload is loaded from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixtureDecl {
    /// Fixture identifier, referenced by operations.
    pub id: String,

    /// Source locator for the fixture payload.
    pub uri: String,
}

/// An ordered list of operations forming a setup or teardown phase.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Phase {
    /// Operations in execution order.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// A single test case: an ordered list of operations plus optional
/// conformance metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TestCase {
    /// Test identifier.
    pub id: String,

    /// Test name.
    pub name: String,

    /// Operations in execution order.
    #[serde(default)]
    pub operations: Vec<Operation>,

    /// Conformance metadata echoed onto the test's result.
    #[serde(default)]
    pub metadata: Option<TestMetadata>,
}

/// Conformance metadata declared on a test case.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TestMetadata {
    /// Capabilities the target must support for the test to be meaningful.
    #[serde(default)]
    pub requires: Vec<CapabilityRef>,

    /// Capabilities the test exercises and validates.
    #[serde(default)]
    pub validates: Vec<CapabilityRef>,

    /// Documentation links for the behavior under test.
    #[serde(default)]
    pub links: Vec<String>,
}

/// A resource kind paired with the operation kinds it is exercised with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CapabilityRef {
    /// Resource kind, e.g. `Patient`.
    pub resource: String,

    /// Operation kinds, e.g. `create`, `read`.
    #[serde(default)]
    pub methods: Vec<String>,
}

/// One instruction within a setup, test, or teardown phase.
///
/// The operation set is closed: anything outside these four kinds is
/// rejected when the document is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    /// Sends a fixture payload to the target's create interaction and
    /// records the service-assigned identifier under the fixture id.
    Create {
        /// Fixture whose payload is sent.
        source: String,
    },

    /// Reads the resource previously created for a fixture.
    Read {
        /// Fixture whose created resource is read.
        target: String,
    },

    /// Deletes the resource previously created for a fixture.
    Delete {
        /// Fixture whose created resource is deleted.
        target: String,
    },

    /// Evaluates a named check against the most recent response.
    Assertion {
        /// Compact check encoding, e.g. `response_okay` or `code:404`.
        parameter: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_tag_forms() {
        let create: Operation =
            serde_json::from_value(json!({"type": "create", "source": "patient-1"})).unwrap();
        assert_eq!(
            create,
            Operation::Create {
                source: "patient-1".to_string()
            }
        );

        let assertion: Operation =
            serde_json::from_value(json!({"type": "assertion", "parameter": "code:404"})).unwrap();
        assert_eq!(
            assertion,
            Operation::Assertion {
                parameter: "code:404".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_operation_kind_rejected() {
        let result: Result<Operation, _> =
            serde_json::from_value(json!({"type": "update", "target": "patient-1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_script_document_minimal() {
        let script: Script = serde_json::from_value(json!({
            "id": "empty",
            "name": "Empty Script"
        }))
        .unwrap();

        assert!(script.fixtures.is_empty());
        assert!(script.setup.is_none());
        assert!(script.tests.is_empty());
        assert!(script.teardown.is_none());
    }

    #[test]
    fn test_script_document_full() {
        let script: Script = serde_json::from_value(json!({
            "id": "patient-crud",
            "name": "Patient CRUD",
            "title": "Patient create/read/delete",
            "description": "Exercises the basic Patient lifecycle",
            "fixtures": [{"id": "patient-1", "uri": "patient-example.json"}],
            "setup": {"operations": [{"type": "create", "source": "patient-1"}]},
            "tests": [{
                "id": "read-patient",
                "name": "Read Patient",
                "operations": [
                    {"type": "read", "target": "patient-1"},
                    {"type": "assertion", "parameter": "response_okay"}
                ],
                "metadata": {
                    "requires": [{"resource": "Patient", "methods": ["create", "read"]}],
                    "links": ["https://hl7.org/fhir/http.html#read"]
                }
            }],
            "teardown": {"operations": [{"type": "delete", "target": "patient-1"}]}
        }))
        .unwrap();

        assert_eq!(script.fixtures.len(), 1);
        assert_eq!(script.setup.as_ref().unwrap().operations.len(), 1);
        assert_eq!(script.tests.len(), 1);

        let metadata = script.tests[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.requires[0].resource, "Patient");
        assert!(metadata.validates.is_empty());
        assert_eq!(metadata.links.len(), 1);
    }
}
