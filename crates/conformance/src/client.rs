//! Target client collaborator interface.
//!
//! The engine drives a wire-level client through the [`TestClient`] trait
//! and only ever consumes [`ClientResponse`] values; transport, timeout,
//! and authentication policy all live behind the trait. When no client is
//! configured the engine runs in dry-run mode and every operation is a
//! no-op.

use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::error::ClientError;

/// A response from the target service.
#[derive(Debug, Clone)]
pub struct ClientResponse {
    /// Identifier the service assigned to the resource, when the
    /// interaction produced one.
    pub id: Option<String>,

    /// HTTP status code of the interaction.
    pub status: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,

    /// Decoded resource body, when present.
    pub resource: Option<Value>,
}

impl ClientResponse {
    /// Creates a response with the given status and no id, headers, or body.
    pub fn with_status(status: StatusCode) -> Self {
        ClientResponse {
            id: None,
            status,
            headers: HeaderMap::new(),
            resource: None,
        }
    }

    /// Returns the `resourceType` of the decoded resource, if any.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource
            .as_ref()?
            .get("resourceType")?
            .as_str()
    }
}

/// The wire-level client the engine dispatches operations to.
pub trait TestClient {
    /// Creates a resource from the given payload.
    fn create(&self, payload: &Value) -> Result<ClientResponse, ClientError>;

    /// Reads the resource of the given kind and id.
    fn read(&self, resource_type: &str, id: &str) -> Result<ClientResponse, ClientError>;

    /// Deletes the resource of the given kind and id.
    fn delete(&self, resource_type: &str, id: &str) -> Result<ClientResponse, ClientError>;
}
