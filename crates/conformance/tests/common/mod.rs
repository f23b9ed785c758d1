//! Common test utilities for engine integration testing.
//!
//! Provides a scripted in-memory stand-in for the target service, an
//! in-memory fixture loader, and script document builders.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use http::{HeaderMap, HeaderValue, StatusCode, header};
use serde_json::{Value, json};

use helios_conformance::{ClientError, ClientResponse, FixtureLoader, FixtureLoadError, TestClient};
use helios_testscript::Script;

/// A recorded client interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { resource_type: String },
    Read { resource_type: String, id: String },
    Delete { resource_type: String, id: String },
}

/// In-memory stand-in for the target service.
///
/// Assigns sequential identifiers on create, serves stored resources back
/// on read, and answers 404 for unknown ids and 410 for deleted ones.
/// Every interaction is recorded for later inspection.
pub struct MockClient {
    resources: RefCell<HashMap<String, Value>>,
    deleted: RefCell<HashSet<String>>,
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
}

impl MockClient {
    pub fn new() -> Self {
        MockClient {
            resources: RefCell::new(HashMap::new()),
            deleted: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// The interactions performed so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn response_headers(location: Option<String>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json+fhir; charset=UTF-8"),
        );
        headers.insert(
            header::LAST_MODIFIED,
            HeaderValue::from_static("Tue, 15 Nov 1994 08:12:31 GMT"),
        );
        if let Some(location) = location {
            headers.insert(
                header::CONTENT_LOCATION,
                HeaderValue::from_str(&location).expect("valid header value"),
            );
        }
        headers
    }
}

impl TestClient for MockClient {
    fn create(&self, payload: &Value) -> Result<ClientResponse, ClientError> {
        let resource_type = payload
            .get("resourceType")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        self.calls.borrow_mut().push(Call::Create {
            resource_type: resource_type.clone(),
        });

        let id = self.next_id.get().to_string();
        self.next_id.set(self.next_id.get() + 1);

        let mut resource = payload.clone();
        resource["id"] = json!(id);
        self.resources.borrow_mut().insert(id.clone(), resource.clone());

        Ok(ClientResponse {
            id: Some(id.clone()),
            status: StatusCode::CREATED,
            headers: Self::response_headers(Some(format!(
                "/{}/{}/_history/1",
                resource_type, id
            ))),
            resource: Some(resource),
        })
    }

    fn read(&self, resource_type: &str, id: &str) -> Result<ClientResponse, ClientError> {
        self.calls.borrow_mut().push(Call::Read {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        });

        if self.deleted.borrow().contains(id) {
            return Ok(ClientResponse::with_status(StatusCode::GONE));
        }
        match self.resources.borrow().get(id) {
            Some(resource) => Ok(ClientResponse {
                id: Some(id.to_string()),
                status: StatusCode::OK,
                headers: Self::response_headers(None),
                resource: Some(resource.clone()),
            }),
            None => Ok(ClientResponse::with_status(StatusCode::NOT_FOUND)),
        }
    }

    fn delete(&self, resource_type: &str, id: &str) -> Result<ClientResponse, ClientError> {
        self.calls.borrow_mut().push(Call::Delete {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        });

        if self.resources.borrow_mut().remove(id).is_some() {
            self.deleted.borrow_mut().insert(id.to_string());
            Ok(ClientResponse::with_status(StatusCode::OK))
        } else {
            Ok(ClientResponse::with_status(StatusCode::NOT_FOUND))
        }
    }
}

/// A client whose every interaction fails at the transport level.
pub struct FailingClient;

impl TestClient for FailingClient {
    fn create(&self, _payload: &Value) -> Result<ClientResponse, ClientError> {
        Err(ClientError::Transport("connection refused".to_string()))
    }

    fn read(&self, _resource_type: &str, _id: &str) -> Result<ClientResponse, ClientError> {
        Err(ClientError::Transport("connection refused".to_string()))
    }

    fn delete(&self, _resource_type: &str, _id: &str) -> Result<ClientResponse, ClientError> {
        Err(ClientError::Transport("connection refused".to_string()))
    }
}

/// In-memory fixture loader backed by a locator -> payload map.
pub struct MapLoader {
    payloads: HashMap<String, Value>,
}

impl MapLoader {
    pub fn new(entries: &[(&str, Value)]) -> Self {
        MapLoader {
            payloads: entries
                .iter()
                .map(|(locator, payload)| (locator.to_string(), payload.clone()))
                .collect(),
        }
    }
}

impl FixtureLoader for MapLoader {
    fn load(&self, locator: &str) -> Result<Value, FixtureLoadError> {
        self.payloads
            .get(locator)
            .cloned()
            .ok_or_else(|| FixtureLoadError::Unreadable {
                locator: locator.to_string(),
                message: "no such fixture".to_string(),
            })
    }
}

/// Parses a script document from inline JSON.
pub fn script(document: Value) -> Script {
    serde_json::from_value(document).expect("valid script document")
}

/// A loader holding one Patient fixture under `patient-example.json`.
pub fn patient_loader() -> MapLoader {
    MapLoader::new(&[(
        "patient-example.json",
        json!({"resourceType": "Patient", "name": [{"family": "Smith"}], "active": true}),
    )])
}
