//! Assertion checks and the compact parameter encoding.
//!
//! An assertion operation carries a parameter string: either a bare keyword
//! (`response_okay`) or `keyword:value` for the two keywords that take an
//! argument (`code:<status>` and `resource_type:<Kind>`). Keywords are
//! matched exactly and case-sensitively for compatibility with existing
//! script documents.
//!
//! The keyword set is closed; an unknown keyword is a [`Fault`], never an
//! assertion failure, so it surfaces as test status `error`.

use http::header;
use serde_json::Value;

use crate::client::ClientResponse;
use crate::error::{Fault, OperationError};

/// Accepted content types for the `valid_content_type` check.
const FHIR_XML: &str = "application/xml+fhir";
const FHIR_JSON: &str = "application/json+fhir";

/// The closed set of checks an assertion operation can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// `equals` - structural equality of two supplied values. The parameter
    /// encoding cannot carry the operands, so evaluation always faults;
    /// the keyword is still recognized for compatibility.
    Equals,

    /// `code:<status>` - the response status code equals the argument.
    ResponseCode(u16),

    /// `response_okay` - the response status code is 200 or 201.
    ResponseOkay,

    /// `response_gone` - the response status code is 410.
    ResponseGone,

    /// `response_not_found` - the response status code is 404.
    ResponseNotFound,

    /// `response_bad` - the response status code is 400.
    ResponseBad,

    /// `navigation_links` - the decoded resource is a paged bundle carrying
    /// first, last, and next links.
    NavigationLinks,

    /// `resource_type:<Kind>` - the decoded resource is of the given kind.
    ResourceType(String),

    /// `valid_content_type` - the `content-type` header is a FHIR media
    /// type with charset UTF-8.
    ValidContentType,

    /// `valid_content_location` - the `content-location` header is present
    /// and well-formed.
    ValidContentLocation,

    /// `valid_last_modified` - the `last-modified` header is present and a
    /// well-formed HTTP date.
    ValidLastModified,
}

impl Assertion {
    /// Parses the compact parameter encoding.
    ///
    /// Unknown keywords and malformed arguments are faults; the caller maps
    /// them to test status `error`.
    pub fn parse(parameter: &str) -> Result<Self, Fault> {
        match parameter.split_once(':') {
            Some(("code", value)) => {
                let code = value.parse::<u16>().map_err(|_| {
                    Fault::MalformedParameter(format!("code argument is not numeric: {}", value))
                })?;
                Ok(Assertion::ResponseCode(code))
            }
            Some(("resource_type", value)) if !value.is_empty() => {
                Ok(Assertion::ResourceType(value.to_string()))
            }
            Some(_) => Err(Fault::MalformedParameter(parameter.to_string())),
            None => match parameter {
                "equals" => Ok(Assertion::Equals),
                "response_okay" => Ok(Assertion::ResponseOkay),
                "response_gone" => Ok(Assertion::ResponseGone),
                "response_not_found" => Ok(Assertion::ResponseNotFound),
                "response_bad" => Ok(Assertion::ResponseBad),
                "navigation_links" => Ok(Assertion::NavigationLinks),
                "valid_content_type" => Ok(Assertion::ValidContentType),
                "valid_content_location" => Ok(Assertion::ValidContentLocation),
                "valid_last_modified" => Ok(Assertion::ValidLastModified),
                "response_code" | "resource_type" => Err(Fault::MalformedParameter(format!(
                    "{} requires an argument",
                    parameter
                ))),
                other => Err(Fault::UnsupportedAssertion(other.to_string())),
            },
        }
    }

    /// Evaluates the check against the most recent response.
    ///
    /// Evaluation is deterministic and side-effect-free: re-evaluating
    /// against the same response always yields the same outcome. An
    /// assertion with no prior response is a fault, not a failure - the
    /// data precondition was violated.
    pub fn evaluate(&self, last_response: Option<&ClientResponse>) -> Result<(), OperationError> {
        let response = last_response.ok_or(Fault::NoResponse)?;

        match self {
            Assertion::Equals => Err(Fault::MalformedParameter(
                "equals requires two operands, which the parameter encoding cannot supply"
                    .to_string(),
            )
            .into()),
            Assertion::ResponseCode(expected) => {
                check_status(response, &[*expected], &format!("status {}", expected))
            }
            Assertion::ResponseOkay => check_status(response, &[200, 201], "status 200 or 201"),
            Assertion::ResponseGone => check_status(response, &[410], "status 410"),
            Assertion::ResponseNotFound => check_status(response, &[404], "status 404"),
            Assertion::ResponseBad => check_status(response, &[400], "status 400"),
            Assertion::NavigationLinks => check_navigation_links(response),
            Assertion::ResourceType(expected) => check_resource_type(response, expected),
            Assertion::ValidContentType => check_content_type(response),
            Assertion::ValidContentLocation => check_content_location(response),
            Assertion::ValidLastModified => check_last_modified(response),
        }
    }
}

/// Builds the `fail` tier of the two failure tiers.
fn fail(message: String, data: String) -> OperationError {
    OperationError::AssertionFailed { message, data }
}

fn check_status(
    response: &ClientResponse,
    expected: &[u16],
    label: &str,
) -> Result<(), OperationError> {
    let actual = response.status.as_u16();
    if expected.contains(&actual) {
        Ok(())
    } else {
        Err(fail(
            format!("Expected {}, got {}", label, actual),
            format!("expected: {:?}, actual: {}", expected, actual),
        ))
    }
}

fn check_resource_type(response: &ClientResponse, expected: &str) -> Result<(), OperationError> {
    let actual = response.resource_type().unwrap_or("");
    if actual == expected {
        Ok(())
    } else {
        Err(fail(
            format!("Expected resourceType {}, got {}", expected, actual),
            format!("expected: {}, actual: {}", expected, actual),
        ))
    }
}

fn check_navigation_links(response: &ClientResponse) -> Result<(), OperationError> {
    let links = response
        .resource
        .as_ref()
        .and_then(|r| r.get("link"))
        .and_then(Value::as_array);

    let Some(links) = links else {
        return Err(fail(
            "Expected first, last, and next navigation links".to_string(),
            "response resource carries no link array".to_string(),
        ));
    };

    let has_relation = |relation: &str| {
        links
            .iter()
            .any(|link| link.get("relation").and_then(Value::as_str) == Some(relation))
    };

    let missing: Vec<&str> = ["first", "last", "next"]
        .into_iter()
        .filter(|relation| !has_relation(relation))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(fail(
            format!("Bundle is missing navigation links: {}", missing.join(", ")),
            format!("missing relations: {:?}", missing),
        ))
    }
}

fn check_content_type(response: &ClientResponse) -> Result<(), OperationError> {
    let Some(raw) = header_str(response, header::CONTENT_TYPE) else {
        return Err(fail(
            "Expected a content-type header".to_string(),
            String::new(),
        ));
    };

    let media_type: mime::Mime = raw.parse().map_err(|_| {
        fail(
            format!("Malformed content-type: {}", raw),
            format!("actual: {}", raw),
        )
    })?;

    let essence = media_type.essence_str();
    if essence != FHIR_XML && essence != FHIR_JSON {
        return Err(fail(
            format!(
                "Expected content-type {} or {}, got {}",
                FHIR_XML, FHIR_JSON, essence
            ),
            format!("actual: {}", raw),
        ));
    }

    match media_type.get_param(mime::CHARSET) {
        Some(charset) if charset == mime::UTF_8 => Ok(()),
        _ => Err(fail(
            format!("Expected charset UTF-8 in content-type {}", raw),
            format!("actual: {}", raw),
        )),
    }
}

fn check_content_location(response: &ClientResponse) -> Result<(), OperationError> {
    let Some(raw) = header_str(response, header::CONTENT_LOCATION) else {
        return Err(fail(
            "Expected a content-location header".to_string(),
            String::new(),
        ));
    };

    if well_formed_reference(raw) {
        Ok(())
    } else {
        Err(fail(
            format!("Malformed content-location: {}", raw),
            format!("actual: {}", raw),
        ))
    }
}

fn check_last_modified(response: &ClientResponse) -> Result<(), OperationError> {
    let Some(raw) = header_str(response, header::LAST_MODIFIED) else {
        return Err(fail(
            "Expected a last-modified header".to_string(),
            String::new(),
        ));
    };

    if chrono::DateTime::parse_from_rfc2822(raw).is_ok() {
        Ok(())
    } else {
        Err(fail(
            format!("Malformed last-modified: {}", raw),
            format!("actual: {}", raw),
        ))
    }
}

fn header_str<'a>(
    response: &'a ClientResponse,
    name: header::HeaderName,
) -> Option<&'a str> {
    response.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Content-Location may be an absolute URL or a relative reference; a
/// relative reference is validated by resolving against a placeholder base.
fn well_formed_reference(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            url::Url::parse("http://placeholder.invalid/")
                .and_then(|base| base.join(value))
                .is_ok()
        }
        Err(_) => false,
    }
}
