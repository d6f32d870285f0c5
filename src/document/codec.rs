//! Structural validation and (de)serialization of JSON:API documents.
//!
//! Validation checks the shape of a response, not its content: the
//! top-level members, primary data and included resources must be what the
//! JSON:API media type allows. Attribute values are never inspected.

use serde_json::Value;
use thiserror::Error;

use super::Document;

/// Error returned when a response body is not a well-formed JSON:API document.
///
/// # Example
///
/// ```rust
/// use hiweb_api::document::parse;
///
/// let error = parse(r#"{"data": {"id": "1"}}"#).unwrap_err();
/// assert!(error.to_string().contains("type"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid JSON:API response data: {reason}")]
pub struct InvalidResponseError {
    /// What made the document invalid.
    pub reason: String,
}

impl InvalidResponseError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Returns `true` if `raw` is a structurally valid JSON:API response.
///
/// An empty body is valid: the server answers a delete with `204 No Content`.
#[must_use]
pub fn is_valid_response(raw: &str) -> bool {
    raw.trim().is_empty() || validate_body(raw).is_ok()
}

/// Validates and parses a response body into a [`Document`].
///
/// An empty body parses to an empty document.
///
/// # Errors
///
/// Returns [`InvalidResponseError`] if the body is not JSON or does not
/// have the structure of a JSON:API document.
pub fn parse(raw: &str) -> Result<Document, InvalidResponseError> {
    if raw.trim().is_empty() {
        return Ok(Document::default());
    }
    let value = validate_body(raw)?;
    serde_json::from_value(value).map_err(|e| InvalidResponseError::new(e.to_string()))
}

/// Serializes a document to its wire representation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(document)
}

/// Converts a document to a JSON value, ready to use as a request body.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_value(document: &Document) -> Result<Value, serde_json::Error> {
    serde_json::to_value(document)
}

fn validate_body(raw: &str) -> Result<Value, InvalidResponseError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| InvalidResponseError::new(format!("body is not JSON: {e}")))?;
    validate_document(&value)?;
    Ok(value)
}

fn validate_document(value: &Value) -> Result<(), InvalidResponseError> {
    let Some(top) = value.as_object() else {
        return Err(InvalidResponseError::new("top level is not an object"));
    };

    if !["data", "errors", "meta"].iter().any(|m| top.contains_key(*m)) {
        return Err(InvalidResponseError::new(
            "document must contain at least one of 'data', 'errors' or 'meta'",
        ));
    }
    if top.contains_key("data") && top.contains_key("errors") {
        return Err(InvalidResponseError::new(
            "'data' and 'errors' must not coexist",
        ));
    }
    if top.contains_key("included") && !top.contains_key("data") {
        return Err(InvalidResponseError::new("'included' requires 'data'"));
    }

    match top.get("data") {
        None | Some(Value::Null) => {}
        Some(Value::Array(resources)) => {
            for resource in resources {
                validate_resource(resource, "data")?;
            }
        }
        Some(resource @ Value::Object(_)) => validate_resource(resource, "data")?,
        Some(_) => {
            return Err(InvalidResponseError::new(
                "'data' must be null, an object or an array",
            ))
        }
    }

    if let Some(included) = top.get("included") {
        let Some(resources) = included.as_array() else {
            return Err(InvalidResponseError::new("'included' must be an array"));
        };
        for resource in resources {
            validate_resource(resource, "included")?;
        }
    }

    if let Some(errors) = top.get("errors") {
        if !errors.is_array() {
            return Err(InvalidResponseError::new("'errors' must be an array"));
        }
    }

    expect_object(top.get("meta"), "meta")?;
    expect_object(top.get("links"), "links")?;
    Ok(())
}

fn validate_resource(value: &Value, member: &str) -> Result<(), InvalidResponseError> {
    let Some(resource) = value.as_object() else {
        return Err(InvalidResponseError::new(format!(
            "'{member}' contains a resource that is not an object"
        )));
    };

    match resource.get("type") {
        Some(Value::String(kind)) if !kind.is_empty() => {}
        _ => {
            return Err(InvalidResponseError::new(format!(
                "resource in '{member}' has no 'type'"
            )))
        }
    }
    match resource.get("id") {
        Some(Value::String(_) | Value::Number(_)) => {}
        _ => {
            return Err(InvalidResponseError::new(format!(
                "resource in '{member}' has no 'id'"
            )))
        }
    }

    expect_object(resource.get("attributes"), "attributes")?;
    expect_object(resource.get("meta"), "meta")?;
    expect_object(resource.get("links"), "links")?;

    if let Some(relationships) = resource.get("relationships") {
        let Some(relationships) = relationships.as_object() else {
            return Err(InvalidResponseError::new("'relationships' must be an object"));
        };
        for (name, relationship) in relationships {
            validate_relationship(name, relationship)?;
        }
    }
    Ok(())
}

fn validate_relationship(name: &str, value: &Value) -> Result<(), InvalidResponseError> {
    let invalid = || InvalidResponseError::new(format!("relationship '{name}' is malformed"));

    let relationship = value.as_object().ok_or_else(invalid)?;
    if !["data", "links", "meta"]
        .iter()
        .any(|m| relationship.contains_key(*m))
    {
        return Err(invalid());
    }

    match relationship.get("data") {
        None | Some(Value::Null) => {}
        Some(Value::Array(identifiers)) => {
            if !identifiers.iter().all(is_identifier) {
                return Err(invalid());
            }
        }
        Some(identifier) => {
            if !is_identifier(identifier) {
                return Err(invalid());
            }
        }
    }
    Ok(())
}

fn is_identifier(value: &Value) -> bool {
    value.as_object().is_some_and(|identifier| {
        matches!(identifier.get("type"), Some(Value::String(_)))
            && matches!(identifier.get("id"), Some(Value::String(_) | Value::Number(_)))
    })
}

fn expect_object(value: Option<&Value>, member: &str) -> Result<(), InvalidResponseError> {
    match value {
        None | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(InvalidResponseError::new(format!(
            "'{member}' must be an object"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Linkage, Resource};
    use serde_json::json;

    #[test]
    fn test_empty_body_is_an_empty_document() {
        assert!(is_valid_response(""));
        assert_eq!(parse("  ").unwrap(), Document::default());
    }

    #[test]
    fn test_non_json_is_rejected() {
        assert!(!is_valid_response("<html>oops</html>"));
        assert!(parse("<html>oops</html>")
            .unwrap_err()
            .reason
            .contains("not JSON"));
    }

    #[test]
    fn test_top_level_must_be_object_with_known_member() {
        assert!(!is_valid_response("[]"));
        assert!(!is_valid_response(r#"{"links": {}}"#));
        assert!(is_valid_response(r#"{"meta": {"total": 0}}"#));
    }

    #[test]
    fn test_data_and_errors_conflict() {
        assert!(!is_valid_response(r#"{"data": null, "errors": []}"#));
    }

    #[test]
    fn test_included_requires_data() {
        assert!(!is_valid_response(
            r#"{"meta": {}, "included": [{"type": "tags", "id": "1"}]}"#
        ));
    }

    #[test]
    fn test_resources_need_type_and_id() {
        assert!(!is_valid_response(r#"{"data": {"type": "products"}}"#));
        assert!(!is_valid_response(r#"{"data": [{"id": "1"}]}"#));
        assert!(!is_valid_response(r#"{"data": "products"}"#));
        assert!(is_valid_response(r#"{"data": {"type": "products", "id": 7}}"#));
    }

    #[test]
    fn test_malformed_relationship_is_rejected() {
        let body = json!({
            "data": {"type": "products", "id": "1", "relationships": {"category": {}}}
        });
        assert!(!is_valid_response(&body.to_string()));

        let body = json!({
            "data": {"type": "products", "id": "1", "relationships": {"category": {"data": {"id": "3"}}}}
        });
        assert!(!is_valid_response(&body.to_string()));
    }

    #[test]
    fn test_errors_document_parses() {
        let document = parse(r#"{"errors": [{"status": "422", "title": "Invalid"}]}"#).unwrap();
        assert_eq!(document.errors.len(), 1);
        assert!(document.data.is_none());
    }

    #[test]
    fn test_full_document_parses() {
        let body = json!({
            "data": [{
                "type": "products",
                "id": "1",
                "attributes": {"title": "Lamp"},
                "relationships": {"category": {"data": {"type": "categories", "id": "9"}}}
            }],
            "included": [{"type": "categories", "id": "9", "attributes": {"name": "Lighting"}}],
            "meta": {"total": 1},
            "links": {"self": "/products?page=1", "next": null}
        });

        let document = parse(&body.to_string()).unwrap();
        assert_eq!(document.resources()[0].attribute("title"), Some(&json!("Lamp")));
        assert!(matches!(
            document.resources()[0].relationships["category"].data,
            Some(Linkage::ToOne(Some(_)))
        ));
        assert_eq!(document.included[0].kind, "categories");
        assert_eq!(document.meta["total"], json!(1));
        assert!(!document.has_next_link());
    }

    #[test]
    fn test_serialized_update_round_trips() {
        let outgoing = Document::single(
            Resource::new("products")
                .with_id("15")
                .with_attribute("title", json!("x")),
        );
        let echoed = parse(&serialize(&outgoing).unwrap()).unwrap();
        let resource = echoed.resource().unwrap();
        assert_eq!(resource.id.as_deref(), Some("15"));
        assert_eq!(resource.attribute("title"), Some(&json!("x")));
    }
}
