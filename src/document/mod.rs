//! JSON:API document model and codec.
//!
//! This module provides the serde model of the JSON:API media type
//! (`application/vnd.api+json`) and the functions that move it on and off
//! the wire:
//!
//! - [`Document`]: top-level document (primary data, included, meta, links)
//! - [`Resource`]: a resource object
//! - [`Relationship`] and [`Linkage`]: relationship objects and resource linkage
//! - [`parse`] / [`serialize`]: structural validation plus (de)serialization
//!
//! Empty `attributes`, `relationships` and `meta` members are omitted when a
//! document is serialized. The backend rejects empty objects on some
//! endpoints, so a resource built with no attributes goes out as
//! `{"type": "..."}` only.
//!
//! # Example
//!
//! ```rust
//! use hiweb_api::document::{self, Document, Resource};
//! use serde_json::json;
//!
//! let resource = Resource::new("products").with_attribute("title", json!("Lamp"));
//! let body = document::serialize(&Document::single(resource)).unwrap();
//! assert_eq!(body, r#"{"data":{"type":"products","attributes":{"title":"Lamp"}}}"#);
//! ```

mod codec;

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use codec::{is_valid_response, parse, serialize, to_value, InvalidResponseError};

/// A JSON object, in insertion order.
pub type JsonMap = serde_json::Map<String, Value>;

/// The media type of every request and response body.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// A resource identifier object (`{"type": ..., "id": ...}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// The resource id.
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    /// Non-standard meta information about the linkage.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub meta: JsonMap,
}

impl ResourceIdentifier {
    /// Creates an identifier for the given type and id.
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            meta: JsonMap::new(),
        }
    }
}

/// Resource linkage of a relationship.
///
/// An explicit `null` to-one linkage is kept as `ToOne(None)` so that it
/// can be sent back to clear a relationship.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    /// To-many linkage (possibly empty).
    ToMany(Vec<ResourceIdentifier>),
    /// To-one linkage, `None` for an empty relationship.
    ToOne(Option<ResourceIdentifier>),
}

/// A relationship object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Resource linkage. `None` when the member is absent.
    #[serde(
        default,
        deserialize_with = "present_linkage",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Linkage>,
    /// Relationship links (`self`, `related`).
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub links: JsonMap,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub meta: JsonMap,
}

impl Relationship {
    /// A to-one relationship pointing at `kind`/`id`.
    #[must_use]
    pub fn to_one(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            data: Some(Linkage::ToOne(Some(ResourceIdentifier::new(kind, id)))),
            ..Self::default()
        }
    }

    /// An empty to-one relationship (`"data": null`).
    #[must_use]
    pub fn empty_to_one() -> Self {
        Self {
            data: Some(Linkage::ToOne(None)),
            ..Self::default()
        }
    }

    /// A to-many relationship.
    #[must_use]
    pub fn to_many(identifiers: impl IntoIterator<Item = ResourceIdentifier>) -> Self {
        Self {
            data: Some(Linkage::ToMany(identifiers.into_iter().collect())),
            ..Self::default()
        }
    }
}

/// A resource object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// The resource id; absent until the server has created the resource.
    #[serde(
        default,
        deserialize_with = "optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Attribute values.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub attributes: JsonMap,
    /// Relationships by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub meta: JsonMap,
    /// Resource links.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub links: JsonMap,
}

impl Resource {
    /// Creates an empty resource of the given type with no id.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets one attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Sets one relationship.
    #[must_use]
    pub fn with_relationship(mut self, name: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }

    /// Returns an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns the identifier of this resource, if it has an id.
    #[must_use]
    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id
            .as_ref()
            .map(|id| ResourceIdentifier::new(self.kind.clone(), id.clone()))
    }
}

/// Primary data of a document: a single resource or a collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// Collection responses.
    Many(Vec<Resource>),
    /// Find, create, update and delete responses.
    One(Box<Resource>),
}

/// A top-level JSON:API document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data. `None` when absent or `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PrimaryData>,
    /// Side-loaded resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub meta: JsonMap,
    /// Top-level links, including pagination links.
    #[serde(default, skip_serializing_if = "JsonMap::is_empty")]
    pub links: JsonMap,
    /// Error objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
    /// The `jsonapi` member, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<Value>,
}

impl Document {
    /// A document whose primary data is one resource.
    #[must_use]
    pub fn single(resource: Resource) -> Self {
        Self {
            data: Some(PrimaryData::One(Box::new(resource))),
            ..Self::default()
        }
    }

    /// A document whose primary data is a collection.
    #[must_use]
    pub fn collection(resources: Vec<Resource>) -> Self {
        Self {
            data: Some(PrimaryData::Many(resources)),
            ..Self::default()
        }
    }

    /// Returns the primary resource when the data is a single resource.
    #[must_use]
    pub fn resource(&self) -> Option<&Resource> {
        match &self.data {
            Some(PrimaryData::One(resource)) => Some(resource),
            _ => None,
        }
    }

    /// Consumes the document and returns the single primary resource.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        match self.data {
            Some(PrimaryData::One(resource)) => Some(*resource),
            _ => None,
        }
    }

    /// Returns the primary data as a slice.
    ///
    /// A single resource is returned as a one-element slice, absent data as
    /// an empty one.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        match &self.data {
            Some(PrimaryData::Many(resources)) => resources,
            Some(PrimaryData::One(resource)) => std::slice::from_ref(resource),
            None => &[],
        }
    }

    /// Consumes the document and returns the primary data as a vector.
    #[must_use]
    pub fn into_resources(self) -> Vec<Resource> {
        match self.data {
            Some(PrimaryData::Many(resources)) => resources,
            Some(PrimaryData::One(resource)) => vec![*resource],
            None => Vec::new(),
        }
    }

    /// Returns `true` if the document links to a next page.
    ///
    /// A `next` member set to `null` means there is no next page.
    #[must_use]
    pub fn has_next_link(&self) -> bool {
        self.links.get("next").is_some_and(|link| !link.is_null())
    }
}

fn present_linkage<'de, D>(deserializer: D) -> Result<Option<Linkage>, D::Error>
where
    D: Deserializer<'de>,
{
    Linkage::deserialize(deserializer).map(Some)
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_id(deserializer)?.ok_or_else(|| de::Error::custom("resource identifier has no id"))
}

// Some backends send numeric ids; they are kept as their decimal string.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "resource id must be a string, found {other}"
        ))),
    }
}
