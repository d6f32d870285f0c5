//! Collection filters.
//!
//! The backend reads its filter from a `query` header holding JSON: either
//! a single condition object or an array of them. [`Filter::from_value`]
//! accepts the three shapes callers tend to have at hand and detects which
//! one it was given:
//!
//! - an object with a `field` key: a single condition, sent as-is
//! - an array of objects with `field` keys: a list of conditions
//! - any other object: a map, expanded to one `{field, value}` condition per
//!   key in insertion order
//!
//! A map that holds a literal `field` key as data is read as a single
//! condition. Build such filters with [`Filter::conditions`] instead.
//!
//! A condition object is sent with every key it was given, an explicit
//! `"value": null` included. Its `field` must be a string, in a single
//! condition as well as in a list; anything else fails with
//! [`ResourceError::InvalidFilter`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::document::JsonMap;
use crate::resources::ResourceError;

/// One query constraint.
///
/// Keys other than `field` and `value` (an operator, for example) are kept
/// in `options` and sent along untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// The attribute the condition applies to.
    pub field: String,
    /// The value to compare against. `None` only when the key is absent;
    /// an explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    /// Any other keys of the condition object.
    #[serde(flatten)]
    pub options: JsonMap,
}

impl FilterCondition {
    /// A `{field, value}` condition.
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: Some(value.into()),
            options: JsonMap::new(),
        }
    }

    /// Adds an extra key, such as an operator.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// A collection filter, ready to be serialized into the `query` header.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    /// A single condition object.
    Condition(FilterCondition),
    /// A list of conditions; empty means no filter.
    Conditions(Vec<FilterCondition>),
}

impl Default for Filter {
    fn default() -> Self {
        Self::Conditions(Vec::new())
    }
}

impl Filter {
    /// A filter with a single `{field, value}` condition.
    #[must_use]
    pub fn condition(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Condition(FilterCondition::new(field, value))
    }

    /// A filter from a list of conditions.
    #[must_use]
    pub fn conditions(conditions: impl IntoIterator<Item = FilterCondition>) -> Self {
        Self::Conditions(conditions.into_iter().collect())
    }

    /// Expands a key/value map into one condition per key, in insertion order.
    #[must_use]
    pub fn from_map(map: JsonMap) -> Self {
        Self::Conditions(
            map.into_iter()
                .map(|(field, value)| FilterCondition::new(field, value))
                .collect(),
        )
    }

    /// Detects the shape of `value` and builds the matching filter.
    ///
    /// `null`, `{}` and `[]` produce an empty filter.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidFilter`] if an element of a list is
    /// not an object with a string `field`, and
    /// [`ResourceError::UnsupportedFilter`] for scalars.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hiweb_api::resources::{Filter, FilterCondition};
    /// use serde_json::json;
    ///
    /// let filter = Filter::from_value(json!({"status": "active", "vendor": "Acme"})).unwrap();
    /// assert_eq!(
    ///     filter,
    ///     Filter::conditions([
    ///         FilterCondition::new("status", "active"),
    ///         FilterCondition::new("vendor", "Acme"),
    ///     ])
    /// );
    /// ```
    pub fn from_value(value: Value) -> Result<Self, ResourceError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) if map.contains_key("field") => {
                parse_condition(0, Value::Object(map)).map(Self::Condition)
            }
            Value::Object(map) => Ok(Self::from_map(map)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| parse_condition(index, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Conditions),
            Value::Bool(_) => Err(ResourceError::UnsupportedFilter { found: "a boolean" }),
            Value::Number(_) => Err(ResourceError::UnsupportedFilter { found: "a number" }),
            Value::String(_) => Err(ResourceError::UnsupportedFilter { found: "a string" }),
        }
    }

    /// Returns `true` if the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Conditions(conditions) if conditions.is_empty())
    }

    /// Serializes the filter for the `query` header, `None` when empty.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_query(&self) -> Result<Option<String>, serde_json::Error> {
        if self.is_empty() {
            return Ok(None);
        }
        serde_json::to_string(self).map(Some)
    }
}

impl From<FilterCondition> for Filter {
    fn from(condition: FilterCondition) -> Self {
        Self::Condition(condition)
    }
}

impl From<Vec<FilterCondition>> for Filter {
    fn from(conditions: Vec<FilterCondition>) -> Self {
        Self::Conditions(conditions)
    }
}

impl From<JsonMap> for Filter {
    fn from(map: JsonMap) -> Self {
        Self::from_map(map)
    }
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn parse_condition(index: usize, value: Value) -> Result<FilterCondition, ResourceError> {
    let invalid = |reason: &str| ResourceError::InvalidFilter {
        index,
        reason: reason.to_string(),
    };

    let Value::Object(map) = value else {
        return Err(invalid("is not an object"));
    };
    match map.get("field") {
        None => return Err(invalid("is missing 'field'")),
        Some(Value::String(_)) => {}
        Some(_) => return Err(invalid("has a 'field' that is not a string")),
    }

    serde_json::from_value(Value::Object(map)).map_err(|e| invalid(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_expands_in_insertion_order() {
        let filter = Filter::from_value(json!({"z": 1, "a": "two", "m": [3]})).unwrap();
        let Filter::Conditions(conditions) = &filter else {
            panic!("expected a list of conditions");
        };

        let fields: Vec<&str> = conditions.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, ["z", "a", "m"]);
        assert_eq!(conditions[1].value, Some(json!("two")));
        assert_eq!(
            filter.to_query().unwrap().unwrap(),
            r#"[{"field":"z","value":1},{"field":"a","value":"two"},{"field":"m","value":[3]}]"#
        );
    }

    #[test]
    fn test_single_condition_is_sent_as_is() {
        let filter = Filter::from_value(json!({
            "field": "price",
            "operator": ">=",
            "value": 10
        }))
        .unwrap();

        assert!(matches!(filter, Filter::Condition(_)));
        let sent: Value = serde_json::from_str(&filter.to_query().unwrap().unwrap()).unwrap();
        assert_eq!(sent, json!({"field": "price", "operator": ">=", "value": 10}));
    }

    #[test]
    fn test_condition_without_value_keeps_value_absent() {
        let filter = Filter::from_value(json!({"field": "deleted_at", "operator": "null"})).unwrap();
        let sent: Value = serde_json::from_str(&filter.to_query().unwrap().unwrap()).unwrap();
        assert_eq!(sent, json!({"field": "deleted_at", "operator": "null"}));
    }

    #[test]
    fn test_explicit_null_value_is_kept() {
        let single = Filter::from_value(json!({"field": "deleted_at", "value": null})).unwrap();
        assert_eq!(
            single.to_query().unwrap().unwrap(),
            r#"{"field":"deleted_at","value":null}"#
        );

        let list = Filter::from_value(json!([{"field": "deleted_at", "value": null}])).unwrap();
        assert_eq!(
            list.to_query().unwrap().unwrap(),
            r#"[{"field":"deleted_at","value":null}]"#
        );

        let map = Filter::from_value(json!({"deleted_at": null})).unwrap();
        assert_eq!(map, list);
    }

    #[test]
    fn test_condition_list() {
        let filter = Filter::from_value(json!([
            {"field": "status", "value": "active"},
            {"field": "price", "operator": "<", "value": 5}
        ]))
        .unwrap();

        assert_eq!(
            filter,
            Filter::conditions([
                FilterCondition::new("status", "active"),
                FilterCondition::new("price", 5).with_option("operator", "<"),
            ])
        );
    }

    #[test]
    fn test_condition_list_element_without_field_fails() {
        let result = Filter::from_value(json!([
            {"field": "status", "value": "active"},
            {"value": 5}
        ]));

        assert!(matches!(
            result,
            Err(ResourceError::InvalidFilter { index: 1, .. })
        ));
    }

    #[test]
    fn test_condition_list_of_scalars_fails() {
        assert!(matches!(
            Filter::from_value(json!(["status", "active"])),
            Err(ResourceError::InvalidFilter { index: 0, .. })
        ));
    }

    #[test]
    fn test_non_string_field_fails() {
        assert!(matches!(
            Filter::from_value(json!({"field": 3, "value": 1})),
            Err(ResourceError::InvalidFilter { index: 0, .. })
        ));
    }

    #[test]
    fn test_scalar_filter_is_unsupported() {
        assert!(matches!(
            Filter::from_value(json!("status=active")),
            Err(ResourceError::UnsupportedFilter { found: "a string" })
        ));
    }

    #[test]
    fn test_empty_shapes_send_nothing() {
        for value in [Value::Null, json!({}), json!([])] {
            let filter = Filter::from_value(value).unwrap();
            assert!(filter.is_empty());
            assert_eq!(filter.to_query().unwrap(), None);
        }
    }

    #[test]
    fn test_map_with_literal_field_key_is_a_single_condition() {
        let filter = Filter::from_value(json!({"field": "title", "title": "Lamp"})).unwrap();
        assert!(matches!(filter, Filter::Condition(_)));
    }
}
