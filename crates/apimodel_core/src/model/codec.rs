//! Flat record codec shared by every kind and capability.
//!
//! # Responsibility
//! - Define the persisted record shape (`JsonObject`) and its field names.
//! - Provide the serialize entry point and typed field readers used by
//!   `on_deserialize_into` implementations.
//!
//! # Invariants
//! - A record always carries `kind`, `name` and `canonicalReference`.
//! - Readers never mutate the record; they only copy values into options.

use super::error::{ApiModelError, ApiModelResult};
use super::item::ApiItem;
use serde_json::{Map, Value};

/// One persisted node: a flat key-value map plus optional nested `members`.
pub type JsonObject = Map<String, Value>;

pub const KIND_FIELD: &str = "kind";
pub const NAME_FIELD: &str = "name";
pub const CANONICAL_REFERENCE_FIELD: &str = "canonicalReference";
pub const MEMBERS_FIELD: &str = "members";
pub const DOC_COMMENT_FIELD: &str = "docComment";
pub const RELEASE_TAG_FIELD: &str = "releaseTag";
pub const IS_STATIC_FIELD: &str = "isStatic";
pub const IS_OPTIONAL_FIELD: &str = "isOptional";
pub const OVERLOAD_INDEX_FIELD: &str = "overloadIndex";

/// Construction options contributed by one kind or capability.
///
/// `on_deserialize_into` is the inverse of that contributor's
/// `serialize_into`: it copies only its own fields from the record.
pub trait RecordOptions: Default {
    fn on_deserialize_into(&mut self, record: &JsonObject) -> ApiModelResult<()>;
}

/// Flattens one item, and recursively its members, into a fresh record.
pub fn serialize_item(item: &dyn ApiItem) -> JsonObject {
    let mut record = JsonObject::new();
    item.serialize_into(&mut record);
    record
}

/// Returns the `kind` tag of a record, if present and a string.
pub fn record_kind(record: &JsonObject) -> Option<&str> {
    record.get(KIND_FIELD).and_then(Value::as_str)
}

pub(crate) fn read_required_str<'a>(
    record: &'a JsonObject,
    field: &'static str,
) -> ApiModelResult<&'a str> {
    match record.get(field) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(ApiModelError::invalid_record(
            field,
            format!("expected string, found {}", value_type(other)),
        )),
        None => Err(ApiModelError::invalid_record(field, "field is missing")),
    }
}

pub(crate) fn read_optional_str<'a>(
    record: &'a JsonObject,
    field: &'static str,
) -> ApiModelResult<Option<&'a str>> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => read_required_str(record, field).map(Some),
    }
}

pub(crate) fn read_bool_or_default(
    record: &JsonObject,
    field: &'static str,
) -> ApiModelResult<bool> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(value)) => Ok(*value),
        Some(other) => Err(ApiModelError::invalid_record(
            field,
            format!("expected boolean, found {}", value_type(other)),
        )),
    }
}

pub(crate) fn read_u32_or_default(
    record: &JsonObject,
    field: &'static str,
) -> ApiModelResult<u32> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| {
                ApiModelError::invalid_record(field, format!("expected u32, found {number}"))
            }),
        Some(other) => Err(ApiModelError::invalid_record(
            field,
            format!("expected number, found {}", value_type(other)),
        )),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
