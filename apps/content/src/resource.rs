use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Ordered list of documents, written as a JSON array.
    Collection,
    /// At most one document, written as a JSON object.
    Singleton,
}

/// A payload was rejected. The message is returned to clients verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// One named content resource exposed as a GET/PUT pair.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Store label and URL path segment, e.g. `skills` or `contact-info`.
    const NAME: &'static str;
    const KIND: ResourceKind;
    /// Returned when the body is not an array (collections) or object (singletons).
    const SHAPE_ERROR: &'static str;
    /// Returned when a document lacks one of its required fields.
    const REQUIRED_ERROR: &'static str;

    fn has_required_fields(&self) -> bool;
}

/// Validates a full replacement payload for a collection resource.
///
/// Fails on the first offending element, so a rejected payload is never
/// partially applied.
pub fn validate_collection<R: Resource>(body: Value) -> Result<Vec<R>, ValidationError> {
    let Value::Array(items) = body else {
        return Err(ValidationError(R::SHAPE_ERROR.to_string()));
    };

    items
        .into_iter()
        .map(|item| {
            let doc: R = parse_document(item)?;
            if !doc.has_required_fields() {
                return Err(ValidationError(R::REQUIRED_ERROR.to_string()));
            }
            Ok(doc)
        })
        .collect()
}

/// Validates a replacement payload for a singleton resource.
pub fn validate_singleton<R: Resource>(body: Value) -> Result<R, ValidationError> {
    if !body.is_object() {
        return Err(ValidationError(R::SHAPE_ERROR.to_string()));
    }

    let doc: R = parse_document(body)?;
    if !doc.has_required_fields() {
        return Err(ValidationError(R::REQUIRED_ERROR.to_string()));
    }
    Ok(doc)
}

fn parse_document<R: Resource>(value: Value) -> Result<R, ValidationError> {
    if !value.is_object() {
        return Err(ValidationError(R::REQUIRED_ERROR.to_string()));
    }
    serde_json::from_value(value)
        .map_err(|e| ValidationError(format!("Invalid {} payload: {e}", R::NAME)))
}

/// Present and non-empty.
pub(crate) fn filled(field: &Option<String>) -> bool {
    matches!(field, Some(value) if !value.is_empty())
}
