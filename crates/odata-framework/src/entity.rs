//! # ODataEntity Trait
//!
//! The `ODataEntity` trait is the contract every result shape (header, item, …)
//! implements so the generic [`fetch`](crate::Fetcher::fetch) step can decode it.
//! It names the entity set the shape is read from and relies on `serde` for the
//! record layout.
//!
//! # Response Envelope
//!
//! OData v2 services wrap every JSON payload in a `d` object:
//!
//! ```text
//! {"d": {"results": [ {...}, {...} ]}}   // collection
//! {"d": {...}}                           // single entity (1:1 navigation)
//! ```
//!
//! [`decode_collection`] accepts both and always yields a sequence, so callers
//! never have to care which form the server picked.

use crate::error::FetchError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;

/// Trait that any record shape must implement to be read by a fetch step.
///
/// # Example
///
/// ```rust
/// use odata_framework::ODataEntity;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Supplier {
///     supplier: String,
/// }
///
/// impl ODataEntity for Supplier {
///     const ENTITY_SET: &'static str = "A_Supplier";
/// }
///
/// let body = br#"{"d":{"results":[{"Supplier":"17300001"}]}}"#;
/// let records: Vec<Supplier> = odata_framework::decode_collection(body).unwrap();
/// assert_eq!(records[0].supplier, "17300001");
/// ```
pub trait ODataEntity: DeserializeOwned + Debug + Send + Sync + 'static {
    /// Name of the entity set this shape is read from (e.g. `A_PurchaseRequisitionItem`).
    const ENTITY_SET: &'static str;
}

/// Decodes an OData v2 JSON body into a sequence of records.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] when the body is not JSON, has no `d`
/// envelope, or a record does not match `T`.
pub fn decode_collection<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, FetchError> {
    let mut root: Value = serde_json::from_slice(body)?;
    let payload = match root.get_mut("d") {
        Some(payload) => payload.take(),
        None => return Err(FetchError::Decode("missing 'd' envelope".to_string())),
    };

    match payload {
        Value::Object(mut object) => match object.remove("results") {
            Some(results @ Value::Array(_)) => Ok(serde_json::from_value(results)?),
            Some(other) => Err(FetchError::Decode(format!(
                "'results' is not an array: {}",
                kind(&other)
            ))),
            None => Ok(vec![serde_json::from_value(Value::Object(object))?]),
        },
        other => Err(FetchError::Decode(format!(
            "'d' is not an object: {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
