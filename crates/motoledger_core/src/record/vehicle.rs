//! The vehicle record.

use crate::error::CoreResult;
use crate::record::codec::{DecodeError, RecordCodec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record-type tag written on every vehicle record.
pub const RECORD_DOC_TYPE: &str = "Record";

const DOC_TYPE_FIELD: &str = "docType";
const OWNER_FIELD: &str = "owner";

/// A tracked vehicle.
///
/// The record key is the ledger key and is not part of the body. The
/// persisted form is a JSON object with the fields
/// `docType, make, model, color, vin, EngineCC, owner`, in that order.
///
/// Decoding requires `docType`. A known field that is absent stays absent
/// when the record is encoded again, and fields this type does not know are
/// carried in [`VehicleRecord::extra`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Record-type tag.
    #[serde(rename = "docType")]
    pub doc_type: String,
    /// Manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    /// Model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Paint color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Vehicle identification number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    /// Engine displacement, e.g. `"150CC"`.
    #[serde(rename = "EngineCC", default, skip_serializing_if = "Option::is_none")]
    pub engine_cc: Option<String>,
    /// Current owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Fields outside the vehicle schema, kept in stored order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VehicleRecord {
    /// Creates a record tagged with [`RECORD_DOC_TYPE`].
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
        vin: impl Into<String>,
        engine_cc: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            doc_type: RECORD_DOC_TYPE.to_string(),
            make: Some(make.into()),
            model: Some(model.into()),
            color: Some(color.into()),
            vin: Some(vin.into()),
            engine_cc: Some(engine_cc.into()),
            owner: Some(owner.into()),
            extra: Map::new(),
        }
    }

    /// Returns a copy with a different owner and every other field unchanged.
    #[must_use]
    pub fn with_owner(&self, owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            ..self.clone()
        }
    }

    /// Manufacturer, or `""` when absent.
    pub fn make(&self) -> &str {
        self.make.as_deref().unwrap_or_default()
    }

    /// Model name, or `""` when absent.
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_default()
    }

    /// Paint color, or `""` when absent.
    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or_default()
    }

    /// VIN, or `""` when absent.
    pub fn vin(&self) -> &str {
        self.vin.as_deref().unwrap_or_default()
    }

    /// Engine displacement, or `""` when absent.
    pub fn engine_cc(&self) -> &str {
        self.engine_cc.as_deref().unwrap_or_default()
    }

    /// Current owner, or `""` when absent.
    pub fn owner(&self) -> &str {
        self.owner.as_deref().unwrap_or_default()
    }
}

/// Parses a stored value as a JSON object carrying a string `docType`.
fn decode_object(bytes: &[u8]) -> Result<Map<String, Value>, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Object(object) = value else {
        return Err(DecodeError::Invalid("record is not a JSON object".into()));
    };
    if !matches!(object.get(DOC_TYPE_FIELD), Some(Value::String(_))) {
        return Err(DecodeError::Invalid(format!(
            "record has no string {DOC_TYPE_FIELD}"
        )));
    }
    Ok(object)
}

/// Rewrites the `owner` field of a stored record.
///
/// Every other field keeps its value and position. An absent `owner` is
/// appended.
///
/// # Errors
///
/// Returns a [`DecodeError`] if `bytes` is not a vehicle record.
pub fn replace_owner(bytes: &[u8], owner: &str) -> Result<Vec<u8>, DecodeError> {
    let mut object = decode_object(bytes)?;
    object.insert(OWNER_FIELD.to_string(), Value::String(owner.to_string()));
    Ok(serde_json::to_vec(&object)?)
}

impl RecordCodec for VehicleRecord {
    fn encode(&self) -> CoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let object = decode_object(bytes)?;
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}
