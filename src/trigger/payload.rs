//! Document change notification payload.

use serde::Deserialize;

use crate::error::TriggerError;
use crate::models::{Coordinate, Event};

/// Change notification sent by the document store when an event document is
/// written. Only the new document value is used.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentEventPayload {
    #[serde(default)]
    pub value: Option<Document>,
}

/// Document snapshot: full resource path plus typed field values
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// e.g. "projects/p/databases/(default)/documents/event/abc123"
    pub name: String,
    #[serde(default)]
    pub fields: EventFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFields {
    pub name: Option<StringValue>,
    pub nw_boundary: Option<GeoPointValue>,
    pub se_boundary: Option<GeoPointValue>,
    pub spacing_meters: Option<NumberValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StringValue {
    #[serde(rename = "stringValue")]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoPointValue {
    #[serde(rename = "geoPointValue")]
    pub value: Coordinate,
}

/// Numbers arrive either as doubles or as integers encoded in strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Double {
        #[serde(rename = "doubleValue")]
        value: f64,
    },
    Integer {
        #[serde(rename = "integerValue")]
        value: String,
    },
}

impl NumberValue {
    fn to_f64(&self, field: &'static str) -> Result<f64, TriggerError> {
        match self {
            NumberValue::Double { value } => Ok(*value),
            NumberValue::Integer { value } => value
                .parse::<i64>()
                .map(|v| v as f64)
                .map_err(|_| TriggerError::InvalidInteger {
                    field,
                    value: value.clone(),
                }),
        }
    }
}

impl DocumentEventPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TriggerError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Document ID: the last segment of the document path
    pub fn document_id(&self) -> Option<&str> {
        self.value
            .as_ref()
            .and_then(|doc| doc.name.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    /// Build a fresh event (no points, claims or expiration) from the payload
    pub fn into_event(self) -> Result<Event, TriggerError> {
        let id = self
            .document_id()
            .ok_or(TriggerError::MissingDocument)?
            .to_string();
        let fields = self.value.ok_or(TriggerError::MissingDocument)?.fields;

        let name = fields.name.map(|n| n.value).unwrap_or_default();
        let nw = fields
            .nw_boundary
            .ok_or(TriggerError::MissingField("nw_boundary"))?
            .value;
        let se = fields
            .se_boundary
            .ok_or(TriggerError::MissingField("se_boundary"))?
            .value;
        let spacing = fields
            .spacing_meters
            .ok_or(TriggerError::MissingField("spacing_meters"))?
            .to_f64("spacing_meters")?;

        Ok(Event::new(&id, &name, nw, se, spacing))
    }
}

impl std::str::FromStr for DocumentEventPayload {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
