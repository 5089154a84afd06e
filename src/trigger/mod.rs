//! Decoding of document-store change notifications into events.

mod payload;

pub use payload::{
    Document, DocumentEventPayload, EventFields, GeoPointValue, NumberValue, StringValue,
};
