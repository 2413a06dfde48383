//! Free-form UDMF custom properties.
//!
//! UDMF entities carry open-ended key/value fields beyond the well-known
//! ones. Only a handful are interpreted by the specials processor (vertex
//! `zfloor`/`zceiling`, thing `height`); everything else is stored verbatim.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single UDMF property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UdmfValue {
    /// Boolean value (`true`/`false`)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl UdmfValue {
    /// Numeric view of the value. Integers coerce to float; booleans and
    /// strings do not.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            UdmfValue::Int(i) => Some(*i as f64),
            UdmfValue::Float(f) => Some(*f),
            _ => None,
        }
    }

}

/// Property map attached to a map entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Properties(HashMap<String, UdmfValue>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: UdmfValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&UdmfValue> {
        self.0.get(name)
    }

    /// Numeric property lookup with integer coercion.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(UdmfValue::as_float)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
