#![allow(dead_code)]

use jsondrift::{apply_op, IgnorePattern, PatchFormat, PatchOp, PatchTransport, TransportError};
use serde_json::{Map, Value};

pub fn obj(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        other => panic!("expected object, got {other}"),
    }
}

pub fn pats(patterns: &[&str]) -> Vec<IgnorePattern> {
    patterns.iter().map(|p| IgnorePattern::parse(p)).collect()
}

/// An in-memory server for an incremental write protocol. Each request body
/// is decoded and applied to the stored object.
pub struct MemoryServer {
    pub object: Map<String, Value>,
    pub format: PatchFormat,
    pub requests: Vec<String>,
    /// Reject the request with this index.
    pub fail_at: Option<usize>,
    /// Return the updated object with every response.
    pub returns_object: bool,
}

impl MemoryServer {
    pub fn new(object: Value, format: PatchFormat) -> Self {
        Self {
            object: obj(object),
            format,
            requests: Vec::new(),
            fail_at: None,
            returns_object: false,
        }
    }
}

impl PatchTransport for MemoryServer {
    fn send(&mut self, op: &PatchOp, body: &str) -> Result<Option<String>, TransportError> {
        if self.fail_at == Some(self.requests.len()) {
            return Err(format!("503 while sending {op}").into());
        }
        self.requests.push(body.to_string());
        let decoded = self.format.decode(&serde_json::from_str(body)?)?;
        assert_eq!(&decoded, op);
        apply_op(&mut self.object, &decoded)?;
        if self.returns_object {
            Ok(Some(serde_json::to_string(&self.object)?))
        } else {
            Ok(None)
        }
    }
}
