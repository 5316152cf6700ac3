//! Value-semantic call key.

use mnemo_error::{KeyError, KeyErrorKind};
use serde_json::Value as JsonValue;
use std::hash::{Hash, Hasher};

/// Cache key derived from one call's ordered argument list.
///
/// Reference identity is useless for memoization: two calls carrying
/// value-identical arguments normally arrive as distinct allocations. A
/// `CallKey` therefore compares by structure, recursing through nested
/// sequences, so `["First", "Second"]` built twice is one key, not two.
///
/// Hashing follows the same contract: deep-equal keys always hash
/// identically. Each element is hashed through its canonical JSON
/// serialization, which is stable because object keys serialize in sorted
/// order. Colliding hashes for unequal keys are harmless; the map re-checks
/// equality on every hash match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallKey {
    args: Vec<JsonValue>,
}

impl CallKey {
    /// Create a key from an owned argument list.
    pub fn new(args: Vec<JsonValue>) -> Self {
        Self { args }
    }

    /// Normalize a raw argument payload into a key.
    ///
    /// The payload must be a sequence: an empty array is a valid zero-argument
    /// key, but `null` signals a collaborator that failed to supply the
    /// argument list at all and fails fast.
    pub fn from_value(payload: JsonValue) -> Result<Self, KeyError> {
        match payload {
            JsonValue::Array(args) => Ok(Self { args }),
            JsonValue::Null => Err(KeyError::new(KeyErrorKind::MissingArguments)),
            other => Err(KeyError::new(KeyErrorKind::NotASequence(
                variant_name(&other).to_string(),
            ))),
        }
    }

    /// Number of arguments in the key.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// The normalized argument list.
    pub fn args(&self) -> &[JsonValue] {
        &self.args
    }
}

impl Hash for CallKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.args.len().hash(state);
        for arg in &self.args {
            // Hash the canonical JSON form for stability
            if let Ok(s) = serde_json::to_string(arg) {
                s.hash(state);
            }
        }
    }
}

fn variant_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
