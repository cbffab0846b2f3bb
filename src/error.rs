//! Compiler error surface.
//!
//! A compile either yields the complete output text or fails as a whole;
//! there is no partial-success result. Unknown prop types are not errors:
//! they degrade to the `any` validator inside the props synthesizer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    /// No default-exported object literal descriptor was found, or the
    /// default export is not an object literal.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// The source text is not parseable. Propagated from the parser
    /// unchanged, carrying its first diagnostic.
    #[error("parse failure: {message}")]
    UnderlyingParseFailure { message: String },
}

impl CompileError {
    pub fn malformed(message: impl Into<String>) -> Self {
        CompileError::MalformedInput {
            message: message.into(),
        }
    }
}

/// Bridge-facing error payload, JSON-serialized across the native
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileDiagnostic {
    pub error_type: String,
    pub message: String,
}

impl From<&CompileError> for CompileDiagnostic {
    fn from(error: &CompileError) -> Self {
        let error_type = match error {
            CompileError::MalformedInput { .. } => "MalformedInput",
            CompileError::UnderlyingParseFailure { .. } => "UnderlyingParseFailure",
        };
        CompileDiagnostic {
            error_type: error_type.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_carries_error_type() {
        let err = CompileError::malformed("no default export");
        let diag = CompileDiagnostic::from(&err);
        assert_eq!(diag.error_type, "MalformedInput");
        assert!(diag.message.contains("no default export"));
    }

    #[test]
    fn diagnostic_round_trips_through_json() {
        let err = CompileError::UnderlyingParseFailure {
            message: "unexpected token".to_string(),
        };
        let json = serde_json::to_string(&CompileDiagnostic::from(&err)).unwrap();
        let parsed: CompileDiagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error_type, "UnderlyingParseFailure");
    }
}
