//! # Descriptor Compiler (native core)
//!
//! Converts a declarative, framework-agnostic component descriptor module
//! into an equivalent class-based React component module. Parsing and
//! printing are delegated to the oxc round-trip oracle; markup desugaring
//! happens upstream, so inputs already contain `React.createElement`
//! calls.
//!
//! ## Output Invariants
//!
//! 1. **Anchors**: base import first, validator import (iff needed)
//!    second, helper functions immediately before the class, static
//!    assignments after it, synthesized default export last.
//! 2. **Constructor**: exactly one, `super(props)` first; injected
//!    fragments append in fixed pass order (willCreate, state,
//!    didCreate), each inside its own IIFE scope. Only the state
//!    fragment's result is assigned; create-hook results are discarded.
//! 3. **Rewrites**: slot resolution and attribute normalization are
//!    mutually exclusive per element-creation call site; calls without a
//!    props argument are untouched.
//! 4. **Conditional emission**: the slot resolver is emitted iff a slot
//!    rewrite occurred; the validator import iff a validator entry
//!    exists. Both are tracked per compile call, never process-wide.

#[cfg(feature = "napi")]
use napi_derive::napi;

use serde::{Deserialize, Serialize};

mod assemble;
mod class_builder;
mod error;
mod extract;
mod hooks;
mod naming;
mod props;
mod rewrite;
mod snippets;


pub use assemble::compile;
pub use error::{CompileDiagnostic, CompileError, Result};
pub use naming::to_camel_case;

/// Bridge-facing compile result. `errors` entries are JSON-serialized
/// [`CompileDiagnostic`] payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "napi", napi(object))]
pub struct CompileOutput {
    pub code: Option<String>,
    pub errors: Vec<String>,
}

#[cfg(feature = "napi")]
#[napi]
pub fn compile_component_native(source: String) -> CompileOutput {
    match compile(&source) {
        Ok(code) => CompileOutput {
            code: Some(code),
            errors: vec![],
        },
        Err(error) => {
            let diagnostic = CompileDiagnostic::from(&error);
            CompileOutput {
                code: None,
                errors: vec![serde_json::to_string(&diagnostic)
                    .unwrap_or_else(|_| error.to_string())],
            }
        }
    }
}
