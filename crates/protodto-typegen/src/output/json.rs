//! JSON model emitter.

use crate::error::{Result, TypegenError};
use crate::ir::OutputFile;
use crate::traits::Emitter;

/// Pretty-printed JSON rendering of the output model.
pub struct JsonEmitter;

/// Static instance for registry.
pub static JSON_EMITTER: JsonEmitter = JsonEmitter;

impl Emitter for JsonEmitter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn emit(&self, file: &OutputFile) -> Result<String> {
        serde_json::to_string_pretty(file).map_err(|e| TypegenError::Emit {
            emitter: self.name().to_string(),
            message: e.to_string(),
        })
    }
}
