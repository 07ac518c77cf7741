//! YAML model emitter.

use crate::error::{Result, TypegenError};
use crate::ir::OutputFile;
use crate::traits::Emitter;

/// YAML rendering of the output model.
pub struct YamlEmitter;

/// Static instance for registry.
pub static YAML_EMITTER: YamlEmitter = YamlEmitter;

impl Emitter for YamlEmitter {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn emit(&self, file: &OutputFile) -> Result<String> {
        serde_yaml::to_string(file).map_err(|e| TypegenError::Emit {
            emitter: self.name().to_string(),
            message: e.to_string(),
        })
    }

    fn stream_separator(&self) -> &'static str {
        "---\n"
    }
}
