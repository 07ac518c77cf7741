//! Model emitters.
//!
//! Each emitter renders an [`OutputFile`](crate::ir::OutputFile). All
//! emitters implement the [`Emitter`](crate::traits::Emitter) trait and are
//! looked up by name through the registry below.

use crate::traits::Emitter;
use std::sync::{OnceLock, RwLock};

#[cfg(feature = "emit-json")]
pub mod json;

#[cfg(feature = "emit-json")]
pub use json::JsonEmitter;

#[cfg(feature = "emit-yaml")]
pub mod yaml;

#[cfg(feature = "emit-yaml")]
pub use yaml::YamlEmitter;

/// Global registry of emitters.
static EMITTERS: RwLock<Vec<&'static dyn Emitter>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom emitter.
///
/// Built-in emitters are registered automatically on first use.
pub fn register_emitter(emitter: &'static dyn Emitter) {
    init_builtin();
    EMITTERS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(emitter);
}

fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut emitters = EMITTERS
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        #[cfg(feature = "emit-json")]
        {
            emitters.push(&json::JSON_EMITTER);
        }

        #[cfg(feature = "emit-yaml")]
        {
            emitters.push(&yaml::YAML_EMITTER);
        }
    });
}

/// Get an emitter by name.
pub fn get_emitter(name: &str) -> Option<&'static dyn Emitter> {
    emitters().into_iter().find(|e| e.name() == name)
}

/// List all registered emitters.
pub fn emitters() -> Vec<&'static dyn Emitter> {
    init_builtin();
    EMITTERS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// List all registered emitter names.
pub fn emitter_names() -> Vec<&'static str> {
    emitters().iter().map(|e| e.name()).collect()
}
