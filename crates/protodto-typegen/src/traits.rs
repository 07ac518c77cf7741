//! Traits for model emitters.

use crate::error::Result;
use crate::ir::OutputFile;

/// Renders one flattened [`OutputFile`] for downstream tooling.
///
/// # Implementing Custom Emitters
///
/// ```ignore
/// use protodto_typegen::{Emitter, ir::OutputFile, register_emitter};
///
/// struct NamesOnly;
///
/// impl Emitter for NamesOnly {
///     fn name(&self) -> &'static str { "names" }
///     fn extension(&self) -> &'static str { "txt" }
///     fn emit(&self, file: &OutputFile) -> Result<String> { /* ... */ }
/// }
///
/// // Register before first use
/// register_emitter(&NamesOnly);
/// ```
pub trait Emitter: Send + Sync {
    /// Unique emitter identifier (e.g., "json", "yaml").
    fn name(&self) -> &'static str;

    /// File extension appended to the output identifier.
    fn extension(&self) -> &'static str;

    /// Render the model of one output unit.
    fn emit(&self, file: &OutputFile) -> Result<String>;

    /// Written between documents when several units share one stream.
    fn stream_separator(&self) -> &'static str {
        ""
    }
}
