//! Flattening of compiled protobuf schemas into DTO models.
//!
//! `protodto-typegen` takes the full set of compiled schema units of one run
//! (the requested files plus their dependencies), resolves every type
//! reference across them and produces one flattened, emitter-ready model per
//! requested unit: nested types lifted to the top level, public fields only,
//! target type expressions, comments and normalised validation rules.
//!
//! # Architecture
//!
//! ```text
//! Request              Registry             Per unit                Emitters
//! ───────────     ──────────────────     ─────────────────     ───────────────
//! protoFile[] ──> TypeRegistry::build ─┬─> flatten_unit ──────┬─> json
//!                 (every unit, enums   │   (walk, TypeMapper, └─> yaml
//!                  built eagerly)      │    normalize)
//!                                      └─> one OutputFile per requested unit
//! ```
//!
//! Registration of every unit finishes before any unit is flattened, so a
//! reference can point anywhere in the run.
//!
//! # Example
//!
//! ```
//! use protodto_typegen::{GeneratorConfig, generate, input::parse_request};
//!
//! let request = parse_request(r#"{
//!     "fileToGenerate": ["pet.proto"],
//!     "protoFile": [{
//!         "name": "pet.proto",
//!         "package": "pet",
//!         "messageType": [{
//!             "name": "Pet",
//!             "field": [{ "name": "name", "type": "TYPE_STRING", "options": { "public": true } }]
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let generation = generate(&request, &GeneratorConfig::default()).unwrap();
//! let file = &generation.files[0];
//! assert_eq!(file.name, "pet.huma.go");
//! assert_eq!(file.messages[0].fields[0].ty, "string");
//! ```
//!
//! # Feature Flags
//!
//! - `emit-json` - JSON model emitter
//! - `emit-yaml` - YAML model emitter

pub mod casing;
pub mod comments;
pub mod config;
pub mod enums;
pub mod error;
pub mod flatten;
pub mod input;
pub mod ir;
pub mod output;
pub mod registry;
pub mod traits;
pub mod types;
pub mod unit;
pub mod validation;
pub mod walk;

pub use config::GeneratorConfig;
pub use error::{Result, TypegenError};
pub use input::{ParseError, SchemaRequest, parse_request};
pub use ir::{Diagnostic, Generation, OutputFile};
pub use output::{emitter_names, emitters, get_emitter, register_emitter};
pub use registry::TypeRegistry;
pub use traits::Emitter;

use flatten::flatten_unit;
use tracing::info;
use unit::SchemaUnit;

/// Run one generation over a fully loaded request.
///
/// Output order follows the request's generation list. Units without any
/// message or enum produce no output.
pub fn generate(request: &SchemaRequest, config: &GeneratorConfig) -> Result<Generation> {
    let units = request.proto_file.iter().map(SchemaUnit::new).collect();
    let registry = TypeRegistry::build(units)?;

    let mut generation = Generation::default();
    for wanted in &request.file_to_generate {
        let index = registry
            .units()
            .iter()
            .position(|u| u.name() == wanted)
            .ok_or_else(|| TypegenError::UnknownUnit(wanted.clone()))?;

        let flattened = flatten_unit(&registry, index, config)?;
        let empty = flattened.is_empty();
        generation.diagnostics.extend(flattened.diagnostics);
        if !empty {
            generation.files.push(flattened.file);
        }
    }

    info!(
        units = registry.units().len(),
        types = registry.len(),
        outputs = generation.files.len(),
        diagnostics = generation.diagnostics.len(),
        "generation finished"
    );
    Ok(generation)
}
