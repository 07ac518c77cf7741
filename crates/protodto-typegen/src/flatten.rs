//! Traversal and flattening.
//!
//! Walks one requested unit children-first and produces one flattened
//! [`Message`] or [`Enum`] per declaration. Map entry types are skipped; the
//! type mapper unwraps them where they are used.

use crate::casing;
use crate::config::GeneratorConfig;
use crate::error::{Result, TypegenError};
use crate::input::{FieldDescriptor, MessageDescriptor};
use crate::ir::{Diagnostic, Enum, Field, Message, OutputFile};
use crate::registry::{TypeRef, TypeRegistry};
use crate::types::{MapState, TypeMapper};
use crate::unit::{SchemaUnit, output_name};
use crate::validation::normalize;
use crate::walk::{Decl, WorkItem, path, walk};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Output of flattening one unit.
#[derive(Debug)]
pub struct Flattened {
    pub file: OutputFile,
    pub diagnostics: Vec<Diagnostic>,
}

impl Flattened {
    /// Whether the unit produced any type worth emitting.
    pub fn is_empty(&self) -> bool {
        self.file.messages.is_empty() && self.file.enums.is_empty()
    }
}

/// Per-unit output state, threaded explicitly through the walk.
#[derive(Debug, Default)]
struct UnitState {
    /// Target names already emitted in this unit.
    emitted: HashSet<String>,
    messages: Vec<Message>,
    enums: Vec<Enum>,
    map: MapState,
}

impl UnitState {
    /// Record `name`; false if it was already emitted.
    fn claim(&mut self, name: &str) -> bool {
        self.emitted.insert(name.to_string())
    }
}

/// Flatten the unit at `unit_index` of the registry.
pub fn flatten_unit(
    registry: &TypeRegistry<'_>,
    unit_index: usize,
    config: &GeneratorConfig,
) -> Result<Flattened> {
    let unit = registry.unit(unit_index);
    let mapper = TypeMapper::new(registry, unit, config);
    let mut state = UnitState::default();

    for item in walk(unit.descriptor) {
        match item.decl {
            Decl::Enum(_) => {
                let type_ref = TypeRef::new(unit.namespace(), &item.qualified_parts());
                let model = registry
                    .resolve(type_ref.as_str())
                    .and_then(|entry| entry.as_enum())
                    .ok_or_else(|| TypegenError::UnresolvedType {
                        field: item.name().to_string(),
                        type_ref: type_ref.to_string(),
                    })?;
                if state.claim(&model.name) {
                    state.enums.push(model.as_ref().clone());
                }
            }
            Decl::Message(decl) if decl.is_map_entry() => {}
            Decl::Message(decl) => {
                // A duplicate contributes nothing, imports and diagnostics included.
                let name = casing::target_case(&item.qualified_parts());
                if !state.claim(&name) {
                    debug!(unit = unit.name(), message = %name, "skipped duplicate message");
                    continue;
                }
                let message = build_message(&mapper, unit, &item, decl, config, &mut state)?;
                debug!(
                    unit = unit.name(),
                    message = %message.name,
                    fields = message.fields.len(),
                    "flattened message"
                );
                state.messages.push(message);
            }
        }
    }

    let mut imports = state.map.imports;
    imports.insert(unit.import_path.clone());

    let file = OutputFile {
        name: output_name(unit.name(), &config.output_suffix),
        source: unit.name().to_string(),
        package_name: unit.package_name.clone(),
        proto_import: unit.import_path.clone(),
        imports,
        messages: state.messages,
        enums: state.enums,
    };
    info!(
        unit = unit.name(),
        messages = file.messages.len(),
        enums = file.enums.len(),
        "flattened unit"
    );

    Ok(Flattened {
        file,
        diagnostics: state.map.diagnostics,
    })
}

fn build_message(
    mapper: &TypeMapper<'_, '_>,
    unit: &SchemaUnit<'_>,
    item: &WorkItem<'_>,
    decl: &MessageDescriptor,
    config: &GeneratorConfig,
    state: &mut UnitState,
) -> Result<Message> {
    let parts = item.qualified_parts();
    let mut message = Message {
        name: casing::target_case(&parts),
        proto_name: casing::wrapped_case(&parts),
        fields: Vec::new(),
        one_ofs: BTreeMap::new(),
        comment: unit.comments.leading(&item.path),
    };

    for (index, field) in decl.field.iter().enumerate() {
        if !(field.options.public || config.all_public) {
            continue;
        }

        let field_path = path::child(&item.path, path::MESSAGE_FIELD, index);
        let built = build_field(mapper, unit, decl, &field_path, field, state)?;

        if !built.one_of.is_empty() {
            state
                .map
                .imports
                .extend(config.one_of_imports.iter().cloned());
            message
                .one_ofs
                .entry(built.one_of.clone())
                .or_default()
                .push(built.name.clone());
        }
        message.fields.push(built);
    }

    annotate_one_ofs(&mut message);
    Ok(message)
}

fn build_field(
    mapper: &TypeMapper<'_, '_>,
    unit: &SchemaUnit<'_>,
    decl: &MessageDescriptor,
    field_path: &[i32],
    field: &FieldDescriptor,
    state: &mut UnitState,
) -> Result<Field> {
    let options = &field.options;

    let mut name = casing::target_case(&[&field.name]);
    let mut json_name = casing::snake(field.json_name.as_deref().unwrap_or(&field.name));
    if let Some(rename) = options.name.as_deref().filter(|s| !s.is_empty()) {
        name = rename.to_string();
        json_name = casing::snake(rename);
    }
    if let Some(json) = options.json.as_deref().filter(|s| !s.is_empty()) {
        json_name = json.to_string();
    }

    let mapping = mapper.map_field(field, &mut state.map)?;

    // proto3 `optional` fields sit in a synthetic group of their own.
    let one_of = match field.oneof_index {
        Some(index) if !field.proto3_optional => decl
            .oneof_decl
            .get(index as usize)
            .map(|group| casing::camel(&group.name))
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut comment = unit.comments.leading(field_path);
    let validation = normalize(field, mapping.enumeration.as_deref(), &mut comment);

    Ok(Field {
        name,
        proto_name: casing::camel(&field.name),
        json_name,
        ty: mapping.target,
        proto_type: mapping.wrapped,
        is_map: mapping.is_map,
        is_primitive: mapping.primitive,
        is_repeated: mapping.is_repeated,
        one_of,
        comment,
        example: options.example.clone(),
        enumeration: mapping.enumeration,
        validation,
    })
}

/// Document one-of groups on every member, once all members are known.
fn annotate_one_ofs(message: &mut Message) {
    let notes: BTreeMap<String, String> = message
        .one_ofs
        .keys()
        .map(|group| {
            let names: Vec<&str> = message
                .one_of_fields(group)
                .map(|f| f.json_name.as_str())
                .collect();
            let note = format!("Only one of ['{}'] may be set.", names.join("', '"));
            (group.clone(), note)
        })
        .collect();

    for field in &mut message.fields {
        if let Some(note) = notes.get(&field.one_of) {
            if !field.comment.is_empty() {
                field.comment.push(' ');
            }
            field.comment.push_str(note);
        }
    }
}
