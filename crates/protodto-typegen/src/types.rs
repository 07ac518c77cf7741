//! Type mapper.
//!
//! Resolves a field's declared type into target and wrapped type
//! expressions. Scalars map directly; enums and messages go through the
//! registry; map entries are unwrapped into `map[string]V`.

use crate::config::GeneratorConfig;
use crate::error::{Result, TypegenError};
use crate::input::{FieldDescriptor, FieldType};
use crate::ir::{Diagnostic, Enum};
use crate::registry::{RegistryEntry, TypeRegistry};
use crate::unit::SchemaUnit;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

/// Well-known timestamp type, mapped to a point in time.
pub const TIMESTAMP: &str = ".google.protobuf.Timestamp";

/// Resolved type of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMapping {
    /// Target type expression.
    pub target: String,
    /// Type expression of the compiler-generated representation.
    pub wrapped: String,
    pub primitive: bool,
    pub is_map: bool,
    pub is_repeated: bool,
    pub enumeration: Option<Arc<Enum>>,
}

impl TypeMapping {
    fn scalar(name: &str) -> Self {
        Self {
            target: name.to_string(),
            wrapped: name.to_string(),
            primitive: true,
            is_map: false,
            is_repeated: false,
            enumeration: None,
        }
    }
}

/// Side effects of mapping: imports the unit now needs and diagnostics.
#[derive(Debug, Default)]
pub struct MapState {
    pub imports: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Maps fields declared in one unit.
pub struct TypeMapper<'r, 'a> {
    registry: &'r TypeRegistry<'a>,
    unit: &'r SchemaUnit<'a>,
    config: &'r GeneratorConfig,
}

impl<'r, 'a> TypeMapper<'r, 'a> {
    pub fn new(
        registry: &'r TypeRegistry<'a>,
        unit: &'r SchemaUnit<'a>,
        config: &'r GeneratorConfig,
    ) -> Self {
        Self {
            registry,
            unit,
            config,
        }
    }

    /// Map a field, repeated wrapping included.
    pub fn map_field(&self, field: &FieldDescriptor, state: &mut MapState) -> Result<TypeMapping> {
        let mut mapping = self.map_kind(field, state)?;

        // Map entries are repeated on the wire; the map type already covers that.
        if field.is_repeated() && !mapping.is_map {
            mapping.is_repeated = true;
            mapping.target = format!("[]{}", mapping.target);
            mapping.wrapped = format!("[]{}", mapping.wrapped);
        }
        Ok(mapping)
    }

    fn map_kind(&self, field: &FieldDescriptor, state: &mut MapState) -> Result<TypeMapping> {
        let scalar = match field.kind {
            FieldType::Bool => "bool",
            FieldType::Int32 | FieldType::Sint32 | FieldType::Sfixed32 => "int32",
            FieldType::Int64 | FieldType::Sint64 | FieldType::Sfixed64 => "int64",
            FieldType::Uint32 | FieldType::Fixed32 => "uint32",
            FieldType::Uint64 | FieldType::Fixed64 => "uint64",
            FieldType::Float => "float32",
            FieldType::Double => "float64",
            FieldType::String => "string",
            FieldType::Bytes => "[]byte",
            FieldType::Enum => return self.map_enum(field, state),
            FieldType::Message => return self.map_message(field, state),
            FieldType::Group | FieldType::Unknown => {
                return Err(TypegenError::UnsupportedType {
                    field: field.name.clone(),
                    kind: field.kind,
                });
            }
        };
        Ok(TypeMapping::scalar(scalar))
    }

    fn type_name<'f>(&self, field: &'f FieldDescriptor) -> Result<&'f str> {
        field
            .type_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| TypegenError::MissingTypeName {
                field: field.name.clone(),
                kind: field.kind,
            })
    }

    fn map_message(&self, field: &FieldDescriptor, state: &mut MapState) -> Result<TypeMapping> {
        let type_name = self.type_name(field)?;

        if type_name == TIMESTAMP {
            state
                .imports
                .extend(self.config.timestamp_imports.iter().cloned());
            return Ok(TypeMapping {
                target: "*time.Time".to_string(),
                wrapped: "*timestamppb.Timestamp".to_string(),
                primitive: false,
                is_map: false,
                is_repeated: false,
                enumeration: None,
            });
        }

        let entry = self
            .registry
            .resolve(type_name)
            .ok_or_else(|| TypegenError::UnresolvedType {
                field: field.name.clone(),
                type_ref: type_name.to_string(),
            })?;
        let decl = entry
            .as_message()
            .ok_or_else(|| TypegenError::UnresolvedType {
                field: field.name.clone(),
                type_ref: type_name.to_string(),
            })?;

        if decl.is_map_entry() {
            // Field 0 is the key, field 1 the value. Keys are taken as strings.
            let value = decl
                .field
                .get(1)
                .ok_or_else(|| TypegenError::MalformedMapEntry(type_name.to_string()))?;
            let inner = self.map_field(value, state)?;
            return Ok(TypeMapping {
                target: format!("map[string]{}", inner.target),
                wrapped: format!("map[string]{}", inner.wrapped),
                is_map: true,
                ..inner
            });
        }

        Ok(TypeMapping {
            target: format!("*{}", self.qualified(entry, state)),
            wrapped: format!("*{}", self.wrapped(entry)),
            primitive: false,
            is_map: false,
            is_repeated: false,
            enumeration: None,
        })
    }

    fn map_enum(&self, field: &FieldDescriptor, state: &mut MapState) -> Result<TypeMapping> {
        let type_name = self.type_name(field)?;

        let Some(entry) = self.registry.resolve(type_name).filter(|e| e.as_enum().is_some())
        else {
            // Surface the miss but keep going with a name derived from the reference.
            let diagnostic = Diagnostic {
                unit: self.unit.name().to_string(),
                field: field.name.clone(),
                type_ref: type_name.to_string(),
                message: "enum type not found in registry".to_string(),
            };
            warn!(%diagnostic, "unresolved enum reference");
            state.diagnostics.push(diagnostic);

            let parts: Vec<&str> = type_name.rsplit('.').take(1).collect();
            let name = crate::casing::target_case(&parts);
            return Ok(TypeMapping {
                target: name.clone(),
                wrapped: name,
                primitive: false,
                is_map: false,
                is_repeated: false,
                enumeration: None,
            });
        };

        Ok(TypeMapping {
            target: self.qualified(entry, state),
            wrapped: self.wrapped(entry),
            primitive: false,
            is_map: false,
            is_repeated: false,
            enumeration: entry.as_enum().cloned(),
        })
    }

    /// Target name, qualified and imported when declared in another namespace.
    fn qualified(&self, entry: &RegistryEntry<'a>, state: &mut MapState) -> String {
        let origin = self.registry.unit_of(entry);
        let name = entry.target_name();
        if origin.namespace() == self.unit.namespace() {
            return name;
        }
        state.imports.insert(origin.import_path.clone());
        format!("{}.{}", origin.package_name, name)
    }

    fn wrapped(&self, entry: &RegistryEntry<'a>) -> String {
        let origin = self.registry.unit_of(entry);
        format!("{}.{}", origin.package_name, entry.proto_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FileDescriptor;
    use serde_json::json;

    fn files() -> Vec<FileDescriptor> {
        serde_json::from_value(json!([
            {
                "name": "common.proto",
                "package": "common",
                "options": { "goPackage": "github.com/acme/common" },
                "enumType": [{ "name": "Color", "value": [{ "name": "RED", "number": 0 }] }],
                "messageType": [{ "name": "Money" }]
            },
            {
                "name": "shop.proto",
                "package": "shop",
                "options": { "goPackage": "github.com/acme/shop" },
                "messageType": [{
                    "name": "Order",
                    "nestedType": [
                        { "name": "Line" },
                        {
                            "name": "TagsEntry",
                            "options": { "mapEntry": true },
                            "field": [
                                { "name": "key", "number": 1, "type": "TYPE_STRING" },
                                { "name": "value", "number": 2, "type": "TYPE_MESSAGE", "typeName": ".shop.Order.Line" }
                            ]
                        },
                        {
                            "name": "BrokenEntry",
                            "options": { "mapEntry": true },
                            "field": [{ "name": "key", "number": 1, "type": "TYPE_STRING" }]
                        }
                    ]
                }]
            }
        ]))
        .unwrap()
    }

    fn field(value: serde_json::Value) -> FieldDescriptor {
        serde_json::from_value(value).unwrap()
    }

    fn with_mapper<T>(f: impl FnOnce(&TypeMapper<'_, '_>) -> T) -> T {
        let files = files();
        let registry =
            TypeRegistry::build(files.iter().map(SchemaUnit::new).collect()).unwrap();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&registry, registry.unit(1), &config);
        f(&mapper)
    }

    #[test]
    fn scalars() {
        with_mapper(|mapper| {
            let mut state = MapState::default();
            for (kind, expected) in [
                ("TYPE_BOOL", "bool"),
                ("TYPE_SINT32", "int32"),
                ("TYPE_SFIXED64", "int64"),
                ("TYPE_FIXED32", "uint32"),
                ("TYPE_UINT64", "uint64"),
                ("TYPE_FLOAT", "float32"),
                ("TYPE_DOUBLE", "float64"),
                ("TYPE_STRING", "string"),
                ("TYPE_BYTES", "[]byte"),
            ] {
                let mapping = mapper
                    .map_field(&field(json!({ "name": "x", "type": kind })), &mut state)
                    .unwrap();
                assert_eq!(mapping.target, expected);
                assert_eq!(mapping.wrapped, expected);
                assert!(mapping.primitive);
            }
            assert!(state.imports.is_empty());
        });
    }

    #[test]
    fn timestamp_registers_time_imports() {
        with_mapper(|mapper| {
            let mut state = MapState::default();
            let mapping = mapper
                .map_field(
                    &field(json!({ "name": "ts", "type": "TYPE_MESSAGE", "typeName": TIMESTAMP })),
                    &mut state,
                )
                .unwrap();
            assert_eq!(mapping.target, "*time.Time");
            assert!(!mapping.primitive);
            assert!(state.imports.contains("time"));
            assert!(
                state
                    .imports
                    .contains("google.golang.org/protobuf/types/known/timestamppb")
            );
        });
    }

    #[test]
    fn map_entry_unwrapped() {
        with_mapper(|mapper| {
            let mut state = MapState::default();
            let mapping = mapper
                .map_field(
                    &field(json!({
                        "name": "tags",
                        "label": "LABEL_REPEATED",
                        "type": "TYPE_MESSAGE",
                        "typeName": ".shop.Order.TagsEntry"
                    })),
                    &mut state,
                )
                .unwrap();
            assert_eq!(mapping.target, "map[string]*OrderLine");
            assert_eq!(mapping.wrapped, "map[string]*shop.Order_Line");
            assert!(mapping.is_map);
            assert!(!mapping.is_repeated);
        });
    }

    #[test]
    fn malformed_map_entry() {
        with_mapper(|mapper| {
            let err = mapper
                .map_field(
                    &field(json!({
                        "name": "broken",
                        "label": "LABEL_REPEATED",
                        "type": "TYPE_MESSAGE",
                        "typeName": ".shop.Order.BrokenEntry"
                    })),
                    &mut MapState::default(),
                )
                .unwrap_err();
            assert!(matches!(err, TypegenError::MalformedMapEntry(_)));
        });
    }

    #[test]
    fn repeated_message_same_namespace() {
        with_mapper(|mapper| {
            let mut state = MapState::default();
            let mapping = mapper
                .map_field(
                    &field(json!({
                        "name": "lines",
                        "label": "LABEL_REPEATED",
                        "type": "TYPE_MESSAGE",
                        "typeName": ".shop.Order.Line"
                    })),
                    &mut state,
                )
                .unwrap();
            assert_eq!(mapping.target, "[]*OrderLine");
            assert_eq!(mapping.wrapped, "[]*shop.Order_Line");
            assert!(mapping.is_repeated);
            assert!(state.imports.is_empty());
        });
    }

    #[test]
    fn cross_namespace_qualified_and_imported_once() {
        with_mapper(|mapper| {
            let mut state = MapState::default();
            let color = mapper
                .map_field(
                    &field(json!({ "name": "color", "type": "TYPE_ENUM", "typeName": ".common.Color" })),
                    &mut state,
                )
                .unwrap();
            let money = mapper
                .map_field(
                    &field(json!({ "name": "price", "type": "TYPE_MESSAGE", "typeName": ".common.Money" })),
                    &mut state,
                )
                .unwrap();

            assert_eq!(color.target, "common.Color");
            assert_eq!(color.enumeration.as_ref().unwrap().name, "Color");
            assert_eq!(money.target, "*common.Money");
            assert_eq!(
                state.imports.iter().collect::<Vec<_>>(),
                vec!["github.com/acme/common"]
            );
        });
    }

    #[test]
    fn unresolved_message_is_fatal() {
        with_mapper(|mapper| {
            let err = mapper
                .map_field(
                    &field(json!({ "name": "x", "type": "TYPE_MESSAGE", "typeName": ".shop.Nope" })),
                    &mut MapState::default(),
                )
                .unwrap_err();
            assert!(matches!(err, TypegenError::UnresolvedType { type_ref, .. } if type_ref == ".shop.Nope"));
        });
    }

    #[test]
    fn unresolved_enum_is_a_diagnostic() {
        with_mapper(|mapper| {
            let mut state = MapState::default();
            let mapping = mapper
                .map_field(
                    &field(json!({ "name": "state", "type": "TYPE_ENUM", "typeName": ".shop.Order.State" })),
                    &mut state,
                )
                .unwrap();
            assert_eq!(mapping.target, "State");
            assert!(mapping.enumeration.is_none());
            assert_eq!(state.diagnostics.len(), 1);
            assert_eq!(state.diagnostics[0].type_ref, ".shop.Order.State");
        });
    }

    #[test]
    fn unsupported_kinds_are_fatal() {
        with_mapper(|mapper| {
            for kind in ["TYPE_GROUP", "TYPE_SOMETHING_NEW"] {
                let err = mapper
                    .map_field(&field(json!({ "name": "g", "type": kind })), &mut MapState::default())
                    .unwrap_err();
                assert!(matches!(err, TypegenError::UnsupportedType { .. }));
            }
        });
    }

    #[test]
    fn missing_type_name() {
        with_mapper(|mapper| {
            let err = mapper
                .map_field(&field(json!({ "name": "m", "type": "TYPE_MESSAGE" })), &mut MapState::default())
                .unwrap_err();
            assert!(matches!(err, TypegenError::MissingTypeName { .. }));
        });
    }
}
