//! Type registry.
//!
//! Indexes every message and enum of every loaded unit, dependencies
//! included, by fully-qualified name. It is built once per run before any
//! flattening starts and is read-only afterwards.

use crate::casing;
use crate::enums::build_enum;
use crate::error::{Result, TypegenError};
use crate::input::{EnumDescriptor, MessageDescriptor};
use crate::ir::Enum;
use crate::unit::SchemaUnit;
use crate::walk::{Decl, WorkItem, walk};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Fully-qualified type name with a leading dot, e.g. `.pkg.Outer.Inner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(namespace: &str, parts: &[&str]) -> Self {
        let mut name = String::new();
        if !namespace.is_empty() {
            name.push('.');
            name.push_str(namespace);
        }
        for part in parts {
            name.push('.');
            name.push_str(part);
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub enum EntryKind<'a> {
    /// Enums are built eagerly during registration.
    Enum {
        decl: &'a EnumDescriptor,
        model: Arc<Enum>,
    },
    /// Messages are modeled later, during flattening.
    Message { decl: &'a MessageDescriptor },
}

#[derive(Debug)]
pub struct RegistryEntry<'a> {
    pub type_ref: TypeRef,
    /// Enclosing message names plus the declaration's own name.
    pub parts: Vec<&'a str>,
    /// Index of the declaring unit in [`TypeRegistry::units`].
    pub unit: usize,
    pub kind: EntryKind<'a>,
}

impl RegistryEntry<'_> {
    /// Target identifier of the declaration.
    pub fn target_name(&self) -> String {
        casing::target_case(&self.parts)
    }

    /// Name the schema compiler gives the declaration.
    pub fn proto_name(&self) -> String {
        casing::wrapped_case(&self.parts)
    }

    pub fn as_enum(&self) -> Option<&Arc<Enum>> {
        match &self.kind {
            EntryKind::Enum { model, .. } => Some(model),
            EntryKind::Message { .. } => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageDescriptor> {
        match self.kind {
            EntryKind::Message { decl } => Some(decl),
            EntryKind::Enum { .. } => None,
        }
    }
}

/// Run-scoped index of every declared type.
#[derive(Debug)]
pub struct TypeRegistry<'a> {
    units: Vec<SchemaUnit<'a>>,
    entries: HashMap<TypeRef, RegistryEntry<'a>>,
}

impl<'a> TypeRegistry<'a> {
    /// Register every declaration of every unit.
    pub fn build(units: Vec<SchemaUnit<'a>>) -> Result<Self> {
        let mut registry = Self {
            units,
            entries: HashMap::new(),
        };

        for index in 0..registry.units.len() {
            let descriptor = registry.units[index].descriptor;
            for item in walk(descriptor) {
                registry.register(index, item)?;
            }
        }

        debug!(
            units = registry.units.len(),
            types = registry.entries.len(),
            "type registry built"
        );
        Ok(registry)
    }

    fn register(&mut self, unit_index: usize, item: WorkItem<'a>) -> Result<()> {
        let unit = &self.units[unit_index];
        let parts = item.qualified_parts();
        let type_ref = TypeRef::new(unit.namespace(), &parts);

        let kind = match item.decl {
            Decl::Enum(decl) => EntryKind::Enum {
                decl,
                model: Arc::new(build_enum(&item.scope, decl, &item.path, &unit.comments)),
            },
            Decl::Message(decl) => EntryKind::Message { decl },
        };

        match self.entries.entry(type_ref) {
            Entry::Occupied(existing) => Err(TypegenError::DuplicateType(
                existing.key().to_string(),
            )),
            Entry::Vacant(slot) => {
                let type_ref = slot.key().clone();
                slot.insert(RegistryEntry {
                    type_ref,
                    parts,
                    unit: unit_index,
                    kind,
                });
                Ok(())
            }
        }
    }

    pub fn resolve(&self, type_ref: &str) -> Option<&RegistryEntry<'a>> {
        self.entries.get(&TypeRef::from(type_ref))
    }

    pub fn units(&self) -> &[SchemaUnit<'a>] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> &SchemaUnit<'a> {
        &self.units[index]
    }

    /// Unit declaring `entry`.
    pub fn unit_of(&self, entry: &RegistryEntry<'a>) -> &SchemaUnit<'a> {
        &self.units[entry.unit]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
