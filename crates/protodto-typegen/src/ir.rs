//! Output model.
//!
//! Everything an emitter needs to render DTO types for one schema unit:
//! flattened messages and enums with resolved type expressions, comments and
//! normalised validation rules.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// One enum value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Target identifier, e.g. `ONE` -> `One`.
    pub name: String,
    /// Declared label, used as the serialized form.
    pub label: String,
    pub value: i32,
    pub comment: String,
}

/// A flattened enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// Target identifier, nesting scope included (`SubCamelCase`).
    pub name: String,
    /// Name the schema compiler gives the type (`Sub_CamelCase`).
    pub proto_name: String,
    /// Values in declaration order, excluded values already removed.
    pub values: Vec<EnumValue>,
    pub comment: String,
}

impl Enum {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.label.as_str())
    }
}

/// Normalised constraints for one field.
///
/// Bounds are `Option`s: `Some(0.0)` is an explicit bound of zero, `None`
/// means no bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub read_only: bool,
    pub deprecated: bool,
    pub required: bool,
    pub minimum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
    pub multiple_of: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique: bool,
    /// Allowed enum labels for this field only.
    pub enum_values: Vec<String>,
}

/// A field of a flattened message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Name the schema compiler gives the field.
    pub proto_name: String,
    /// Serialized (JSON) name.
    pub json_name: String,
    /// Target type expression, e.g. `[]*Another` or `map[string]int32`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Type expression of the compiler-generated representation.
    pub proto_type: String,
    pub is_map: bool,
    pub is_primitive: bool,
    pub is_repeated: bool,
    /// One-of group name, empty when the field is not in a group.
    pub one_of: String,
    pub comment: String,
    pub example: Option<String>,
    /// The referenced enum, shared with the type registry.
    #[serde(rename = "enum")]
    pub enumeration: Option<Arc<Enum>>,
    pub validation: Validation,
}

/// A flattened message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    pub proto_name: String,
    /// Public fields in declaration order.
    pub fields: Vec<Field>,
    /// One-of group name to the names of its member fields.
    pub one_ofs: BTreeMap<String, Vec<String>>,
    pub comment: String,
}

impl Message {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Member fields of a one-of group, in declaration order.
    pub fn one_of_fields<'m>(&'m self, group: &'m str) -> impl Iterator<Item = &'m Field> {
        self.fields.iter().filter(move |f| f.one_of == group)
    }
}

/// Model of one output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFile {
    /// Derived output identifier, e.g. `foo/bar.huma.go`.
    pub name: String,
    /// Input unit this was generated from.
    pub source: String,
    /// Target namespace the output belongs to.
    pub package_name: String,
    /// Import path of the compiler-generated types.
    pub proto_import: String,
    /// Required imports, sorted.
    pub imports: BTreeSet<String>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
}

impl OutputFile {
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// A recoverable problem found while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub unit: String,
    pub field: String,
    pub type_ref: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: field {} ({}): {}",
            self.unit, self.field, self.type_ref, self.message
        )
    }
}

/// Result of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// One entry per requested unit with at least one public type, in
    /// request order.
    pub files: Vec<OutputFile>,
    pub diagnostics: Vec<Diagnostic>,
}
