//! Schema request types.
//!
//! A subset of the schema compiler's descriptor model in protobuf's JSON
//! mapping (lowerCamelCase keys). Custom annotations are decoded into typed
//! option fields; each also accepts its extension-style key, e.g.
//! `"[huma.public]": true`.

use super::rules::FieldRules;
use serde::{Deserialize, Serialize};

/// One complete generation request: every file needed to resolve types,
/// plus the names of the files output is wanted for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaRequest {
    /// Files explicitly requested for output.
    pub file_to_generate: Vec<String>,
    /// Free-form generator parameter passed through by the compiler.
    pub parameter: Option<String>,
    /// All files, dependencies included, in dependency order.
    pub proto_file: Vec<FileDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileDescriptor {
    /// Path relative to the compiler's include root, e.g. `foo/bar.proto`.
    pub name: String,
    pub package: String,
    pub dependency: Vec<String>,
    pub message_type: Vec<MessageDescriptor>,
    pub enum_type: Vec<EnumDescriptor>,
    pub options: FileOptions,
    pub source_code_info: Option<SourceCodeInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileOptions {
    /// `import/path` or `import/path;name`.
    pub go_package: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageDescriptor {
    pub name: String,
    pub field: Vec<FieldDescriptor>,
    pub nested_type: Vec<MessageDescriptor>,
    pub enum_type: Vec<EnumDescriptor>,
    pub oneof_decl: Vec<OneofDescriptor>,
    pub options: MessageOptions,
}

impl MessageDescriptor {
    /// Whether this is a compiler-generated map entry type.
    pub fn is_map_entry(&self) -> bool {
        self.options.map_entry
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageOptions {
    pub map_entry: bool,
    pub deprecated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OneofDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub number: i32,
    pub label: Label,
    #[serde(rename = "type")]
    pub kind: FieldType,
    /// Fully-qualified referenced type for message and enum fields,
    /// e.g. `.pkg.Outer.Inner`.
    pub type_name: Option<String>,
    /// lowerCamelCase JSON name assigned by the compiler.
    pub json_name: Option<String>,
    pub oneof_index: Option<i32>,
    pub proto3_optional: bool,
    pub options: FieldOptions,
}

impl FieldDescriptor {
    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[default]
    #[serde(rename = "LABEL_OPTIONAL")]
    Optional,
    #[serde(rename = "LABEL_REQUIRED")]
    Required,
    #[serde(rename = "LABEL_REPEATED")]
    Repeated,
}

/// Declared wire type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "TYPE_DOUBLE")]
    Double,
    #[serde(rename = "TYPE_FLOAT")]
    Float,
    #[serde(rename = "TYPE_INT64")]
    Int64,
    #[serde(rename = "TYPE_UINT64")]
    Uint64,
    #[serde(rename = "TYPE_INT32")]
    Int32,
    #[serde(rename = "TYPE_FIXED64")]
    Fixed64,
    #[serde(rename = "TYPE_FIXED32")]
    Fixed32,
    #[serde(rename = "TYPE_BOOL")]
    Bool,
    #[default]
    #[serde(rename = "TYPE_STRING")]
    String,
    #[serde(rename = "TYPE_GROUP")]
    Group,
    #[serde(rename = "TYPE_MESSAGE")]
    Message,
    #[serde(rename = "TYPE_BYTES")]
    Bytes,
    #[serde(rename = "TYPE_UINT32")]
    Uint32,
    #[serde(rename = "TYPE_ENUM")]
    Enum,
    #[serde(rename = "TYPE_SFIXED32")]
    Sfixed32,
    #[serde(rename = "TYPE_SFIXED64")]
    Sfixed64,
    #[serde(rename = "TYPE_SINT32")]
    Sint32,
    #[serde(rename = "TYPE_SINT64")]
    Sint64,
    /// Anything this decoder does not recognise.
    #[serde(other)]
    Unknown,
}

/// Field options, including the custom annotations this generator consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldOptions {
    pub deprecated: bool,
    /// Expose the field on the generated type.
    #[serde(alias = "[huma.public]")]
    pub public: bool,
    #[serde(alias = "[huma.readOnly]")]
    pub read_only: bool,
    /// Replacement field name.
    #[serde(alias = "[huma.name]")]
    pub name: Option<String>,
    /// Replacement serialized name.
    #[serde(alias = "[huma.json]")]
    pub json: Option<String>,
    #[serde(alias = "[huma.example]")]
    pub example: Option<String>,
    #[serde(alias = "[huma.multipleOf]")]
    pub multiple_of: Option<f64>,
    #[serde(alias = "[validate.rules]")]
    pub rules: Option<FieldRules>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumDescriptor {
    pub name: String,
    pub value: Vec<EnumValueDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumValueDescriptor {
    pub name: String,
    pub number: i32,
    pub options: EnumValueOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumValueOptions {
    pub deprecated: bool,
    /// Drop the value from the generated enum.
    #[serde(alias = "[huma.exclude]")]
    pub exclude: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceCodeInfo {
    pub location: Vec<Location>,
}

/// A source location addressed by structural path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub path: Vec<i32>,
    pub span: Vec<i32>,
    pub leading_comments: Option<String>,
    pub trailing_comments: Option<String>,
    pub leading_detached_comments: Vec<String>,
}
