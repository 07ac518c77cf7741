//! Post-order walk over every declaration of a schema unit.
//!
//! Both passes consume the same work items: registration indexes them all,
//! flattening models the ones it wants. Nested enums come before nested
//! messages, and both come before the message that declares them.

use crate::input::{EnumDescriptor, FileDescriptor, MessageDescriptor};

/// Descriptor field numbers used in structural paths.
pub mod path {
    /// `FileDescriptorProto.message_type`
    pub const FILE_MESSAGE: i32 = 4;
    /// `FileDescriptorProto.enum_type`
    pub const FILE_ENUM: i32 = 5;
    /// `DescriptorProto.field`
    pub const MESSAGE_FIELD: i32 = 2;
    /// `DescriptorProto.nested_type`
    pub const MESSAGE_NESTED: i32 = 3;
    /// `DescriptorProto.enum_type`
    pub const MESSAGE_ENUM: i32 = 4;
    /// `EnumDescriptorProto.value`
    pub const ENUM_VALUE: i32 = 2;

    /// `base` extended with one list element.
    pub fn child(base: &[i32], list: i32, index: usize) -> Vec<i32> {
        let mut path = Vec::with_capacity(base.len() + 2);
        path.extend_from_slice(base);
        path.push(list);
        path.push(index as i32);
        path
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Decl<'a> {
    Message(&'a MessageDescriptor),
    Enum(&'a EnumDescriptor),
}

/// One declaration with its location in the unit.
#[derive(Debug, Clone)]
pub struct WorkItem<'a> {
    /// Names of the enclosing messages, outermost first.
    pub scope: Vec<&'a str>,
    pub path: Vec<i32>,
    pub decl: Decl<'a>,
}

impl<'a> WorkItem<'a> {
    pub fn name(&self) -> &'a str {
        match self.decl {
            Decl::Message(m) => &m.name,
            Decl::Enum(e) => &e.name,
        }
    }

    /// Scope plus own name.
    pub fn qualified_parts(&self) -> Vec<&'a str> {
        let mut parts = self.scope.clone();
        parts.push(self.name());
        parts
    }
}

/// Every message and enum in `file`, children before parents.
pub fn walk(file: &FileDescriptor) -> Vec<WorkItem<'_>> {
    let mut items = Vec::new();
    let root: Vec<&str> = Vec::new();

    push_enums(&mut items, &root, &[], path::FILE_ENUM, &file.enum_type);
    for (i, message) in file.message_type.iter().enumerate() {
        walk_message(
            &mut items,
            &root,
            path::child(&[], path::FILE_MESSAGE, i),
            message,
        );
    }
    items
}

fn push_enums<'a>(
    items: &mut Vec<WorkItem<'a>>,
    scope: &[&'a str],
    base: &[i32],
    list: i32,
    enums: &'a [EnumDescriptor],
) {
    for (i, decl) in enums.iter().enumerate() {
        items.push(WorkItem {
            scope: scope.to_vec(),
            path: path::child(base, list, i),
            decl: Decl::Enum(decl),
        });
    }
}

fn walk_message<'a>(
    items: &mut Vec<WorkItem<'a>>,
    scope: &[&'a str],
    message_path: Vec<i32>,
    message: &'a MessageDescriptor,
) {
    let mut inner = scope.to_vec();
    inner.push(&message.name);

    push_enums(
        items,
        &inner,
        &message_path,
        path::MESSAGE_ENUM,
        &message.enum_type,
    );
    for (i, nested) in message.nested_type.iter().enumerate() {
        walk_message(
            items,
            &inner,
            path::child(&message_path, path::MESSAGE_NESTED, i),
            nested,
        );
    }

    items.push(WorkItem {
        scope: scope.to_vec(),
        path: message_path,
        decl: Decl::Message(message),
    });
}
