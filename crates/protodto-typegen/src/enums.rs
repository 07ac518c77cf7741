//! Enum builder.

use crate::casing;
use crate::comments::CommentTable;
use crate::input::EnumDescriptor;
use crate::ir::{Enum, EnumValue};
use crate::walk::path;

/// Build the model of one enum declaration.
///
/// `scope` holds the names of the enclosing messages. Values annotated with
/// `exclude` are dropped here, once; aliases sharing a number are all kept.
pub fn build_enum(
    scope: &[&str],
    decl: &EnumDescriptor,
    enum_path: &[i32],
    comments: &CommentTable,
) -> Enum {
    let mut parts = scope.to_vec();
    parts.push(&decl.name);

    let values = decl
        .value
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.options.exclude)
        .map(|(i, v)| EnumValue {
            name: casing::target_case(&[&v.name]),
            label: v.name.clone(),
            value: v.number,
            comment: comments
                .leading_or_trailing(&path::child(enum_path, path::ENUM_VALUE, i)),
        })
        .collect();

    Enum {
        name: casing::target_case(&parts),
        proto_name: casing::wrapped_case(&parts),
        values,
        comment: comments.leading(enum_path),
    }
}
