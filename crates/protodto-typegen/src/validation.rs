//! Validation normalizer.
//!
//! Merges the built-in field annotations (read-only, deprecated,
//! multiple-of) with the constraint-rule annotation into one [`Validation`].

use crate::input::{FieldDescriptor, FieldRules};
use crate::ir::{Enum, Validation};

/// Notice prepended to the comment of deprecated fields.
pub const DEPRECATED_NOTICE: &str = "Deprecated: Do not use.";

/// Normalise the constraints of `field`.
///
/// `enumeration` is the field's resolved enum, if any; its value list is
/// already exclusion-filtered and is only read here. `comment` gets the
/// deprecation notice when the field is deprecated.
pub fn normalize(
    field: &FieldDescriptor,
    enumeration: Option<&Enum>,
    comment: &mut String,
) -> Validation {
    let options = &field.options;
    let mut validation = Validation {
        read_only: options.read_only,
        multiple_of: options.multiple_of,
        ..Default::default()
    };

    if options.deprecated {
        validation.deprecated = true;
        *comment = format!("{} {}", DEPRECATED_NOTICE, comment)
            .trim()
            .to_string();
    }

    let rules = options.rules.as_ref();
    if let Some(rules) = rules {
        apply_rules(&mut validation, rules);
    }

    if let Some(enumeration) = enumeration {
        validation.enum_values = allowed_labels(enumeration, rules);
    }

    validation
}

fn apply_rules(validation: &mut Validation, rules: &FieldRules) {
    if let Some(message) = &rules.message {
        validation.required = message.required.unwrap_or(false);
    }

    if let Some(bounds) = rules.numeric() {
        validation.minimum = bounds.gte.or(bounds.constant);
        validation.exclusive_minimum = bounds.gt;
        validation.maximum = bounds.lte.or(bounds.constant);
        validation.exclusive_maximum = bounds.lt;
    }

    if let Some(string) = &rules.string {
        validation.min_length = string.min_len.or(string.len);
        validation.max_length = string.max_len.or(string.len);
        validation.pattern = string.pattern.clone();
        validation.format = string.format().map(String::from);
    }

    if let Some(repeated) = &rules.repeated {
        validation.min_items = repeated.min_items;
        validation.max_items = repeated.max_items;
        validation.unique = repeated.unique.unwrap_or(false);
    }
}

/// Labels of `enumeration` allowed on this field: the enum's values minus
/// any `not_in` numbers, restricted to `in` numbers when given.
fn allowed_labels(enumeration: &Enum, rules: Option<&FieldRules>) -> Vec<String> {
    let enum_rules = rules.and_then(|r| r.enumeration.as_ref());
    enumeration
        .values
        .iter()
        .filter(|v| match enum_rules {
            Some(r) => {
                !r.not_in.contains(&v.value) && (r.within.is_empty() || r.within.contains(&v.value))
            }
            None => true,
        })
        .map(|v| v.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::build_enum;
    use crate::comments::CommentTable;
    use serde_json::json;

    fn field(options: serde_json::Value) -> FieldDescriptor {
        serde_json::from_value(json!({ "name": "f", "type": "TYPE_INT32", "options": options }))
            .unwrap()
    }

    fn global() -> Enum {
        let decl = serde_json::from_value(json!({
            "name": "Global",
            "value": [
                { "name": "ZERO", "number": 0 },
                { "name": "ONE", "number": 1 },
                { "name": "TWO", "number": 2, "options": { "exclude": true } },
                { "name": "THREE", "number": 3 }
            ]
        }))
        .unwrap();
        build_enum(&[], &decl, &[5, 0], &CommentTable::default())
    }

    #[test]
    fn zero_bound_is_not_absent() {
        let mut comment = String::new();
        let with_zero = normalize(
            &field(json!({ "rules": { "int64": { "gte": 0 } } })),
            None,
            &mut comment,
        );
        assert_eq!(with_zero.minimum, Some(0.0));

        let without = normalize(&field(json!({})), None, &mut comment);
        assert_eq!(without.minimum, None);
        assert_ne!(with_zero, without);
    }

    #[test]
    fn numeric_bounds_map_to_their_own_slots() {
        let v = normalize(
            &field(json!({ "rules": { "int32": { "gt": 0, "lte": 100 } }, "multipleOf": 2.0 })),
            None,
            &mut String::new(),
        );
        assert_eq!(v.exclusive_minimum, Some(0.0));
        assert_eq!(v.maximum, Some(100.0));
        assert_eq!(v.minimum, None);
        assert_eq!(v.exclusive_maximum, None);
        assert_eq!(v.multiple_of, Some(2.0));

        let v = normalize(
            &field(json!({ "rules": { "double": { "lt": 1.5 } } })),
            None,
            &mut String::new(),
        );
        assert_eq!(v.exclusive_maximum, Some(1.5));
    }

    #[test]
    fn const_pins_both_ends() {
        let v = normalize(
            &field(json!({ "rules": { "uint32": { "const": 7 } } })),
            None,
            &mut String::new(),
        );
        assert_eq!((v.minimum, v.maximum), (Some(7.0), Some(7.0)));
    }

    #[test]
    fn string_and_repeated_rules() {
        let v = normalize(
            &field(json!({ "rules": { "string": { "minLen": 1, "maxLen": 10, "pattern": "^a", "uri": true } } })),
            None,
            &mut String::new(),
        );
        assert_eq!(v.min_length, Some(1));
        assert_eq!(v.max_length, Some(10));
        assert_eq!(v.pattern.as_deref(), Some("^a"));
        assert_eq!(v.format.as_deref(), Some("uri"));

        let v = normalize(
            &field(json!({ "rules": { "string": { "len": 4 } } })),
            None,
            &mut String::new(),
        );
        assert_eq!((v.min_length, v.max_length), (Some(4), Some(4)));

        let v = normalize(
            &field(json!({ "rules": { "repeated": { "minItems": 0, "maxItems": 3, "unique": true } } })),
            None,
            &mut String::new(),
        );
        assert_eq!(v.min_items, Some(0));
        assert_eq!(v.max_items, Some(3));
        assert!(v.unique);
    }

    #[test]
    fn flags_and_deprecation_notice() {
        let mut comment = "The old name.".to_string();
        let v = normalize(
            &field(json!({ "readOnly": true, "deprecated": true, "rules": { "message": { "required": true } } })),
            None,
            &mut comment,
        );
        assert!(v.read_only && v.deprecated && v.required);
        assert_eq!(comment, "Deprecated: Do not use. The old name.");

        let mut empty = String::new();
        normalize(&field(json!({ "deprecated": true })), None, &mut empty);
        assert_eq!(empty, DEPRECATED_NOTICE);
    }

    #[test]
    fn enum_allow_list_defaults_to_all_values() {
        let global = global();
        let v = normalize(&field(json!({})), Some(&global), &mut String::new());
        assert_eq!(v.enum_values, vec!["ZERO", "ONE", "THREE"]);
    }

    #[test]
    fn enum_exclusion_composes_with_not_in() {
        let global = global();
        let v = normalize(
            &field(json!({ "rules": { "enum": { "notIn": [1, 2] } } })),
            Some(&global),
            &mut String::new(),
        );
        assert_eq!(v.enum_values, vec!["ZERO", "THREE"]);
        // The shared model is untouched.
        assert_eq!(global.values.len(), 3);

        let v = normalize(
            &field(json!({ "rules": { "enum": { "in": [2, 3] } } })),
            Some(&global),
            &mut String::new(),
        );
        assert_eq!(v.enum_values, vec!["THREE"]);
    }
}
