//! Schema request input.
//!
//! The request is materialised in full before any transformation starts.
//! [`parse_request`] decodes it from protobuf's JSON mapping.

mod descriptor;
mod rules;

pub use descriptor::{
    EnumDescriptor, EnumValueDescriptor, EnumValueOptions, FieldDescriptor, FieldOptions,
    FieldType, FileDescriptor, FileOptions, Label, Location, MessageDescriptor, MessageOptions,
    OneofDescriptor, SchemaRequest, SourceCodeInfo,
};
pub use rules::{
    Bound, EnumRules, FieldRules, MessageRules, NumericBounds, NumericRules, RepeatedRules,
    StringRules,
};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid schema request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported schema request: {0}")]
    Unsupported(String),
}

/// Parse a JSON-encoded schema request.
pub fn parse_request(input: &str) -> Result<SchemaRequest, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    parse_request_value(value)
}

/// Parse an already-decoded JSON schema request.
pub fn parse_request_value(value: Value) -> Result<SchemaRequest, ParseError> {
    if !value.is_object() {
        return Err(ParseError::Unsupported(
            "schema request must be a JSON object".into(),
        ));
    }

    let request: SchemaRequest = serde_json::from_value(value)?;

    for wanted in &request.file_to_generate {
        if !request.proto_file.iter().any(|f| &f.name == wanted) {
            return Err(ParseError::Unsupported(format!(
                "file {} requested for generation but not provided",
                wanted
            )));
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_minimal_request() {
        let input = json!({
            "fileToGenerate": ["example.proto"],
            "protoFile": [{
                "name": "example.proto",
                "package": "example",
                "messageType": [{
                    "name": "Message",
                    "field": [{
                        "name": "num32",
                        "number": 1,
                        "label": "LABEL_OPTIONAL",
                        "type": "TYPE_INT32",
                        "jsonName": "num32",
                        "options": { "public": true, "[validate.rules]": { "int32": { "gt": 0 } } }
                    }]
                }]
            }]
        });

        let request = parse_request(&input.to_string()).unwrap();
        let field = &request.proto_file[0].message_type[0].field[0];
        assert_eq!(field.kind, FieldType::Int32);
        assert!(field.options.public);
        let bounds = field.options.rules.as_ref().unwrap().numeric().unwrap();
        assert_eq!(bounds.gt, Some(0.0));
    }

    #[test]
    fn rule_values_in_string_form() {
        let input = json!({
            "protoFile": [{
                "name": "a.proto",
                "messageType": [{
                    "name": "M",
                    "field": [
                        { "name": "n", "type": "TYPE_INT64", "options": { "[validate.rules]": { "int64": { "gte": "0" } } } },
                        { "name": "s", "type": "TYPE_STRING", "options": { "[validate.rules]": { "string": { "maxLen": "32" } } } }
                    ]
                }]
            }]
        });
        let request = parse_request(&input.to_string()).unwrap();
        let fields = &request.proto_file[0].message_type[0].field;
        let n = fields[0].options.rules.as_ref().unwrap();
        assert_eq!(n.numeric().unwrap().gte, Some(0.0));
        let s = fields[1].options.rules.as_ref().unwrap();
        assert_eq!(s.string.as_ref().unwrap().max_len, Some(32));
    }

    #[test]
    fn extension_style_keys() {
        let input = json!({
            "protoFile": [{
                "name": "a.proto",
                "enumType": [{
                    "name": "Global",
                    "value": [{ "name": "TWO", "number": 2, "options": { "[huma.exclude]": true } }]
                }]
            }]
        });
        let request = parse_request(&input.to_string()).unwrap();
        assert!(request.proto_file[0].enum_type[0].value[0].options.exclude);
    }

    #[test]
    fn unknown_field_kind_decodes() {
        let input = json!({
            "protoFile": [{
                "name": "a.proto",
                "messageType": [{ "name": "M", "field": [{ "name": "x", "type": "TYPE_FUTURE" }] }]
            }]
        });
        let request = parse_request(&input.to_string()).unwrap();
        assert_eq!(
            request.proto_file[0].message_type[0].field[0].kind,
            FieldType::Unknown
        );
    }

    #[test]
    fn reject_missing_requested_file() {
        let input = json!({ "fileToGenerate": ["missing.proto"], "protoFile": [] });
        assert!(matches!(
            parse_request(&input.to_string()),
            Err(ParseError::Unsupported(_))
        ));
    }

    #[test]
    fn reject_non_object() {
        assert!(parse_request("[]").is_err());
        assert!(parse_request("not json").is_err());
    }
}
