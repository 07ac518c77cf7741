//! Identifier casing.
//!
//! Target names are camel-cased with common initialisms fully capitalised
//! (`user_id` -> `UserID`), so generated types pass the target linter.
//! Wrapped names follow the schema compiler's own convention instead.

use heck::ToSnakeCase;

/// Initialisms that are written in capitals in target identifiers.
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Words of an identifier, lowercased, split on separators and case
/// boundaries: `HTTPServer_name` -> `["http", "server", "name"]`.
pub fn words(input: &str) -> Vec<String> {
    input
        .to_snake_case()
        .split('_')
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Target identifier for the given name parts, e.g. a nesting scope plus a
/// declared name: `["outer", "user_id"]` -> `OuterUserID`.
pub fn target_case(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| words(part))
        .map(|word| {
            let upper = word.to_uppercase();
            if INITIALISMS.contains(&upper.as_str()) {
                upper
            } else {
                capitalize(&word)
            }
        })
        .collect()
}

/// The schema compiler's camel case: separators dropped, the first letter
/// and any letter after a separator or digit uppercased, everything else
/// kept as written. `fooBar_baz` -> `FooBarBaz`, `mp2t` -> `Mp2T`.
pub fn camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut upper_next = true;
    for c in input.chars() {
        if !c.is_alphanumeric() {
            upper_next = true;
        } else if c.is_ascii_digit() {
            out.push(c);
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Wrapped-representation name of a possibly nested declaration:
/// each scope component camel-cased, joined with `_` (`Outer_Inner`).
pub fn wrapped_case(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| camel(part))
        .collect::<Vec<_>>()
        .join("_")
}

/// Lowercase words joined with `_`.
pub fn snake(input: &str) -> String {
    input.to_snake_case()
}
