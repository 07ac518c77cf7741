//! Schema units.

use crate::comments::CommentTable;
use crate::input::FileDescriptor;
use std::path::Path;

/// One input file with its derived namespace information and comment table.
#[derive(Debug)]
pub struct SchemaUnit<'a> {
    pub descriptor: &'a FileDescriptor,
    /// Target package name, e.g. `example`.
    pub package_name: String,
    /// Import path of the compiler-generated types for this unit.
    pub import_path: String,
    pub comments: CommentTable,
}

impl<'a> SchemaUnit<'a> {
    pub fn new(descriptor: &'a FileDescriptor) -> Self {
        let (import_path, package_name) = target_package(descriptor);
        Self {
            descriptor,
            package_name,
            import_path,
            comments: CommentTable::new(descriptor.source_code_info.as_ref()),
        }
    }

    /// Unit path, e.g. `foo/bar.proto`.
    pub fn name(&self) -> &'a str {
        &self.descriptor.name
    }

    /// Declared schema namespace, e.g. `foo.v1`.
    pub fn namespace(&self) -> &'a str {
        &self.descriptor.package
    }
}

/// Import path and package name for a file.
///
/// `go_package` may be `path;name` or just `path`, in which case the name is
/// the last path segment. Without it the last segment of the declared
/// package is used, then the file stem.
fn target_package(file: &FileDescriptor) -> (String, String) {
    if let Some(go_package) = file.options.go_package.as_deref().filter(|p| !p.is_empty()) {
        return match go_package.split_once(';') {
            Some((path, name)) => (path.to_string(), sanitize_package(name)),
            None => {
                let last = go_package.rsplit('/').next().unwrap_or(go_package);
                (go_package.to_string(), sanitize_package(last))
            }
        };
    }

    let name = file
        .package
        .rsplit('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| {
            Path::new(&file.name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
    let name = sanitize_package(&name);
    (name.clone(), name)
}

fn sanitize_package(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Output identifier for a unit: its path with the extension replaced by
/// `suffix`.
pub fn output_name(source: &str, suffix: &str) -> String {
    let stem = Path::new(source).with_extension("");
    format!("{}{}", stem.to_string_lossy(), suffix)
}
