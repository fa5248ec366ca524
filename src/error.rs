use thiserror::Error;

/// An invocation-level failure.
///
/// Any error aborts generation for every file in the request; the plugin never reports partial
/// output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The `paths` host option has a value other than `import` or `source_relative`.
    #[error("unknown path type {0:?}: want \"import\" or \"source_relative\"")]
    UnknownPathType(String),

    /// An `M<file>=<import path>` mapping with an empty file name.
    #[error("invalid import path mapping {0:?}: missing file name")]
    InvalidMapping(String),

    /// Neither an `M` mapping nor a `go_package` option provides an import path.
    #[error(
        "unable to determine Go import path for {0:?}: \
         specify the go_package option in the .proto file or pass M{0}=<import path>"
    )]
    MissingImportPath(String),

    /// An import path that looks like a bare package name.
    #[error(
        "invalid Go import path {import_path:?} for {file:?}: \
         the import path must contain at least one period ('.') or forward slash ('/') character"
    )]
    InvalidImportPath { file: String, import_path: String },

    /// A field references a type no file in the request defines.
    #[error("{file}: field {field} references unknown type {type_name}")]
    UnresolvedType {
        file: String,
        field: String,
        type_name: String,
    },

    /// A generated file name falls outside the `module` host option prefix.
    #[error("{file}: generated file does not match prefix {module:?}")]
    ModulePrefix { file: String, module: String },
}
