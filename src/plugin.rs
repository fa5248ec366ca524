//! The protoc plugin runtime.
//!
//! Decodes the parts of a `CodeGeneratorRequest` the generator needs into [`SchemaFile`]s, and
//! packs [`GeneratedFile`]s back into a `CodeGeneratorResponse`. This mirrors the behavior of the
//! Go plugin runtime so that output names and identifiers match what other Go plugins produce for
//! the same input.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use prost_types::compiler::code_generator_response::{self, Feature};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::field_descriptor_proto::Label;
use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use crate::descriptor::{
    GeneratedFile, Kind, SchemaEnum, SchemaEnumValue, SchemaField, SchemaMessage, SchemaFile,
};
use crate::ident::{to_go_camel, to_go_sanitized, to_json_name};
use crate::Error;

/// Method names of generated Go messages that fields may not shadow.
const RESERVED_NAMES: [&str; 8] = [
    "Reset",
    "String",
    "ProtoMessage",
    "Marshal",
    "Unmarshal",
    "ExtensionRangeArray",
    "ExtensionMap",
    "Descriptor",
];

/// How output file names are derived, set by the `paths` parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathType {
    /// Output files are placed under the Go import path of their package.
    #[default]
    Import,
    /// Output files are placed next to the `.proto` file they were generated from.
    SourceRelative,
}

impl FromStr for PathType {
    type Err = Error;

    fn from_str(s: &str) -> Result<PathType, Error> {
        match s {
            "import" => Ok(PathType::Import),
            "source_relative" => Ok(PathType::SourceRelative),
            _ => Err(Error::UnknownPathType(s.to_owned())),
        }
    }
}

/// Splits a plugin parameter string into `(key, value)` pairs.
///
/// Items are separated by `,`; a key without `=` has an empty value.
pub fn parameters(parameter: &str) -> impl Iterator<Item = (&str, &str)> {
    parameter
        .split(',')
        .filter(|item| !item.is_empty())
        .map(|item| item.split_once('=').unwrap_or((item, "")))
}

/// The request, resolved into schema files.
#[derive(Debug)]
pub struct Plugin {
    pub files: Vec<SchemaFile>,
    module: Option<String>,
}

impl Plugin {
    /// Resolves `request`.
    ///
    /// The host options `paths`, `module` and `M<file>` are handled here; every other parameter
    /// is passed to `param_func`, whose error aborts the whole request.
    pub fn new<F>(request: &CodeGeneratorRequest, mut param_func: F) -> Result<Plugin, Error>
    where
        F: FnMut(&str, &str) -> Result<(), Error>,
    {
        let mut path_type = PathType::default();
        let mut module = None;
        let mut go_packages = HashMap::new();

        for (key, value) in parameters(request.parameter()) {
            match key {
                "paths" => path_type = value.parse()?,
                "module" => module = Some(value.to_owned()),
                _ if key.starts_with('M') => {
                    let file = &key[1..];
                    if file.is_empty() {
                        return Err(Error::InvalidMapping(format!("{}={}", key, value)));
                    }
                    go_packages.insert(file, split_go_package(value));
                }
                _ => param_func(key, value)?,
            }
        }

        let to_generate: HashSet<&str> = request
            .file_to_generate
            .iter()
            .map(String::as_str)
            .collect();
        let message_types = MessageTypes::new(&request.proto_file);

        let files = request
            .proto_file
            .iter()
            .map(|file| {
                let go_package = file
                    .options
                    .as_ref()
                    .and_then(|options| options.go_package.as_deref())
                    .map(split_go_package)
                    .unwrap_or_default();
                // A mapping overrides the option one part at a time.
                let (mapped_path, mapped_name) =
                    go_packages.get(file.name()).copied().unwrap_or_default();
                let go_package = (
                    Some(mapped_path).filter(|path| !path.is_empty()).unwrap_or(go_package.0),
                    mapped_name.or(go_package.1),
                );
                let generate = to_generate.contains(file.name());
                resolve_file(file, go_package, generate, path_type, &message_types)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Plugin { files, module })
    }

    /// Packs generated files into a response, applying the `module` prefix.
    pub fn response(&self, files: Vec<GeneratedFile>) -> Result<CodeGeneratorResponse, Error> {
        let file = files
            .into_iter()
            .map(|generated| -> Result<code_generator_response::File, Error> {
                let name = match &self.module {
                    Some(module) => generated
                        .name
                        .strip_prefix(&format!("{}/", module))
                        .map(str::to_owned)
                        .ok_or_else(|| Error::ModulePrefix {
                            file: generated.name.clone(),
                            module: module.clone(),
                        })?,
                    None => generated.name,
                };
                Ok(code_generator_response::File {
                    name: Some(name),
                    content: Some(generated.content),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CodeGeneratorResponse {
            file,
            supported_features: Some(Feature::Proto3Optional as u64),
            ..Default::default()
        })
    }
}

/// A response reporting `error` to protoc, with no files.
pub fn error_response(error: &Error) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(error.to_string()),
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    }
}

/// Go names of every message type in the request, keyed by fully qualified Protobuf name.
struct MessageTypes {
    types: HashMap<String, MessageType>,
}

struct MessageType {
    go_name: String,
    map_entry: bool,
}

impl MessageTypes {
    fn new(files: &[FileDescriptorProto]) -> MessageTypes {
        let mut message_types = MessageTypes {
            types: HashMap::new(),
        };
        for file in files {
            for message in &file.message_type {
                message_types.add_message(file.package(), &mut Vec::new(), message);
            }
        }
        message_types
    }

    fn add_message<'a>(
        &mut self,
        package: &str,
        type_path: &mut Vec<&'a str>,
        message: &'a DescriptorProto,
    ) {
        type_path.push(message.name());

        let relative_name = type_path.iter().join(".");
        let fq_name = if package.is_empty() {
            format!(".{}", relative_name)
        } else {
            format!(".{}.{}", package, relative_name)
        };
        let map_entry = message
            .options
            .as_ref()
            .and_then(|options| options.map_entry)
            .unwrap_or(false);
        self.types.insert(
            fq_name,
            MessageType {
                go_name: to_go_camel(&relative_name),
                map_entry,
            },
        );

        for nested in &message.nested_type {
            self.add_message(package, type_path, nested);
        }
        type_path.pop();
    }

    fn get(&self, type_name: &str) -> Option<&MessageType> {
        self.types.get(type_name)
    }
}

/// Splits a `go_package` value of the form `import/path[;name]`.
fn split_go_package(go_package: &str) -> (&str, Option<&str>) {
    match go_package.split_once(';') {
        Some((import_path, name)) => (import_path, Some(name).filter(|name| !name.is_empty())),
        None => (go_package, None),
    }
}

/// The last element of a `/`-separated path.
fn base_name(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

fn resolve_file(
    file: &FileDescriptorProto,
    (go_import_path, go_package_name): (&str, Option<&str>),
    generate: bool,
    path_type: PathType,
    message_types: &MessageTypes,
) -> Result<SchemaFile, Error> {
    let path = file.name();

    if go_import_path.is_empty() {
        return Err(Error::MissingImportPath(path.to_owned()));
    }
    if !go_import_path.contains('.') && !go_import_path.contains('/') {
        return Err(Error::InvalidImportPath {
            file: path.to_owned(),
            import_path: go_import_path.to_owned(),
        });
    }

    let go_package_name = match go_package_name {
        Some(name) => name.to_owned(),
        None => to_go_sanitized(base_name(go_import_path)),
    };

    let stem = path
        .strip_suffix(".proto")
        .or_else(|| path.strip_suffix(".protodevel"))
        .unwrap_or(path);
    let generated_filename_prefix = match path_type {
        PathType::Import => format!("{}/{}", go_import_path.trim_end_matches('/'), base_name(stem)),
        PathType::SourceRelative => stem.to_owned(),
    };

    debug!("file: {:?}, generate: {}, prefix: {:?}", path, generate, generated_filename_prefix);

    let enums = file.enum_type.iter().map(resolve_enum).collect();
    let messages = file
        .message_type
        .iter()
        .map(|message| resolve_message(path, message, message_types))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SchemaFile {
        path: path.to_owned(),
        proto_package: file.package().to_owned(),
        go_package_name,
        generated_filename_prefix,
        generate,
        enums,
        messages,
    })
}

fn resolve_enum(desc: &EnumDescriptorProto) -> SchemaEnum {
    let go_name = to_go_camel(desc.name());
    let values = desc
        .value
        .iter()
        .map(|value| SchemaEnumValue {
            // Value names keep their declared spelling.
            go_name: format!("{}_{}", go_name, value.name()),
            number: value.number(),
        })
        .collect();

    SchemaEnum { go_name, values }
}

fn resolve_message(
    path: &str,
    message: &DescriptorProto,
    message_types: &MessageTypes,
) -> Result<SchemaMessage, Error> {
    let mut used_names: HashMap<String, bool> = RESERVED_NAMES
        .iter()
        .map(|name| (name.to_string(), true))
        .collect();
    let mut seen_oneofs = HashSet::new();

    let fields = message
        .field
        .iter()
        .map(|field| {
            let go_name = unique_field_name(to_go_camel(field.name()), true, &mut used_names);
            // A oneof claims its name at its first field, synthetic ones included. Oneofs have
            // no getter.
            if let Some(index) = field.oneof_index {
                if seen_oneofs.insert(index) {
                    if let Some(oneof) = usize::try_from(index)
                        .ok()
                        .and_then(|index| message.oneof_decl.get(index))
                    {
                        unique_field_name(to_go_camel(oneof.name()), false, &mut used_names);
                    }
                }
            }
            resolve_field(path, field, go_name, message_types)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SchemaMessage {
        go_name: to_go_camel(message.name()),
        fields,
    })
}

/// Appends `_` until `name`, and its getter `Get<name>` when it has one, no longer collide with
/// a previously assigned name.
fn unique_field_name(
    mut name: String,
    has_getter: bool,
    used_names: &mut HashMap<String, bool>,
) -> String {
    let is_used = |name: &str, used_names: &HashMap<String, bool>| {
        used_names.get(name).copied().unwrap_or(false)
    };
    while is_used(&name, used_names)
        || (has_getter && is_used(&format!("Get{}", name), used_names))
    {
        name.push('_');
    }
    used_names.insert(name.clone(), true);
    used_names.insert(format!("Get{}", name), has_getter);
    name
}

fn resolve_field(
    path: &str,
    field: &FieldDescriptorProto,
    go_name: String,
    message_types: &MessageTypes,
) -> Result<SchemaField, Error> {
    let kind = Kind::from_i32(field.r#type.unwrap_or_default());
    let mut repeated = field.label() == Label::Repeated;

    let message = match kind {
        Kind::Message => {
            let message_type = message_types.get(field.type_name()).ok_or_else(|| {
                Error::UnresolvedType {
                    file: path.to_owned(),
                    field: field.name().to_owned(),
                    type_name: field.type_name().to_owned(),
                }
            })?;
            // Map fields are declared as repeated entries but are not lists.
            repeated &= !message_type.map_entry;
            Some(message_type.go_name.clone())
        }
        _ => None,
    };

    let json_name = field
        .json_name
        .clone()
        .unwrap_or_else(|| to_json_name(field.name()));

    Ok(SchemaField {
        go_name,
        kind,
        repeated,
        message,
        json_name,
    })
}
