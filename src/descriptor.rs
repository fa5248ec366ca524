//! The resolved schema model handed to the code generator.
//!
//! Everything here is built once per invocation by [`crate::plugin::Plugin`] from the raw
//! descriptors in the request. Names are already Go identifiers; nothing downstream looks at a
//! `prost_types` descriptor again.

use prost_types::field_descriptor_proto::Type;

/// One input `.proto` file.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaFile {
    /// The file's path as given to protoc, e.g. `example/people.proto`.
    pub path: String,
    /// The Protobuf package, e.g. `example.people`. Empty when the file declares none.
    pub proto_package: String,
    /// The Go package name used in the `package` clause.
    pub go_package_name: String,
    /// Output path prefix, to which the suffix and `.go` extension are appended.
    pub generated_filename_prefix: String,
    /// Whether protoc asked for this file to be generated.
    pub generate: bool,
    pub enums: Vec<SchemaEnum>,
    pub messages: Vec<SchemaMessage>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaEnum {
    pub go_name: String,
    /// Values in declaration order; aliases (repeated numbers) are kept.
    pub values: Vec<SchemaEnumValue>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaEnumValue {
    pub go_name: String,
    pub number: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaMessage {
    pub go_name: String,
    /// Fields in declaration order, oneof members and proto3 optionals included.
    pub fields: Vec<SchemaField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaField {
    pub go_name: String,
    pub kind: Kind,
    /// Whether the field is a list. Map fields are not lists.
    pub repeated: bool,
    /// Go name of the referenced message, for [`Kind::Message`] fields.
    pub message: Option<String>,
    /// The name used for the field's JSON representation.
    pub json_name: String,
}

/// The wire kind of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int32,
    Sint32,
    Sfixed32,
    Int64,
    Sint64,
    Sfixed64,
    Uint32,
    Fixed32,
    Uint64,
    Fixed64,
    Bool,
    Float,
    Double,
    Bytes,
    Enum,
    Message,
    Group,
    /// A type number this generator does not know about.
    Unknown(i32),
}

impl Kind {
    /// Converts the raw `type` number of a `FieldDescriptorProto`.
    pub fn from_i32(value: i32) -> Kind {
        match Type::try_from(value) {
            Ok(ty) => Kind::from(ty),
            Err(_) => Kind::Unknown(value),
        }
    }
}

impl From<Type> for Kind {
    fn from(ty: Type) -> Kind {
        match ty {
            Type::String => Kind::String,
            Type::Int32 => Kind::Int32,
            Type::Sint32 => Kind::Sint32,
            Type::Sfixed32 => Kind::Sfixed32,
            Type::Int64 => Kind::Int64,
            Type::Sint64 => Kind::Sint64,
            Type::Sfixed64 => Kind::Sfixed64,
            Type::Uint32 => Kind::Uint32,
            Type::Fixed32 => Kind::Fixed32,
            Type::Uint64 => Kind::Uint64,
            Type::Fixed64 => Kind::Fixed64,
            Type::Bool => Kind::Bool,
            Type::Float => Kind::Float,
            Type::Double => Kind::Double,
            Type::Bytes => Kind::Bytes,
            Type::Enum => Kind::Enum,
            Type::Message => Kind::Message,
            Type::Group => Kind::Group,
        }
    }
}

/// A generated output file, ready to be handed back to protoc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}
