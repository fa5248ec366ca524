use crate::descriptor::Kind;

/// The type emitted for kinds without a Go counterpart.
pub const UNTYPED: &str = "interface{}";

/// Maps a field's wire kind to its Go type.
///
/// `message` is the Go name of the referenced message and is only consulted for
/// [`Kind::Message`]. Enum fields become plain `int32`; the enum's own named type is not used.
/// Groups become an empty struct and their fields are never emitted. Repeated fields wrap the
/// element type in a slice.
///
/// The mapping is total: unknown kinds, or a message kind without a message, fall back to
/// [`UNTYPED`].
pub fn go_type(kind: Kind, message: Option<&str>, repeated: bool) -> String {
    let element = match kind {
        Kind::String => "string",
        Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => "int32",
        Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => "int64",
        Kind::Uint32 | Kind::Fixed32 => "uint32",
        Kind::Uint64 | Kind::Fixed64 => "uint64",
        Kind::Bool => "bool",
        Kind::Float => "float32",
        Kind::Double => "float64",
        Kind::Bytes => "[]byte",
        Kind::Enum => "int32",
        Kind::Message => message.unwrap_or(UNTYPED),
        Kind::Group => "struct{}",
        Kind::Unknown(_) => UNTYPED,
    };

    if repeated {
        format!("[]{}", element)
    } else {
        element.to_owned()
    }
}
