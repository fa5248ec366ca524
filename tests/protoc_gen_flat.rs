//! Runs the plugin over wire-encoded requests, the way protoc drives it.

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileOptions,
};

use protoc_gen_flat::Config;

fn field(name: &str, number: i32, ty: Type, label: Label, json_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        json_name: Some(json_name.to_owned()),
        ..Default::default()
    }
}

fn shapes_proto() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("geo/shapes.proto".to_owned()),
        package: Some("geo".to_owned()),
        options: Some(FileOptions {
            go_package: Some("example.com/geo/shapes".to_owned()),
            ..Default::default()
        }),
        syntax: Some("proto3".to_owned()),
        enum_type: vec![EnumDescriptorProto {
            name: Some("Color".to_owned()),
            value: vec![
                EnumValueDescriptorProto {
                    name: Some("RED".to_owned()),
                    number: Some(0),
                    ..Default::default()
                },
                EnumValueDescriptorProto {
                    name: Some("GREEN".to_owned()),
                    number: Some(1),
                    ..Default::default()
                },
                EnumValueDescriptorProto {
                    name: Some("BLUE".to_owned()),
                    number: Some(5),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }],
        message_type: vec![
            DescriptorProto {
                name: Some("Point".to_owned()),
                field: vec![
                    field("x", 1, Type::Sint32, Label::Optional, "x"),
                    field("y", 2, Type::Sint32, Label::Optional, "y"),
                ],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Polygon".to_owned()),
                field: vec![
                    FieldDescriptorProto {
                        type_name: Some(".geo.Point".to_owned()),
                        ..field("vertices", 1, Type::Message, Label::Repeated, "vertices")
                    },
                    FieldDescriptorProto {
                        type_name: Some(".geo.Color".to_owned()),
                        ..field("fill_color", 2, Type::Enum, Label::Optional, "FILL")
                    },
                    field("label", 3, Type::String, Label::Optional, "label"),
                ],
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

/// Encodes the request, decodes it as the plugin binary does and runs the plugin.
fn run(parameter: Option<&str>, proto_file: Vec<FileDescriptorProto>) -> CodeGeneratorResponse {
    let request = CodeGeneratorRequest {
        file_to_generate: vec!["geo/shapes.proto".to_owned()],
        parameter: parameter.map(str::to_owned),
        proto_file,
        ..Default::default()
    };
    let bytes = request.encode_to_vec();

    let decoded = CodeGeneratorRequest::decode(bytes.as_slice()).unwrap();
    let response = Config::new().run_plugin(decoded);

    let bytes = response.encode_to_vec();
    CodeGeneratorResponse::decode(bytes.as_slice()).unwrap()
}

fn body_without_timestamp(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.starts_with("// source: "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn generates_flat_go_types() {
    let response = run(None, vec![shapes_proto()]);

    assert_eq!(None, response.error);
    assert_eq!(Some(1), response.supported_features);
    assert_eq!(1, response.file.len());

    let file = &response.file[0];
    assert_eq!("example.com/geo/shapes/shapes_flat.go", file.name());

    let content = file.content();
    assert!(content
        .starts_with("package shapes\n\n// Code generated by protoc-gen-flat. DO NOT EDIT.\n"));
    assert!(content.contains("// source: geo/shapes.proto (geo) "));
    assert!(content.contains(
        "const (\n\tColor_RED   = 0\n\tColor_GREEN = 1\n\tColor_BLUE  = 5\n)\n"
    ));
    assert!(content
        .contains("type Point struct {\n\tX int32 `json:\"x\"`\n\tY int32 `json:\"y\"`\n}\n"));
    assert!(content.contains(
        "type Polygon struct {\n\
         \tVertices  []Point `json:\"vertices\"`\n\
         \tFillColor int32   `json:\"FILL\"`\n\
         \tLabel     string  `json:\"label\"`\n\
         }\n"
    ));
    assert!(content.ends_with("}\n"));
}

#[test]
fn suffix_changes_only_the_file_name() {
    let flat = run(Some("paths=source_relative"), vec![shapes_proto()]);
    let custom = run(Some("paths=source_relative,suffix=.types"), vec![shapes_proto()]);

    assert_eq!("geo/shapes_flat.go", flat.file[0].name());
    assert_eq!("geo/shapes.types.go", custom.file[0].name());
    assert_eq!(
        body_without_timestamp(flat.file[0].content()),
        body_without_timestamp(custom.file[0].content())
    );
}

#[test]
fn invalid_parameter_fails_the_whole_request() {
    let response = run(Some("paths=absolute"), vec![shapes_proto()]);

    assert!(response.file.is_empty());
    assert_eq!(
        Some("unknown path type \"absolute\": want \"import\" or \"source_relative\""),
        response.error.as_deref()
    );
}
