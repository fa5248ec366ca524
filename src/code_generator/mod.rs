use log::debug;
use prost_types::Timestamp;

use crate::descriptor::{GeneratedFile, SchemaFile};

mod enums;
mod messages;

/// Extension of every generated file.
const EXTENSION: &str = "go";

/// Renders one `.proto` file as a Go source file of flattened types.
pub struct CodeGenerator<'a> {
    buf: &'a mut String,
}

impl<'a> CodeGenerator<'a> {
    /// Generates the companion file for `file`.
    ///
    /// The output is named `<prefix><suffix>.go`. `generated_at` is written into the provenance
    /// header; it is the only part of the body that is not a function of `file`.
    pub fn generate(file: &SchemaFile, suffix: &str, generated_at: &Timestamp) -> GeneratedFile {
        debug!(
            "file: {:?}, package: {:?}, go package: {:?}",
            file.path, file.proto_package, file.go_package_name
        );

        let mut buf = String::new();
        let mut code_gen = CodeGenerator { buf: &mut buf };

        code_gen.push_header(file, generated_at);
        code_gen.push_enums(&file.enums);
        code_gen.push_messages(&file.messages);
        code_gen.finish();

        GeneratedFile {
            name: format!("{}{}.{}", file.generated_filename_prefix, suffix, EXTENSION),
            content: buf,
        }
    }

    fn push_header(&mut self, file: &SchemaFile, generated_at: &Timestamp) {
        self.buf.push_str("package ");
        self.buf.push_str(&file.go_package_name);
        self.buf.push_str("\n\n");

        self.buf.push_str("// Code generated by protoc-gen-flat. DO NOT EDIT.\n");
        self.buf.push_str(&format!(
            "// source: {} ({}) {}\n",
            file.path, file.proto_package, generated_at
        ));
        self.buf.push('\n');
    }

    /// Writes rows of cells inside a `(...)` or `{...}` block, one tab deep, with every column
    /// but the last padded to its widest cell plus one space.
    fn push_columns(&mut self, rows: &[Vec<String>]) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|column| {
                rows.iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in rows {
            self.buf.push('\t');
            for (column, cell) in row.iter().enumerate() {
                self.buf.push_str(cell);
                if column + 1 < row.len() {
                    let padding = widths[column] - cell.chars().count() + 1;
                    self.buf.extend(std::iter::repeat(' ').take(padding));
                }
            }
            self.buf.push('\n');
        }
    }

    /// Leaves exactly one trailing newline.
    fn finish(&mut self) {
        let len = self.buf.trim_end_matches('\n').len();
        self.buf.truncate(len);
        self.buf.push('\n');
    }
}
