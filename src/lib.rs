#![doc(html_root_url = "https://docs.rs/protoc-gen-flat/0.1.0")]

//! `protoc-gen-flat` is a `protoc` plugin which emits plain Go data types for the messages and
//! enums of `.proto` files.
//!
//! For every `.proto` file protoc asks it to generate, the plugin writes one Go file containing
//! a struct per top-level message and an `int32` constant group per top-level enum. Fields carry
//! `json` struct tags holding the field's JSON name, so the types can be used with
//! `encoding/json` without depending on any Protobuf runtime.
//!
//! ## Example
//!
//! Given `people.proto`:
//!
//! ```proto
//! syntax = "proto3";
//!
//! package example.people;
//!
//! option go_package = "example.com/people;peoplepb";
//!
//! enum Color {
//!   RED = 0;
//!   GREEN = 1;
//!   BLUE = 5;
//! }
//!
//! message Person {
//!   string name = 1;
//!   repeated int32 tags = 2;
//! }
//! ```
//!
//! running
//!
//! ```bash
//! $ protoc --flat_out=. --flat_opt=paths=source_relative people.proto
//! ```
//!
//! writes `people_flat.go`:
//!
//! ```go
//! package peoplepb
//!
//! // Code generated by protoc-gen-flat. DO NOT EDIT.
//! // source: people.proto (example.people) 2024-05-01T12:00:00Z
//!
//! // Color represents the enum values for Color.
//! type Color int32
//! const (
//! 	Color_RED   = 0
//! 	Color_GREEN = 1
//! 	Color_BLUE  = 5
//! )
//!
//! type Person struct {
//! 	Name string  `json:"name"`
//! 	Tags []int32 `json:"tags"`
//! }
//! ```
//!
//! ## Options
//!
//! The only generator option is `suffix` (default `_flat`), the string placed between the
//! file's base name and the `.go` extension, e.g. `--flat_opt=suffix=.flat`. The runtime
//! options `paths=import|source_relative`, `module=<prefix>` and `M<file>=<import path>` work
//! as they do for other Go plugins. Unrecognized options are ignored.
//!
//! The provenance header embeds the time of generation, so output differs between runs on
//! identical input.

mod code_generator;
mod descriptor;
mod error;
mod go_type;
mod ident;
mod plugin;

use std::time::SystemTime;

use log::debug;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::Timestamp;

pub use crate::code_generator::CodeGenerator;
pub use crate::descriptor::{
    GeneratedFile, Kind, SchemaEnum, SchemaEnumValue, SchemaField, SchemaFile, SchemaMessage,
};
pub use crate::error::Error;
pub use crate::go_type::go_type;
pub use crate::plugin::{parameters, PathType, Plugin};

/// The default output file name suffix.
pub const DEFAULT_SUFFIX: &str = "_flat";

/// Configuration options for flat code generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    suffix: String,
}

impl Config {
    /// Creates a new code generator configuration with default options.
    pub fn new() -> Config {
        Config::default()
    }

    /// Configures the string appended to each output file's base name, before the `.go`
    /// extension.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # let mut config = protoc_gen_flat::Config::new();
    /// // `people.proto` generates `people.flat.go`.
    /// config.suffix(".flat");
    /// ```
    pub fn suffix<S>(&mut self, suffix: S) -> &mut Self
    where
        S: Into<String>,
    {
        self.suffix = suffix.into();
        self
    }

    /// Applies one `key=value` plugin option.
    ///
    /// `suffix` is the only recognized key; anything else is accepted without effect.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "suffix" => {
                self.suffix(value);
            }
            _ => debug!("ignoring unknown option {:?}={:?}", key, value),
        }
        Ok(())
    }

    /// Generates a Go file for every schema file marked for generation.
    ///
    /// `generated_at` is embedded in each provenance header.
    pub fn generate(&self, files: &[SchemaFile], generated_at: &Timestamp) -> Vec<GeneratedFile> {
        files
            .iter()
            .filter(|file| file.generate)
            .map(|file| CodeGenerator::generate(file, &self.suffix, generated_at))
            .collect()
    }

    /// Runs the plugin over a request from protoc.
    ///
    /// Options in the request's parameter string apply to this request only, on top of this
    /// configuration. Any error is reported through the response's `error` field, in which case
    /// the response contains no files at all.
    pub fn run_plugin(&self, request: CodeGeneratorRequest) -> CodeGeneratorResponse {
        let generated_at = now();
        self.compile_request(&request, &generated_at)
            .unwrap_or_else(|error| plugin::error_response(&error))
    }

    fn compile_request(
        &self,
        request: &CodeGeneratorRequest,
        generated_at: &Timestamp,
    ) -> Result<CodeGeneratorResponse, Error> {
        let mut config = self.clone();
        let plugin = Plugin::new(request, |key, value| config.set(key, value))?;
        let files = config.generate(&plugin.files, generated_at);
        plugin.response(files)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            suffix: DEFAULT_SUFFIX.to_owned(),
        }
    }
}

/// The current time, truncated to whole seconds.
fn now() -> Timestamp {
    let mut timestamp = Timestamp::from(SystemTime::now());
    timestamp.nanos = 0;
    timestamp
}
