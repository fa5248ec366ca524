use std::io::{Error, ErrorKind, Read, Result, Write};

use log::debug;
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;

fn main() -> Result<()> {
    env_logger::init();

    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;

    let request = CodeGeneratorRequest::decode(&*buf).map_err(|error| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("invalid CodeGeneratorRequest: {}", error),
        )
    })?;
    debug!(
        "request: {} files to generate, parameter: {:?}",
        request.file_to_generate.len(),
        request.parameter()
    );

    let response = protoc_gen_flat::Config::new().run_plugin(request);

    let mut out = Vec::new();
    response.encode(&mut out).map_err(|error| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("invalid CodeGeneratorResponse: {}", error),
        )
    })?;
    std::io::stdout().write_all(&out)?;

    Ok(())
}
