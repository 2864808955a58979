//! Standalone layout engine process.
//!
//! Reads one JSON request from stdin, writes one JSON response to
//! stdout, and exits 1 when the request could not be handled.
//!
//! Usage:
//!   echo '{"habitat": {"crew_size": 6}}' | habitat-native

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};

use habitat_cli::logging::init_tracing;
use habitat_cli::native::handle_request;

fn main() -> Result<ExitCode> {
    init_tracing("info", false);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;

    let (response, ok) = handle_request(&input);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
