//! `capnpc-parquet`: Cap'n Proto compiler plugin emitting Parquet schemas.
//!
//! Reads a `CodeGeneratorRequest` from stdin (or a file) and prints one
//! Parquet message schema per requested file to stdout.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use capnparquet_runtime::{InputFormat, RuntimeConfig, init_logging, render, run};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Request file; stdin when omitted
    input: Option<PathBuf>,

    /// Request encoding; inferred from the file extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Print the intermediate tree of every file to stderr
    #[arg(long)]
    dump_ast: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log: String,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

impl Cli {
    fn into_config(self) -> RuntimeConfig {
        let mut config = RuntimeConfig::new()
            .with_dump_ast(self.dump_ast)
            .with_log_filter(self.log)
            .with_indent_width(self.indent);
        if let Some(path) = self.input {
            config = config.with_path(path);
        }
        if let Some(format) = self.format {
            config = config.with_format(format);
        }
        config
    }
}

fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    match execute(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn execute(config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&config.log_filter)?;
    let schemas = run(config).map_err(|e| match &e.context {
        Some(context) => format!("{e} ({context})"),
        None => e.to_string(),
    })?;

    for schema in &schemas {
        if let Some(dump) = &schema.ast_dump {
            eprintln!("# {}\n{dump}", schema.filename);
        }
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(render(&schemas).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
