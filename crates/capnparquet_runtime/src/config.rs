//! Configuration for a conversion run.

use std::path::{Path, PathBuf};

use capnparquet_parquet::PrintConfig;
use clap::ValueEnum;

/// Where the request is read from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Standard input, as when invoked by the schema compiler.
    #[default]
    Stdin,
    /// A file on disk.
    Path(PathBuf),
}

/// Encoding of the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// `MessagePack` with named fields.
    #[default]
    #[value(name = "msgpack")]
    MessagePack,
    /// JSON.
    Json,
}

impl InputFormat {
    /// Guesses the format from a file extension. Anything but `.json` is `MessagePack`.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::MessagePack,
        }
    }
}

/// Configuration for a conversion run.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Request source.
    pub input: InputSource,

    /// Request encoding.
    pub format: InputFormat,

    /// Render the intermediate tree of every file alongside its schema.
    pub dump_ast: bool,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Schema printer settings.
    pub print: PrintConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            input: InputSource::Stdin,
            format: InputFormat::MessagePack,
            dump_ast: false,
            log_filter: "warn".to_owned(),
            print: PrintConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to read the request from a file.
    ///
    /// The format is inferred from the extension; call
    /// [`with_format`](Self::with_format) afterwards to override it.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.format = InputFormat::from_path(&path);
        self.input = InputSource::Path(path);
        self
    }

    /// Builder method to set the input source.
    #[must_use]
    pub fn with_input(mut self, input: InputSource) -> Self {
        self.input = input;
        self
    }

    /// Builder method to set the input format.
    #[must_use]
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method to enable/disable AST dumps.
    #[must_use]
    pub fn with_dump_ast(mut self, dump: bool) -> Self {
        self.dump_ast = dump;
        self
    }

    /// Builder method to set the default log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Builder method to set the indentation width of printed schemas.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.print.indent_width = width;
        self
    }
}
