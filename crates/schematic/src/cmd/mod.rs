use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use schematic_schema::{Backend, DecoderConfig, NumberTags, SequencePolicy, ShapeSchema};

use crate::exit::{io_error, schema_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod export;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check payload files against a shape document.
    Check(CheckArgs),
    /// Print the JSON Schema equivalent of a shape document.
    Export(ExportArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Export(args) => export::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Serialization syntax of shape and payload documents.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum Syntax {
    #[default]
    Json,
    Yaml,
}

#[derive(Args, Debug)]
pub struct ShapeArgs {
    /// Example document defining the accepted shape.
    #[arg(long, value_name = "FILE")]
    pub shape: PathBuf,
    /// Document syntax for the shape and payloads.
    #[arg(long, value_name = "SYNTAX", default_value = "json")]
    pub syntax: Syntax,
    /// Treat integers and floats as distinct types.
    #[arg(long)]
    pub split_numbers: bool,
}

impl ShapeArgs {
    pub fn config(&self) -> DecoderConfig {
        DecoderConfig {
            number_tags: if self.split_numbers {
                NumberTags::Split
            } else {
                NumberTags::Coarse
            },
            ..DecoderConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,
    /// Require every array element to match the shape of the first.
    #[arg(long)]
    pub homogeneous_arrays: bool,
    /// Maximum payload size in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_payload_size: Option<usize>,
    /// Payload files to check ("-" reads stdin).
    #[arg(required = true, value_name = "PAYLOAD")]
    pub payloads: Vec<PathBuf>,
}

impl CheckArgs {
    pub fn config(&self) -> DecoderConfig {
        let mut config = self.shape.config();
        if self.homogeneous_arrays {
            config.sequences = SequencePolicy::Homogeneous;
        }
        if let Some(max) = self.max_payload_size {
            config.max_payload_size = max;
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Read a whole input, treating "-" as stdin.
pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return Ok(buf);
    }

    fs::read(path).map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}

/// Load a shape document with `backend`.
pub fn load_shape<B: Backend>(backend: &B, path: &Path) -> CliResult<ShapeSchema> {
    let raw = read_input(path)?;
    let shape = ShapeSchema::from_reader(backend, raw.as_slice())
        .map_err(|err| schema_error(&format!("invalid shape {}", path.display()), err))?;
    tracing::debug!(path = %path.display(), fields = shape.len(), "loaded shape");
    Ok(shape)
}
