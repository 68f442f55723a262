use schematic_schema::{JsonBackend, YamlBackend};

use crate::cmd::{load_shape, ExportArgs, Syntax};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_document, OutputFormat};

pub fn run(args: ExportArgs, format: OutputFormat) -> CliResult<i32> {
    let shape = match args.shape.syntax {
        Syntax::Json => load_shape(&JsonBackend, &args.shape.shape)?,
        Syntax::Yaml => load_shape(&YamlBackend, &args.shape.shape)?,
    };

    print_document(&shape.to_json_schema(&args.shape.config()), format);
    Ok(SUCCESS)
}
