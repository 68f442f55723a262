use schematic_schema::{Backend, JsonBackend, YamlBackend};

use crate::cmd::{load_shape, read_input, CheckArgs, Syntax};
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_reports, CheckReport, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let reports = match args.shape.syntax {
        Syntax::Json => check_all(&JsonBackend, &args)?,
        Syntax::Yaml => check_all(&YamlBackend, &args)?,
    };

    print_reports(&reports, format);

    if reports.iter().all(|report| report.valid) {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

fn check_all<B: Backend>(backend: &B, args: &CheckArgs) -> CliResult<Vec<CheckReport>> {
    let shape = load_shape(backend, &args.shape.shape)?;
    let config = args.config();

    let mut reports = Vec::with_capacity(args.payloads.len());
    for path in &args.payloads {
        let source = path.display().to_string();
        let raw = read_input(path)?;

        let report = match shape.validate_bytes(backend, &raw, &config) {
            Ok(()) => {
                tracing::debug!(%source, "payload accepted");
                CheckReport::accepted(source)
            }
            Err(err) => {
                tracing::info!(%source, error = %err, "payload rejected");
                CheckReport::rejected(source, err.to_string())
            }
        };
        reports.push(report);
    }

    Ok(reports)
}
