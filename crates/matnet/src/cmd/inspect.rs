use crate::cmd::decode::decode_source;
use crate::cmd::InspectArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_summary, FieldSummary, OutputFormat};
use crate::source::Source;

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let source = Source::from_path(&args.path);
    let (message, frame_bytes) = decode_source(&args.limits.decoder(), &source, args.mode)?;

    let fields: Vec<FieldSummary> = message
        .payload
        .iter()
        .map(|(name, value)| FieldSummary::new(name, value))
        .collect();

    print_summary(&message, &source.to_string(), frame_bytes, &fields, format);
    Ok(SUCCESS)
}
