use matnet_frame::{Decoder, Message};

use crate::cmd::DecodeArgs;
use crate::exit::{decode_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_message, OutputFormat};
use crate::source::{classify, InputMode, Source};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let decoder = args.limits.decoder();
    let mut failed = 0usize;

    for path in &args.paths {
        let source = Source::from_path(path);
        let label = source.to_string();

        match decode_source(&decoder, &source, args.mode) {
            Ok((message, _)) => print_message(&message, &label, format),
            Err(err) if args.keep_going => {
                tracing::warn!(source = %label, error = %err, "dropping undecodable frame");
                failed = failed.saturating_add(1);
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        tracing::info!(failed, total = args.paths.len(), "finished with failures");
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}

pub(crate) fn decode_source(
    decoder: &Decoder,
    source: &Source,
    mode: InputMode,
) -> CliResult<(Message, usize)> {
    let bytes = source.read()?;
    let input = classify(&bytes, mode)?;
    let message = decoder
        .decode(input)
        .map_err(|err| decode_error(&source.to_string(), err))?;
    tracing::debug!(source = %source, id = %message.id, bytes = bytes.len(), "decoded message");
    Ok((message, bytes.len()))
}
