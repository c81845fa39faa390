use clap::{Args, Subcommand};
use std::path::PathBuf;

use matnet_frame::{
    Decoder, DecoderConfig, DEFAULT_MAX_DIMS, DEFAULT_MAX_FIELD_BYTES, DEFAULT_MAX_FRAME_SIZE,
};

use crate::exit::CliResult;
use crate::output::OutputFormat;
use crate::source::InputMode;

pub mod decode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode captured frames and print the messages.
    Decode(DecodeArgs),
    /// Print the field layout of a captured frame.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Decoder limits shared by the decoding commands.
#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Maximum element data per field in bytes.
    #[arg(long, env = "MATNET_MAX_FIELD_BYTES", default_value_t = DEFAULT_MAX_FIELD_BYTES)]
    pub max_field_bytes: usize,
    /// Maximum binary frame size in bytes.
    #[arg(long, env = "MATNET_MAX_FRAME_SIZE", default_value_t = DEFAULT_MAX_FRAME_SIZE)]
    pub max_frame_size: usize,
    /// Maximum dimensions per field.
    #[arg(long, env = "MATNET_MAX_DIMS", default_value_t = DEFAULT_MAX_DIMS)]
    pub max_dims: usize,
}

impl LimitArgs {
    pub fn decoder(&self) -> Decoder {
        Decoder::with_config(DecoderConfig {
            max_field_bytes: self.max_field_bytes,
            max_frame_size: self.max_frame_size,
            max_dims: self.max_dims,
        })
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Captured frame files (`-` reads stdin).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// How to interpret each input.
    #[arg(long, value_enum, default_value_t = InputMode::Auto)]
    pub mode: InputMode,
    /// Log undecodable frames and continue with the next input.
    #[arg(long)]
    pub keep_going: bool,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Captured frame file (`-` reads stdin).
    pub path: PathBuf,
    /// How to interpret the input.
    #[arg(long, value_enum, default_value_t = InputMode::Auto)]
    pub mode: InputMode,
    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
