use matnet_frame::{
    DEFAULT_MAX_DIMS, DEFAULT_MAX_FIELD_BYTES, DEFAULT_MAX_FRAME_SIZE, ELEMENT_TYPES,
};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("matnet {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: matnet");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("MATNET_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("MATNET_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));

    let types: Vec<String> = ELEMENT_TYPES
        .iter()
        .map(|ty| format!("{}={}", ty.tag(), ty))
        .collect();
    println!("element_types: {}", types.join(", "));
    println!("default_max_field_bytes: {DEFAULT_MAX_FIELD_BYTES}");
    println!("default_max_frame_size: {DEFAULT_MAX_FRAME_SIZE}");
    println!("default_max_dims: {DEFAULT_MAX_DIMS}");

    Ok(SUCCESS)
}
