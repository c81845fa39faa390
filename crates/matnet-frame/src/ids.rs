//! Message IDs observed from MatNet devices.
//!
//! The set is open-ended; the decoder never validates an ID against it.

/// Bulk numeric outputs (binary frame).
pub const BINARY_DATA: &str = "BINARY_DATA";

/// Outputs requested in JSON form.
pub const JSON_DATA: &str = "JSON_DATA";

/// Configuration parameters.
pub const SET_PARAMS: &str = "SET_PARAMS";

/// Selection of per-frame outputs.
pub const SET_OUTPUTS: &str = "SET_OUTPUTS";

/// Engine start.
pub const START: &str = "START";

/// Engine status.
pub const GET_STATUS: &str = "GET_STATUS";

/// Query acknowledgement.
pub const QUERY: &str = "QUERY";

/// Command acknowledgement.
pub const COMMAND: &str = "COMMAND";

const KNOWN_IDS: [&str; 8] = [
    BINARY_DATA,
    JSON_DATA,
    SET_PARAMS,
    SET_OUTPUTS,
    START,
    GET_STATUS,
    QUERY,
    COMMAND,
];

/// Returns true if the ID is one of the IDs listed above.
pub fn is_known_id(id: &str) -> bool {
    KNOWN_IDS.contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_ids() {
        assert!(is_known_id(BINARY_DATA));
        assert!(is_known_id("GET_STATUS"));
        assert!(!is_known_id("binary_data"));
        assert!(!is_known_id("CUSTOM"));
    }
}
