use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use matnet_frame::Input;

use crate::exit::{io_error, CliError, CliResult, DATA_INVALID};

/// How captured bytes are handed to the decoder.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputMode {
    /// JSON if the bytes are UTF-8 text starting with `{`, binary otherwise.
    #[default]
    Auto,
    Binary,
    Text,
}

/// A captured frame file, or stdin when the path is `-`.
#[derive(Debug, Clone)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    pub fn read(&self) -> CliResult<Vec<u8>> {
        match self {
            Self::Stdin => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .map_err(|err| io_error("failed reading stdin", err))?;
                Ok(buf)
            }
            Self::File(path) => std::fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Pick the decoder input for captured bytes.
pub fn classify(bytes: &[u8], mode: InputMode) -> CliResult<Input<'_>> {
    match mode {
        InputMode::Binary => Ok(Input::Binary(bytes)),
        InputMode::Text => std::str::from_utf8(bytes)
            .map(Input::Text)
            .map_err(|err| CliError::new(DATA_INVALID, format!("input is not UTF-8: {err}"))),
        InputMode::Auto => match std::str::from_utf8(bytes) {
            Ok(text) if text.trim_start().starts_with('{') => Ok(Input::Text(text)),
            _ => Ok(Input::Binary(bytes)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_detects_json_text() {
        let input = classify(b"  {\"ID\":\"START\"}", InputMode::Auto).unwrap();
        assert!(matches!(input, Input::Text(_)));
    }

    #[test]
    fn auto_falls_back_to_binary() {
        let frame = [0u8, 0, 0, 0, 3, 0, 0, 0, b'A', 0x1e, b'x'];
        assert!(matches!(
            classify(&frame, InputMode::Auto).unwrap(),
            Input::Binary(_)
        ));
        assert!(matches!(
            classify(&[0xff, b'{'], InputMode::Auto).unwrap(),
            Input::Binary(_)
        ));
    }

    #[test]
    fn forced_modes() {
        assert!(matches!(
            classify(b"{}", InputMode::Binary).unwrap(),
            Input::Binary(_)
        ));
        assert!(matches!(
            classify(b"plain", InputMode::Text).unwrap(),
            Input::Text("plain")
        ));
        let err = classify(&[0xff], InputMode::Text).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn dash_means_stdin() {
        assert!(matches!(Source::from_path(Path::new("-")), Source::Stdin));
        let file = Source::from_path(Path::new("capture.bin"));
        assert_eq!(file.to_string(), "capture.bin");
    }
}
