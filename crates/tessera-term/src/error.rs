// SPDX-License-Identifier: MIT
//
// Error type for failures that come from outside the program: the output
// backend, the input source, and untrusted scrambled data. Misuse of the
// API (bad sizes, unknown aliases) panics instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scrambled text is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("unscrambled text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("input source disconnected")]
    SourceClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        fn fails() -> Result<()> {
            Err(std::io::Error::other("pipe closed"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: pipe closed");
    }

    #[test]
    fn source_closed_message() {
        assert_eq!(Error::SourceClosed.to_string(), "input source disconnected");
    }
}
