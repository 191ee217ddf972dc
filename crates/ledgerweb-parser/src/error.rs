//! Error types for ledgerweb-parser

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("empty entry block supplied to parser")]
    EmptyEntry,

    #[error("invalid header line in entry: {line:?}")]
    InvalidHeader { line: String },
}
