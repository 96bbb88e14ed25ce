use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read layout: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `disk <x> <y> <inner> <outer> <segments> <rings>`, got `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: a disk takes 6 values but {found} were given")]
    ArgCount { line: usize, found: usize },
    #[error("line {line}: `{value}` is not a valid number")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: {reason}")]
    Geometry { line: usize, reason: String },
}
