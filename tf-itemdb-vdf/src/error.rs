/// Errors that can occur while decoding KeyValues text.
///
/// Line numbers refer to the normalized text, which keeps the line structure
/// of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("No key-value tokens found in input")]
    Empty,

    #[error("Closing bracket `}}` on line {line} is not inside an object")]
    UnexpectedClose { line: usize },

    #[error("Opening bracket `{{` on line {line} has no preceding key")]
    OpenWithoutKey { line: usize },
}
