#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Missing data in stream while reading a tag")]
    EndOfInput,
    #[error("Missing \"{0}\" before end of stream")]
    Unterminated(String),
}

pub type Result<T> = std::result::Result<T, Error>;
