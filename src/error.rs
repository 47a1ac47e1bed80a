use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexiconError>;

#[derive(Debug, Error)]
pub enum LexiconError {
    /// Unbalanced or nested brackets in a rack query
    #[error("badly formed search string: {0}")]
    MalformedQuery(String),
    /// A character the alphabet cannot translate
    #[error("unknown letter {0:?}")]
    UnknownLetter(String),
    /// An alphagram letter that has no tiles in the letter distribution
    #[error("letter {0:?} is not part of the letter distribution")]
    UnsupportedLetter(String),
    #[error("query too complex: {blanks} blanks (max {max})")]
    QueryTooComplex { blanks: usize, max: usize },
    #[error("lexicon {0} not found")]
    LexiconNotFound(String),
    #[error("invalid letter distribution: {0}")]
    InvalidDistribution(String),
    #[error("could not generate before deadline ({tries} tries)")]
    DeadlineExceeded { tries: usize },
    #[error("could not build word graph")]
    UnsortedInput(#[from] fst::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Serialization(#[from] bincode::Error),
}
