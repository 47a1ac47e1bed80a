pub mod config;
pub mod error;
pub mod lexicon;
pub mod utils;

pub use config::Config;
pub use error::{LexiconError, Result};
pub use lexicon::anagram::Mode;
pub use lexicon::cache::LexiconCache;
pub use lexicon::Lexicon;
