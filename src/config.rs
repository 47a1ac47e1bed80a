use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};
use crate::lexicon::distribution::LetterDistribution;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub name: String,
    pub distribution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one `<NAME>.txt` word list per lexicon
    pub lexicon_path: PathBuf,
    /// Directory of `<name>.json` letter distributions, consulted before the
    /// built in ones
    pub distribution_path: Option<PathBuf>,
    pub default_lexicon: String,
    pub lexica: Vec<LexiconEntry>,
    pub max_blanks: usize,
    pub challenge_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from("lexica"),
            distribution_path: None,
            default_lexicon: "NWL2023".to_string(),
            lexica: Vec::new(),
            max_blanks: 8,
            challenge_timeout_ms: 5000,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn word_list_path(&self, lexicon: &str) -> PathBuf {
        self.lexicon_path.join(format!("{}.txt", lexicon))
    }

    /// Name of the letter distribution `lexicon` is played with. Lexica
    /// missing from the config are assumed English unless they are one of
    /// the Spanish FISE lists.
    pub fn distribution_name(&self, lexicon: &str) -> String {
        if let Some(entry) = self.lexica.iter().find(|e| e.name == lexicon) {
            return entry.distribution.clone();
        }
        if lexicon.to_uppercase().starts_with("FISE") {
            "spanish".to_string()
        } else {
            "english".to_string()
        }
    }

    pub fn distribution(&self, lexicon: &str) -> Result<LetterDistribution> {
        let name = self.distribution_name(lexicon);
        if let Some(dir) = &self.distribution_path {
            let path = dir.join(format!("{}.json", name));
            if path.exists() {
                debug!("Reading distribution {} from {}", name, path.display());
                return LetterDistribution::from_file(path);
            }
        }
        LetterDistribution::builtin(&name)
    }

    /// Fails with `LexiconNotFound` when there is no word list for `lexicon`
    pub fn check_lexicon(&self, lexicon: &str) -> Result<PathBuf> {
        let path = self.word_list_path(lexicon);
        if path.is_file() {
            Ok(path)
        } else {
            Err(LexiconError::LexiconNotFound(lexicon.to_string()))
        }
    }
}
