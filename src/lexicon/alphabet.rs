use std::collections::HashMap;

use crate::error::{LexiconError, Result};

/// Compact numeric code for a single tile. Zero is always the blank.
pub type MachineLetter = u8;

pub const BLANK: MachineLetter = 0;
pub const BLANK_TOKEN: char = '?';

/// Bidirectional mapping between the letters a human types and the machine
/// letters stored in the word graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMapping {
    /// Display letter for each code, index 0 being the blank token
    letters: Vec<char>,
    vals: HashMap<char, MachineLetter>,
}

impl TileMapping {
    /// Assigns codes 1, 2, ... to the letters in the order given. The blank
    /// token is code 0 and must not be part of `letters`.
    pub fn from_letters<I: IntoIterator<Item = char>>(letters: I) -> Result<Self> {
        let mut mapping = Self {
            letters: vec![BLANK_TOKEN],
            vals: HashMap::new(),
        };
        mapping.vals.insert(BLANK_TOKEN, BLANK);
        for c in letters {
            let c = to_upper(c);
            if mapping.vals.contains_key(&c) {
                return Err(LexiconError::InvalidDistribution(format!(
                    "letter {} listed twice",
                    c
                )));
            }
            if mapping.letters.len() > MachineLetter::MAX as usize {
                return Err(LexiconError::InvalidDistribution(
                    "alphabet too large".to_string(),
                ));
            }
            mapping.vals.insert(c, mapping.letters.len() as MachineLetter);
            mapping.letters.push(c);
        }
        Ok(mapping)
    }

    /// Number of real letters, not counting the blank
    pub fn num_letters(&self) -> usize {
        self.letters.len() - 1
    }

    pub fn val(&self, c: char) -> Result<MachineLetter> {
        self.vals
            .get(&to_upper(c))
            .copied()
            .ok_or_else(|| LexiconError::UnknownLetter(c.to_string()))
    }

    pub fn letter(&self, ml: MachineLetter) -> char {
        self.letters
            .get(ml as usize)
            .copied()
            .unwrap_or(BLANK_TOKEN)
    }

    pub fn to_machine_letters(&self, word: &str) -> Result<Vec<MachineLetter>> {
        word.chars().map(|c| self.val(c)).collect()
    }

    pub fn user_visible(&self, word: &[MachineLetter]) -> String {
        word.iter().map(|&ml| self.letter(ml)).collect()
    }
}

fn to_upper(c: char) -> char {
    // Only single code point upper case forms are letters of a mapping
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
