use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::alphabet::{MachineLetter, TileMapping, BLANK, BLANK_TOKEN};
use crate::error::{LexiconError, Result};

/// One entry of a distribution file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterInfo {
    pub letter: char,
    pub count: u8,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub vowel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DistributionFile {
    name: String,
    letters: Vec<LetterInfo>,
}

/// How many physical tiles of each letter make up a full bag, together with
/// their scores. The order letters are listed in fixes their machine letters.
#[derive(Debug, Clone)]
pub struct LetterDistribution {
    name: String,
    mapping: TileMapping,
    /// Tile counts indexed by machine letter, blank at 0
    amts: Vec<u8>,
    values: Vec<i32>,
    vowels: Vec<bool>,
}

impl LetterDistribution {
    pub fn new(name: &str, letters: Vec<LetterInfo>) -> Result<Self> {
        let blank = letters.iter().find(|l| l.letter == BLANK_TOKEN);
        let mapping = TileMapping::from_letters(
            letters
                .iter()
                .filter(|l| l.letter != BLANK_TOKEN)
                .map(|l| l.letter),
        )?;

        let size = mapping.num_letters() + 1;
        let mut amts = vec![0; size];
        let mut values = vec![0; size];
        let mut vowels = vec![false; size];
        if let Some(b) = blank {
            amts[BLANK as usize] = b.count;
        }
        for info in letters.iter().filter(|l| l.letter != BLANK_TOKEN) {
            let ml = mapping.val(info.letter)? as usize;
            amts[ml] = info.count;
            values[ml] = info.score;
            vowels[ml] = info.vowel;
        }

        Ok(Self {
            name: name.to_string(),
            mapping,
            amts,
            values,
            vowels,
        })
    }

    /// Reads a distribution from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let raw: DistributionFile = serde_json::from_reader(BufReader::new(file))?;
        Self::new(&raw.name, raw.letters)
    }

    /// Looks up one of the built in distributions by (case insensitive) name
    pub fn builtin(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "english" => Ok(Self::english()),
            "spanish" => Ok(Self::spanish()),
            _ => Err(LexiconError::InvalidDistribution(format!(
                "no built in distribution named {}",
                name
            ))),
        }
    }

    pub fn english() -> Self {
        let alph = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        let amts = [
            9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
        ];
        let values = [
            1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
        ];
        Self::from_tables("english", alph, &amts, &values, "AEIOU", 2)
    }

    /// Spanish tiles. The digraphs CH, LL and RR are the single letters
    /// 1, 2 and 3.
    pub fn spanish() -> Self {
        let alph = "ABC1DEFGHIJL2MNÑOPQR3STUVXYZ";
        let amts = [
            12, 2, 4, 1, 5, 12, 1, 2, 2, 6, 1, 4, 1, 2, 5, 1, 9, 2, 1, 5, 1, 6, 4, 5, 1, 1, 1, 1,
        ];
        let values = [
            1, 3, 3, 5, 2, 1, 4, 2, 4, 1, 8, 1, 8, 3, 1, 8, 1, 3, 5, 1, 8, 1, 1, 1, 4, 8, 4, 10,
        ];
        Self::from_tables("spanish", alph, &amts, &values, "AEIOU", 2)
    }

    fn from_tables(
        name: &str,
        alph: &str,
        amts: &[u8],
        values: &[i32],
        vowels: &str,
        blanks: u8,
    ) -> Self {
        let mut letters = vec![LetterInfo {
            letter: BLANK_TOKEN,
            count: blanks,
            score: 0,
            vowel: false,
        }];
        for (i, c) in alph.chars().enumerate() {
            letters.push(LetterInfo {
                letter: c,
                count: amts[i],
                score: values[i],
                vowel: vowels.contains(c),
            });
        }
        // The tables above are fixed and well formed
        Self::new(name, letters).expect("built in distribution")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tile_mapping(&self) -> &TileMapping {
        &self.mapping
    }

    /// Number of tiles of the given letter in a full bag
    pub fn count(&self, ml: MachineLetter) -> u8 {
        self.amts.get(ml as usize).copied().unwrap_or(0)
    }

    pub fn score(&self, ml: MachineLetter) -> i32 {
        self.values.get(ml as usize).copied().unwrap_or(0)
    }

    pub fn is_vowel(&self, ml: MachineLetter) -> bool {
        self.vowels.get(ml as usize).copied().unwrap_or(false)
    }

    /// Largest count of any single letter, blank included
    pub fn max_frequency(&self) -> u8 {
        self.amts.iter().copied().max().unwrap_or(0)
    }

    pub fn total_tiles(&self) -> usize {
        self.amts.iter().map(|&c| c as usize).sum()
    }

    /// (machine letter, count) for every entry including the blank
    pub fn counts(&self) -> impl Iterator<Item = (MachineLetter, u8)> + '_ {
        self.amts
            .iter()
            .enumerate()
            .map(|(ml, &c)| (ml as MachineLetter, c))
    }
}
