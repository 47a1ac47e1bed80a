use std::cmp::Ordering;

use super::alphabet::{MachineLetter, TileMapping, BLANK};
use super::distribution::LetterDistribution;
use crate::error::Result;

/// Blanks go after every real letter, by convention
fn alphagram_order(a: &MachineLetter, b: &MachineLetter) -> Ordering {
    match (*a == BLANK, *b == BLANK) {
        (false, false) => a.cmp(b),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Sorts machine letters into alphagram order in place
pub fn sort_machine_letters(word: &mut [MachineLetter]) {
    word.sort_unstable_by(alphagram_order);
}

/// The canonical sorted form of `word`. Two words are anagrams exactly when
/// their alphagrams are equal.
pub fn canonicalize(word: &str, alph: &TileMapping) -> Result<String> {
    let mut mls = alph.to_machine_letters(word)?;
    sort_machine_letters(&mut mls);
    Ok(alph.user_visible(&mls))
}

/// Sum of the tile scores of every letter
pub fn point_value(alphagram: &str, dist: &LetterDistribution) -> Result<i32> {
    let mls = dist.tile_mapping().to_machine_letters(alphagram)?;
    Ok(mls.iter().map(|&ml| dist.score(ml)).sum())
}

pub fn num_vowels(alphagram: &str, dist: &LetterDistribution) -> Result<usize> {
    let mls = dist.tile_mapping().to_machine_letters(alphagram)?;
    Ok(mls.iter().filter(|&&ml| dist.is_vowel(ml)).count())
}
