use std::fmt;

use super::alphabet::MachineLetter;

/// Set of machine letters, one bit per code
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    // bit is one if letter is in it
    accepted: [u128; 2],
}

impl LetterSet {
    pub fn empty() -> Self {
        Self { accepted: [0; 2] }
    }

    pub fn contains(&self, letter: MachineLetter) -> bool {
        let i = letter as usize;
        (self.accepted[i / 128] & (1 << (i % 128))) != 0
    }

    pub fn insert(&mut self, letter: MachineLetter) {
        let i = letter as usize;
        self.accepted[i / 128] |= 1 << (i % 128)
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.iter().all(|&l| l == 0)
    }

    pub fn len(&self) -> usize {
        self.accepted.iter().map(|l| l.count_ones() as usize).sum()
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = MachineLetter> + '_ {
        (0..=MachineLetter::MAX).filter(move |&l| self.contains(l))
    }
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::FromIterator<MachineLetter> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = MachineLetter>,
    {
        let mut tmp = Self::default();
        iter.into_iter().for_each(|l| tmp.insert(l));
        tmp
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
