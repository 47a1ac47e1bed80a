use super::alphabet::{MachineLetter, BLANK};
use super::binomial::BinomialTable;
use super::distribution::LetterDistribution;
use crate::error::{LexiconError, Result};

/// Number of distinct draws from a full bag that produce `alphagram`,
/// counting the draws where one or two blanks stand in for letters of it
/// when `with_blanks` is set.
///
/// Letters missing from the distribution (or present with zero tiles) are an
/// error, never a zero count.
pub fn combinations(
    alphagram: &str,
    dist: &LetterDistribution,
    table: &BinomialTable,
    with_blanks: bool,
) -> Result<u64> {
    let mapping = dist.tile_mapping();
    let mut letters: Vec<MachineLetter> = Vec::new();
    let mut counts: Vec<u8> = Vec::new();
    let mut amts: Vec<u8> = Vec::new();

    for c in alphagram.chars() {
        let ml = mapping
            .val(c)
            .map_err(|_| LexiconError::UnsupportedLetter(c.to_string()))?;
        let amt = dist.count(ml);
        if amt == 0 {
            return Err(LexiconError::UnsupportedLetter(c.to_string()));
        }
        match letters.iter().position(|&l| l == ml) {
            Some(j) => counts[j] = counts[j].saturating_add(1),
            None => {
                letters.push(ml);
                counts.push(1);
                amts.push(amt);
            }
        }
    }

    let product = |counts: &[u8]| -> u64 {
        counts
            .iter()
            .zip(amts.iter())
            .map(|(&c, &amt)| table.choose(amt, c))
            .product()
    };

    // No blanks
    let mut total = product(&counts);
    if !with_blanks {
        return Ok(total);
    }

    let blanks = dist.count(BLANK);
    let n = letters.len();

    // One blank standing in for one copy of letter i
    let one_blank = table.choose(blanks, 1);
    for i in 0..n {
        counts[i] -= 1;
        total += one_blank * product(&counts);
        counts[i] += 1;
    }

    // Two blanks, for letters i and j (possibly the same letter twice)
    let two_blanks = table.choose(blanks, 2);
    for i in 0..n {
        counts[i] -= 1;
        for j in i..n {
            if counts[j] == 0 {
                continue;
            }
            counts[j] -= 1;
            total += two_blanks * product(&counts);
            counts[j] += 1;
        }
        counts[i] += 1;
    }

    Ok(total)
}

/// A distribution paired with its binomial table, shared read-only by every
/// caller that ranks alphagrams.
#[derive(Debug, Clone)]
pub struct Combinator {
    dist: LetterDistribution,
    table: BinomialTable,
}

impl Combinator {
    pub fn new(dist: LetterDistribution) -> Self {
        let table = BinomialTable::for_distribution(&dist);
        Self { dist, table }
    }

    pub fn distribution(&self) -> &LetterDistribution {
        &self.dist
    }

    pub fn table(&self) -> &BinomialTable {
        &self.table
    }

    pub fn combinations(&self, alphagram: &str, with_blanks: bool) -> Result<u64> {
        combinations(alphagram, &self.dist, &self.table, with_blanks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH_FIXTURES: [(&str, u64); 8] = [
        ("AADEEEILMNORSTU", 640342278144),
        ("AAJQQ", 153),
        ("ACEIORT", 2323512),
        ("MMSUUUU", 120),
        ("AIJNORT", 817236),
        ("AEFFGINR", 1077300),
        ("ADEINOPRTTVZ", 860575104),
        ("ABEIPRSTZ", 5669136),
    ];

    #[test]
    fn test_english_combinations() {
        let combinator = Combinator::new(LetterDistribution::english());
        for (alphagram, expected) in ENGLISH_FIXTURES.iter() {
            assert_eq!(
                combinator.combinations(alphagram, true).unwrap(),
                *expected,
                "combinations for {}",
                alphagram
            );
        }
    }

    #[test]
    fn test_spanish_runes() {
        // Not an alphagram, checks multi byte letters and digraph tiles
        let combinator = Combinator::new(LetterDistribution::spanish());
        assert_eq!(combinator.combinations("OOÑ22", true).unwrap(), 153);
    }

    #[test]
    fn test_without_blanks() {
        let combinator = Combinator::new(LetterDistribution::english());
        // C(9,2) * C(2,1) * C(4,1)
        assert_eq!(combinator.combinations("AABD", false).unwrap(), 36 * 2 * 4);
        assert_eq!(combinator.combinations("AAJQQ", false).unwrap(), 0);
    }

    #[test]
    fn test_blanks_never_decrease() {
        let combinator = Combinator::new(LetterDistribution::english());
        for (alphagram, _) in ENGLISH_FIXTURES.iter() {
            let without = combinator.combinations(alphagram, false).unwrap();
            let with = combinator.combinations(alphagram, true).unwrap();
            assert!(with >= without);
        }
    }

    #[test]
    fn test_empty_alphagram() {
        let combinator = Combinator::new(LetterDistribution::english());
        assert_eq!(combinator.combinations("", true).unwrap(), 1);
        assert_eq!(combinator.combinations("", false).unwrap(), 1);
    }

    #[test]
    fn test_more_copies_than_tiles() {
        let combinator = Combinator::new(LetterDistribution::english());
        // Fourteen E's only come out of the bag with both blanks
        assert_eq!(combinator.combinations("EEEEEEEEEEEEEE", false).unwrap(), 0);
        assert_eq!(combinator.combinations("EEEEEEEEEEEEEE", true).unwrap(), 1);
    }

    #[test]
    fn test_unsupported_letter() {
        let combinator = Combinator::new(LetterDistribution::spanish());
        match combinator.combinations("KERYGMA", true) {
            Err(LexiconError::UnsupportedLetter(l)) => assert_eq!(l, "K"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
