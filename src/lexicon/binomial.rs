use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::distribution::LetterDistribution;

/// Precomputed "n choose k" for every n, k up to the largest single letter
/// count of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialTable {
    combos: Array2<u64>,
}

impl BinomialTable {
    pub fn new(max_frequency: u8) -> Self {
        let size = max_frequency as usize + 1;
        let mut combos = Array2::<u64>::zeros((size, size));
        // Pascal's triangle. Row 0 is 1, 0, 0, ...
        for i in 0..size {
            for j in 0..size {
                combos[[i, j]] = if i == j || j == 0 {
                    1
                } else if i == 0 {
                    0
                } else {
                    combos[[i - 1, j - 1]] + combos[[i - 1, j]]
                };
            }
        }
        Self { combos }
    }

    pub fn for_distribution(dist: &LetterDistribution) -> Self {
        Self::new(dist.max_frequency())
    }

    pub fn max_frequency(&self) -> usize {
        self.combos.nrows() - 1
    }

    /// C(n, k). Zero whenever k exceeds n, including k past the table.
    pub fn choose(&self, n: u8, k: u8) -> u64 {
        self.combos
            .get((n as usize, k as usize))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal() {
        let table = BinomialTable::new(12);
        assert_eq!(table.max_frequency(), 12);
        assert_eq!(table.choose(0, 0), 1);
        assert_eq!(table.choose(0, 3), 0);
        assert_eq!(table.choose(9, 2), 36);
        assert_eq!(table.choose(12, 6), 924);
        assert_eq!(table.choose(4, 4), 1);
        assert_eq!(table.choose(2, 3), 0);
    }

    #[test]
    fn test_symmetry() {
        let table = BinomialTable::new(10);
        for n in 0..=10u8 {
            for k in 0..=n {
                assert_eq!(table.choose(n, k), table.choose(n, n - k));
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let table = BinomialTable::new(2);
        assert_eq!(table.choose(2, 5), 0);
        assert_eq!(table.choose(1, 200), 0);
    }

    #[test]
    fn test_stored_table() {
        use crate::utils::serialization::{deserialize_bytes, serialize_bytes};

        let table = BinomialTable::for_distribution(&LetterDistribution::english());
        assert_eq!(table.max_frequency(), 12);
        let bytes = serialize_bytes(&table).unwrap();
        let loaded: BinomialTable = deserialize_bytes(&bytes).unwrap();
        assert_eq!(loaded, table);
        assert_eq!(loaded.choose(12, 2), 66);
    }
}
