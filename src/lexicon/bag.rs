use rand::prelude::SliceRandom;
use rand::Rng;

use super::alphabet::{MachineLetter, BLANK};
use super::distribution::LetterDistribution;
use crate::error::{LexiconError, Result};

#[derive(Debug, Clone)]
pub struct Bag {
    /// Remaining tiles, drawn from the back
    tiles: Vec<MachineLetter>,
}

impl Bag {
    /// A full, shuffled bag
    pub fn new<R: Rng + ?Sized>(dist: &LetterDistribution, rng: &mut R) -> Bag {
        let mut tiles = Vec::with_capacity(dist.total_tiles());
        for (ml, count) in dist.counts() {
            for _ in 0..count {
                tiles.push(ml);
            }
        }
        tiles.shuffle(rng);
        Bag { tiles }
    }

    /// A bag that hands tiles out in exactly the given order
    pub fn new_with_order(order: &[MachineLetter]) -> Bag {
        let mut tiles = order.to_vec();
        tiles.reverse();
        Bag { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Draws one tile. Blanks drawn while `avoid_blanks` is set are put aside
    /// and another tile is drawn in their place.
    pub fn draw(&mut self, avoid_blanks: bool) -> Option<MachineLetter> {
        loop {
            let tile = self.tiles.pop()?;
            if !(avoid_blanks && tile == BLANK) {
                return Some(tile);
            }
        }
    }

    pub fn draw_tiles(&mut self, n: usize) -> Vec<MachineLetter> {
        let n = n.min(self.tiles.len());
        let mut drawn = self.tiles.split_off(self.tiles.len() - n);
        drawn.reverse();
        drawn
    }
}

/// A random rack of `word_length` tiles holding exactly `blanks` blanks,
/// which come last
pub fn gen_rack<R: Rng + ?Sized>(
    dist: &LetterDistribution,
    word_length: usize,
    blanks: usize,
    rng: &mut R,
) -> Result<Vec<MachineLetter>> {
    let mut bag = Bag::new(dist, rng);
    gen_rack_from_bag(&mut bag, word_length, blanks)
}

fn gen_rack_from_bag(
    bag: &mut Bag,
    word_length: usize,
    blanks: usize,
) -> Result<Vec<MachineLetter>> {
    let blanks = blanks.min(word_length);
    let mut rack = Vec::with_capacity(word_length);
    for _ in 0..(word_length - blanks) {
        // Only the requested number of blanks may end up on the rack
        let tile = bag.draw(blanks != 0).ok_or_else(|| {
            LexiconError::InvalidDistribution(format!(
                "bag ran out of tiles for a rack of {}",
                word_length
            ))
        })?;
        rack.push(tile);
    }
    rack.extend(std::iter::repeat(BLANK).take(blanks));
    Ok(rack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_bag() {
        let dist = LetterDistribution::english();
        let mut bag = Bag::new(&dist, &mut rand::thread_rng());
        assert_eq!(bag.len(), 100);
        let all = bag.draw_tiles(200);
        assert_eq!(all.len(), 100);
        assert!(bag.is_empty());
        assert_eq!(all.iter().filter(|&&t| t == BLANK).count(), 2);
    }

    #[test]
    fn test_ordered_draws() {
        let mut bag = Bag::new_with_order(&[0, 5, 0, 7, 9]);
        assert_eq!(bag.draw(false), Some(0));
        assert_eq!(bag.draw(true), Some(5));
        assert_eq!(bag.draw(true), Some(7));
        assert_eq!(bag.draw_tiles(3), vec![9]);
        assert_eq!(bag.draw(false), None);
    }

    #[test]
    fn test_rack_blanks() {
        let dist = LetterDistribution::english();
        let mut rng = rand::thread_rng();
        for length in 7..=8 {
            for blanks in 1..=2 {
                for _ in 0..500 {
                    let rack = gen_rack(&dist, length, blanks, &mut rng).unwrap();
                    assert_eq!(rack.len(), length);
                    assert_eq!(rack.iter().filter(|&&t| t == BLANK).count(), blanks);
                }
            }
        }
    }

    #[test]
    fn test_rack_from_short_bag() {
        let mut bag = Bag::new_with_order(&[0, 3, 0]);
        assert!(gen_rack_from_bag(&mut bag, 3, 1).is_err());
        let mut bag = Bag::new_with_order(&[0, 3, 4]);
        assert_eq!(gen_rack_from_bag(&mut bag, 3, 1).unwrap(), vec![3, 4, 0]);
    }
}
