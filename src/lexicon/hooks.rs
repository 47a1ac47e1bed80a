use super::alphabet::MachineLetter;
use super::alphagram::sort_machine_letters;
use super::graph::WordGraph;
use super::Lexicon;
use crate::error::Result;

/// Letters that can follow `word` in `graph` to make another word
fn extensions<G: WordGraph>(graph: &G, word: &[MachineLetter]) -> Vec<MachineLetter> {
    match graph.walk(word) {
        Some((_, first)) => graph
            .arcs(first)
            .filter(|&arc| graph.accepts(arc))
            .map(|arc| graph.tile(arc))
            .collect(),
        None => Vec::new(),
    }
}

impl Lexicon {
    /// Letters that can be added to the end of `word`
    pub fn back_hooks(&self, word: &str) -> Result<String> {
        let mls = self.tile_mapping().to_machine_letters(word)?;
        let mut hooks = extensions(self.graph(), &mls);
        sort_machine_letters(&mut hooks);
        Ok(self.tile_mapping().user_visible(&hooks))
    }

    /// Letters that can be put in front of `word`
    pub fn front_hooks(&self, word: &str) -> Result<String> {
        let mut mls = self.tile_mapping().to_machine_letters(word)?;
        mls.reverse();
        let mut hooks = extensions(self.reversed_graph(), &mls);
        sort_machine_letters(&mut hooks);
        Ok(self.tile_mapping().user_visible(&hooks))
    }

    /// Whether `word` without its first letter is still a word
    pub fn inner_front_hook(&self, word: &str) -> Result<bool> {
        let mls = self.tile_mapping().to_machine_letters(word)?;
        Ok(mls.len() > 1 && self.graph().contains(&mls[1..]))
    }

    /// Whether `word` without its last letter is still a word
    pub fn inner_back_hook(&self, word: &str) -> Result<bool> {
        let mls = self.tile_mapping().to_machine_letters(word)?;
        Ok(mls.len() > 1 && self.graph().contains(&mls[..mls.len() - 1]))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexicon::tests::test_lexicon;

    #[test]
    fn test_hooks() {
        let lex = test_lexicon();
        assert_eq!(lex.back_hooks("AA").unwrap(), "H");
        assert_eq!(lex.back_hooks("AH").unwrap(), "AS");
        assert_eq!(lex.front_hooks("AH").unwrap(), "A");
        assert_eq!(lex.front_hooks("CAT").unwrap(), "S");
        assert_eq!(lex.back_hooks("CAT").unwrap(), "S");
        assert_eq!(lex.front_hooks("A").unwrap(), "AHT");
        assert_eq!(lex.back_hooks("AEROLITH").unwrap(), "");
        assert_eq!(lex.back_hooks("QQ").unwrap(), "");
    }

    #[test]
    fn test_inner_hooks() {
        let lex = test_lexicon();
        assert!(lex.inner_back_hook("AAH").unwrap());
        assert!(lex.inner_front_hook("AAH").unwrap());
        assert!(lex.inner_front_hook("SCAT").unwrap());
        assert!(!lex.inner_front_hook("CATS").unwrap());
        assert!(lex.inner_back_hook("CATS").unwrap());
        assert!(!lex.inner_back_hook("A").unwrap());
    }

    #[test]
    fn test_unknown_letter() {
        let lex = test_lexicon();
        assert!(lex.back_hooks("C1T").is_err());
    }
}
