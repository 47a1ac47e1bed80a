use std::collections::BTreeSet;

use fst::raw::{CompiledAddr, Fst};
use fst::Set;

use super::alphabet::MachineLetter;
use crate::error::Result;

/// Read-only traversal primitives over a word graph whose arcs are laid out
/// as sibling lists. An arc handle names one outgoing edge of a node; a
/// node is represented by its first arc, or `None` when it has no children.
pub trait WordGraph {
    type Arc: Copy;

    /// First arc of the root node, for front anchored traversal
    fn root(&self) -> Option<Self::Arc>;
    fn tile(&self, arc: Self::Arc) -> MachineLetter;
    /// Whether `arc` is the last of its siblings
    fn is_end(&self, arc: Self::Arc) -> bool;
    /// Whether the node `arc` leads to completes a word
    fn accepts(&self, arc: Self::Arc) -> bool;
    /// First arc of the node `arc` leads to
    fn arc_index(&self, arc: Self::Arc) -> Option<Self::Arc>;
    /// Next sibling. Only valid when `!is_end(arc)`
    fn sibling(&self, arc: Self::Arc) -> Self::Arc;

    /// Scans the siblings starting at `first` for one labelled `tile`
    fn find_arc(&self, first: Option<Self::Arc>, tile: MachineLetter) -> Option<Self::Arc> {
        let mut arc = first?;
        loop {
            if self.tile(arc) == tile {
                return Some(arc);
            }
            if self.is_end(arc) {
                return None;
            }
            arc = self.sibling(arc);
        }
    }

    /// Every arc of the node whose first arc is `first`
    fn arcs(&self, first: Option<Self::Arc>) -> Arcs<'_, Self>
    where
        Self: Sized,
    {
        Arcs {
            graph: self,
            next: first,
        }
    }

    /// Follows `word` from the root. Returns whether the path spells a whole
    /// word and the first arc of the node it ends on, or `None` when the
    /// path leaves the graph.
    fn walk(&self, word: &[MachineLetter]) -> Option<(bool, Option<Self::Arc>)> {
        let mut first = self.root();
        let mut accepts = false;
        for &ml in word {
            let arc = self.find_arc(first, ml)?;
            accepts = self.accepts(arc);
            first = self.arc_index(arc);
        }
        Some((accepts, first))
    }

    fn contains(&self, word: &[MachineLetter]) -> bool {
        !word.is_empty() && self.walk(word).map_or(false, |(accepts, _)| accepts)
    }
}

pub struct Arcs<'g, G: WordGraph> {
    graph: &'g G,
    next: Option<G::Arc>,
}

impl<'g, G: WordGraph> Iterator for Arcs<'g, G> {
    type Item = G::Arc;

    fn next(&mut self) -> Option<Self::Item> {
        let arc = self.next?;
        self.next = if self.graph.is_end(arc) {
            None
        } else {
            Some(self.graph.sibling(arc))
        };
        Some(arc)
    }
}

/// Handle on one transition of an fst node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FstArc {
    node: CompiledAddr,
    index: usize,
}

/// Word graph backed by an `fst` set whose keys are machine letter strings
pub struct FstGraph {
    dict: Set<Vec<u8>>,
}

impl FstGraph {
    /// Builds the graph from words already translated to machine letters.
    /// Order and duplicates don't matter.
    pub fn from_words<I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<MachineLetter>>,
    {
        let entries: BTreeSet<Vec<u8>> = words.into_iter().filter(|w| !w.is_empty()).collect();
        let dict = Set::from_iter(entries)?;
        Ok(Self { dict })
    }

    /// Same words, each spelled backwards. Used to look up front hooks.
    pub fn reversed_from_words<I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<MachineLetter>>,
    {
        Self::from_words(words.into_iter().map(|mut w| {
            w.reverse();
            w
        }))
    }

    /// Loads a graph previously written out with [`FstGraph::as_bytes`]
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(Self {
            dict: Set::new(bytes)?,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.dict.as_fst().as_bytes()
    }

    /// Number of words in the graph
    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    fn fst(&self) -> &Fst<Vec<u8>> {
        self.dict.as_fst()
    }

    fn first_arc(&self, node: CompiledAddr) -> Option<FstArc> {
        if self.fst().node(node).is_empty() {
            None
        } else {
            Some(FstArc { node, index: 0 })
        }
    }
}

impl WordGraph for FstGraph {
    type Arc = FstArc;

    fn root(&self) -> Option<FstArc> {
        self.first_arc(self.fst().root().addr())
    }

    fn tile(&self, arc: FstArc) -> MachineLetter {
        self.fst().node(arc.node).transition(arc.index).inp
    }

    fn is_end(&self, arc: FstArc) -> bool {
        arc.index + 1 >= self.fst().node(arc.node).len()
    }

    fn accepts(&self, arc: FstArc) -> bool {
        let next = self.fst().node(arc.node).transition_addr(arc.index);
        self.fst().node(next).is_final()
    }

    fn arc_index(&self, arc: FstArc) -> Option<FstArc> {
        self.first_arc(self.fst().node(arc.node).transition_addr(arc.index))
    }

    fn sibling(&self, arc: FstArc) -> FstArc {
        FstArc {
            node: arc.node,
            index: arc.index + 1,
        }
    }

    fn find_arc(&self, first: Option<FstArc>, tile: MachineLetter) -> Option<FstArc> {
        let node = first?.node;
        self.fst()
            .node(node)
            .find_input(tile)
            .map(|index| FstArc { node, index })
    }
}
