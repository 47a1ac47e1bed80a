use std::collections::HashSet;
use std::time::Instant;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::alphabet::MachineLetter;
use super::alphagram::sort_machine_letters;
use super::anagram::{search, Mode};
use super::bag::gen_rack;
use super::rack::Rack;
use super::Lexicon;
use crate::error::{LexiconError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankChallengeRequest {
    pub word_length: usize,
    pub num_questions: usize,
    /// How many of the questions, counted from the end, get two blanks
    pub num_with_two_blanks: usize,
    pub max_solutions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildChallengeRequest {
    pub min_length: usize,
    pub max_length: usize,
    pub min_solutions: usize,
    pub max_solutions: usize,
    /// Only accept racks that anagram to at least one word using every tile
    pub require_length_solution: bool,
}

/// A rack to solve, with its answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub alphagram: String,
    pub words: Vec<String>,
}

fn rack_alphagram(lexicon: &Lexicon, rack: &[MachineLetter]) -> String {
    let mut sorted = rack.to_vec();
    sort_machine_letters(&mut sorted);
    lexicon.tile_mapping().user_visible(&sorted)
}

fn check_deadline(deadline: Instant, tries: usize) -> Result<()> {
    if Instant::now() >= deadline {
        info!("Could not generate before deadline, {} tries", tries);
        return Err(LexiconError::DeadlineExceeded { tries });
    }
    Ok(())
}

/// One attempt at a blank question. `Ok(None)` means the rack was rejected
/// and another should be drawn.
fn try_blank_rack<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    blanks: usize,
    req: &BlankChallengeRequest,
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Result<Option<Challenge>> {
    let tiles = gen_rack(lexicon.distribution(), req.word_length, blanks, rng)?;
    let alphagram = rack_alphagram(lexicon, &tiles);
    let mut rack = Rack::from_machine_letters(&tiles);
    let answers = search(&mut rack, lexicon.graph(), lexicon.tile_mapping(), Mode::Exact);

    if answers.is_empty() || answers.len() > req.max_solutions {
        debug!("{}: {} answers", alphagram, answers.len());
        return Ok(None);
    }
    if let Some(dup) = answers.iter().find(|a| used.contains(*a)) {
        debug!("{}: duplicate answer {}", alphagram, dup);
        return Ok(None);
    }
    used.extend(answers.iter().cloned());
    Ok(Some(Challenge {
        alphagram,
        words: answers,
    }))
}

/// Racks of `word_length` tiles with one blank (two for the last
/// `num_with_two_blanks` questions), each with between one and
/// `max_solutions` answers. No answer appears in two questions.
pub fn generate_blank_challenges<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    req: &BlankChallengeRequest,
    deadline: Instant,
    rng: &mut R,
) -> Result<Vec<Challenge>> {
    let mut used = HashSet::new();
    let mut questions = Vec::with_capacity(req.num_questions);
    let one_blank = req.num_questions.saturating_sub(req.num_with_two_blanks);
    let mut tries = 0;

    while questions.len() < req.num_questions {
        check_deadline(deadline, tries)?;
        let blanks = if questions.len() < one_blank { 1 } else { 2 };
        tries += 1;
        if let Some(question) = try_blank_rack(lexicon, blanks, req, &mut used, rng)? {
            questions.push(question);
        }
    }
    info!("{} blank challenges in {} tries", questions.len(), tries);
    Ok(questions)
}

fn try_build_rack<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    req: &BuildChallengeRequest,
    rng: &mut R,
) -> Result<Option<Challenge>> {
    let tiles = gen_rack(lexicon.distribution(), req.max_length, 0, rng)?;
    let alphagram = rack_alphagram(lexicon, &tiles);
    let mut rack = Rack::from_machine_letters(&tiles);
    let (graph, alph) = (lexicon.graph(), lexicon.tile_mapping());

    if req.require_length_solution && search(&mut rack, graph, alph, Mode::Exact).is_empty() {
        debug!("{}: no exact anagram", alphagram);
        return Ok(None);
    }
    let words: Vec<String> = search(&mut rack, graph, alph, Mode::Build)
        .into_iter()
        .filter(|w| w.chars().count() >= req.min_length)
        .collect();
    if words.len() < req.min_solutions || words.len() > req.max_solutions {
        debug!(
            "{}: {} answers, wanted {} - {}",
            alphagram,
            words.len(),
            req.min_solutions,
            req.max_solutions
        );
        return Ok(None);
    }
    Ok(Some(Challenge { alphagram, words }))
}

/// A blank-free rack of `max_length` tiles whose buildable words of at
/// least `min_length` letters number between `min_solutions` and
/// `max_solutions`.
pub fn generate_build_challenge<R: Rng + ?Sized>(
    lexicon: &Lexicon,
    req: &BuildChallengeRequest,
    deadline: Instant,
    rng: &mut R,
) -> Result<Challenge> {
    let mut tries = 0;
    loop {
        check_deadline(deadline, tries)?;
        tries += 1;
        if let Some(challenge) = try_build_rack(lexicon, req, rng)? {
            info!("Build challenge {} in {} tries", challenge.alphagram, tries);
            return Ok(challenge);
        }
    }
}
