//! Composed text to keystroke order
//!
//! One left-to-right pass over the NFD form of the passage. At each position
//! the rules in [`RULES`] are tried in order and the first one that matches
//! consumes its window (2-4 codepoints at most). Unmatched codepoints are
//! copied through.

use unicode_normalization::UnicodeNormalization;

use super::chars::*;
use super::rules::{self, Direction};

type Rule = fn(&mut Decomposer<'_>, usize) -> Option<usize>;

/// Ordered rule table; earlier rules win
const RULES: &[(&str, Rule)] = &[
    ("reph", reph),
    ("fixed-conjunct", fixed_conjunct),
    ("rakar", rakar),
    ("half-form", half_form),
    ("aa-completion", aa_completion),
    ("independent-vowel", independent_vowel),
    ("pre-base", pre_base),
    ("compound-matra", compound_matra),
    ("candrabindu", candrabindu),
];

/// Rewrite composed Devanagari into the order its keys are pressed.
///
/// `कि` becomes `ि क`, `धर्म` becomes `ध ् ा म र ्`. Text outside the
/// Devanagari letters passes through unchanged.
pub fn decompose(composed: &str) -> String {
    let input: Vec<char> = composed.nfd().collect();
    let mut decomposer = Decomposer::new(&input);
    decomposer.run();
    decomposer.out.into_iter().collect()
}

struct Decomposer<'a> {
    input: &'a [char],
    out: Vec<char>,
    /// Output index where the current consonant syllable begins
    syllable_start: Option<usize>,
    /// Last consonant piece was a half form waiting for the next consonant
    cluster_open: bool,
    /// Reph consumed at the syllable start, emitted when the syllable closes
    pending_reph: bool,
}

impl<'a> Decomposer<'a> {
    fn new(input: &'a [char]) -> Self {
        Self {
            input,
            out: Vec::with_capacity(input.len() + input.len() / 2),
            syllable_start: None,
            cluster_open: false,
            pending_reph: false,
        }
    }

    fn run(&mut self) {
        let mut i = 0;
        while i < self.input.len() {
            let consumed = RULES
                .iter()
                .find_map(|(_, rule)| rule(self, i))
                .unwrap_or_else(|| self.pass_through(i));
            i += consumed;
        }
        self.close_syllable();
    }

    fn at(&self, i: usize) -> Option<char> {
        self.input.get(i).copied()
    }

    /// Begin a consonant piece, starting a new syllable unless a half form
    /// is still open
    fn enter_consonant(&mut self) {
        if !self.cluster_open {
            self.close_syllable();
            self.syllable_start = Some(self.out.len());
        }
    }

    fn close_syllable(&mut self) {
        if self.pending_reph {
            self.out.extend(rules::REPH);
            self.pending_reph = false;
        }
        self.syllable_start = None;
        self.cluster_open = false;
    }

    fn emit(&mut self, text: &str) {
        self.out.extend(text.chars());
    }

    /// Consonant plus optional nukta at `i`; returns the index after them
    fn consonant_end(&self, i: usize) -> Option<usize> {
        let c = self.at(i)?;
        if !is_consonant(c) {
            return None;
        }
        Some(if self.at(i + 1) == Some(NUKTA) { i + 2 } else { i + 1 })
    }

    fn pass_through(&mut self, i: usize) -> usize {
        let c = self.input[i];
        match CharClass::of(c) {
            CharClass::Consonant => {
                self.enter_consonant();
                self.cluster_open = false;
            }
            CharClass::Matra if is_bindu(c) => self.close_syllable(),
            CharClass::Matra | CharClass::Halant => {}
            CharClass::IndependentVowel | CharClass::Other => self.close_syllable(),
        }
        self.out.push(c);
        1
    }
}

fn reph(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    if d.cluster_open || d.at(i)? != RA || d.at(i + 1)? != HALANT || !is_consonant(d.at(i + 2)?) {
        return None;
    }
    d.enter_consonant();
    d.pending_reph = true;
    d.cluster_open = true;
    Some(2)
}

fn fixed_conjunct(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    if !is_consonant(d.at(i)?) {
        return None;
    }
    let (consumed, keyed) = rules::match_conjunct(d.input, i, Direction::Forward)?;
    d.enter_consonant();
    d.emit(keyed);
    d.cluster_open = keyed.ends_with(HALANT);
    Some(consumed)
}

fn rakar(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    let end = d.consonant_end(i)?;
    if d.at(end)? != HALANT || d.at(end + 1)? != RA || d.at(end + 2) == Some(HALANT) {
        return None;
    }
    let consonant = d.input[i];
    d.enter_consonant();
    if rules::needs_aa_completion(consonant) {
        d.out.extend([consonant, HALANT, AA_MATRA]);
        d.out.extend_from_slice(&d.input[i + 1..end]);
    } else {
        d.out.extend_from_slice(&d.input[i..end]);
    }
    d.out.extend(rules::RAKAR);
    d.cluster_open = false;
    Some(end + 2 - i)
}

fn half_form(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    let end = d.consonant_end(i)?;
    if d.at(end)? != HALANT {
        return None;
    }
    d.enter_consonant();
    d.out.extend_from_slice(&d.input[i..=end]);
    d.cluster_open = true;
    Some(end + 1 - i)
}

/// A nukta is keyed after the AA: `ख़ → ख ् ा ़`
fn aa_completion(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    let c = d.at(i)?;
    if !rules::needs_aa_completion(c) || d.at(i + 1) == Some(HALANT) {
        return None;
    }
    d.enter_consonant();
    d.out.extend([c, HALANT, AA_MATRA]);
    d.cluster_open = false;
    if d.at(i + 1) == Some(NUKTA) {
        d.out.push(NUKTA);
        return Some(2);
    }
    Some(1)
}

fn independent_vowel(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    let keyed = rules::expand_vowel(d.at(i)?)?;
    d.close_syllable();
    d.out.extend(keyed);
    Some(1)
}

fn pre_base(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    if !is_pre_base_matra(d.at(i)?) {
        return None;
    }
    match d.syllable_start {
        Some(start) => d.out.insert(start, I_MATRA),
        None => d.out.push(I_MATRA),
    }
    Some(1)
}

fn compound_matra(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    let (first, second) = rules::split_matra(d.at(i)?)?;
    d.out.extend([first, second]);
    Some(1)
}

fn candrabindu(d: &mut Decomposer<'_>, i: usize) -> Option<usize> {
    if d.at(i)? != CANDRABINDU {
        return None;
    }
    d.close_syllable();
    d.out.extend([CANDRA_E_MATRA, ANUSVARA]);
    Some(1)
}
