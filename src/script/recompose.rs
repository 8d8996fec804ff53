//! Keystroke order back to composed text
//!
//! Inverse of [`decompose`](super::decompose). Works on any prefix of a
//! decomposed passage, so it doubles as the renderer for a half-typed
//! buffer: an unfinished half form stays a half form and a buffered `ि`
//! with no consonant yet is shown on its own.

use unicode_normalization::UnicodeNormalization;

use super::chars::*;
use super::rules::{self, Direction};

type Rule = fn(&mut Recomposer<'_>, usize) -> Option<usize>;

const RULES: &[(&str, Rule)] = &[
    ("reph", reph),
    ("fixed-conjunct", fixed_conjunct),
    ("half-form-fusion", half_form_fusion),
    ("half-form", half_form),
    ("consonant", consonant),
    ("independent-vowel", independent_vowel),
    ("pre-base", pre_base),
    ("compound-matra", compound_matra),
    ("candrabindu", candrabindu),
];

/// Rebuild display text from keystroke-ordered codepoints. Output is NFC.
pub fn recompose(decomposed: &str) -> String {
    let input: Vec<char> = decomposed.chars().collect();
    let mut recomposer = Recomposer::new(&input);
    recomposer.run();
    recomposer.out.into_iter().collect::<String>().nfc().collect()
}

struct Recomposer<'a> {
    input: &'a [char],
    out: Vec<char>,
    syllable_start: Option<usize>,
    cluster_open: bool,
    /// A `ि` waiting for the consonant cluster it precedes in key order
    pending_pre_base: bool,
}

impl<'a> Recomposer<'a> {
    fn new(input: &'a [char]) -> Self {
        Self {
            input,
            out: Vec::with_capacity(input.len()),
            syllable_start: None,
            cluster_open: false,
            pending_pre_base: false,
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
        self.flush_pre_base();
    }

    fn at(&self, i: usize) -> Option<char> {
        self.input.get(i).copied()
    }

    fn consonant_end(&self, i: usize) -> Option<usize> {
        if !is_consonant(self.at(i)?) {
            return None;
        }
        Some(if self.at(i + 1) == Some(NUKTA) { i + 2 } else { i + 1 })
    }

    fn enter_consonant(&mut self) {
        if !self.cluster_open {
            self.syllable_start = Some(self.out.len());
        }
    }

    /// A consonant piece that completes the cluster
    fn close_cluster(&mut self) {
        self.cluster_open = false;
        self.flush_pre_base();
    }

    fn leave_syllable(&mut self) {
        self.syllable_start = None;
        self.cluster_open = false;
        self.flush_pre_base();
    }

    fn flush_pre_base(&mut self) {
        if self.pending_pre_base {
            self.out.push(I_MATRA);
            self.pending_pre_base = false;
        }
    }

    fn pass_through(&mut self, i: usize) -> usize {
        let c = self.input[i];
        match CharClass::of(c) {
            CharClass::Consonant | CharClass::Halant => {}
            CharClass::Matra => {
                if !self.cluster_open {
                    self.flush_pre_base();
                }
            }
            CharClass::IndependentVowel | CharClass::Other => self.leave_syllable(),
        }
        self.out.push(c);
        1
    }
}

fn reph(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    if r.cluster_open || r.at(i)? != RA || r.at(i + 1)? != HALANT {
        return None;
    }
    let start = r.syllable_start?;
    for (offset, c) in rules::REPH.into_iter().enumerate() {
        r.out.insert(start + offset, c);
    }
    r.syllable_start = None;
    Some(2)
}

fn fixed_conjunct(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    if !is_consonant(r.at(i)?) {
        return None;
    }
    let (consumed, composed) = rules::match_conjunct(r.input, i, Direction::Backward)?;
    r.enter_consonant();
    r.out.extend(composed.chars());
    r.close_cluster();
    Some(consumed)
}

/// Half form followed by a vowel sign loses its halant; for the consonants
/// typed as half form + AA, the AA goes too, and a nukta or rakar keyed
/// after the AA belongs to the same consonant
fn half_form_fusion(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    let end = r.consonant_end(i)?;
    if r.at(end)? != HALANT || !is_vowel_sign(r.at(end + 1)?) {
        return None;
    }
    let absorbs_aa =
        end == i + 1 && r.at(end + 1) == Some(AA_MATRA) && rules::needs_aa_completion(r.input[i]);
    r.enter_consonant();
    r.out.extend_from_slice(&r.input[i..end]);
    if !absorbs_aa {
        r.close_cluster();
        return Some(end + 1 - i);
    }

    let mut next = end + 2;
    if r.at(next) == Some(NUKTA) {
        r.out.push(NUKTA);
        next += 1;
    }
    if r.input[next..].starts_with(&rules::RAKAR) && r.at(next + 2) != Some(HALANT) {
        r.out.extend(rules::RAKAR);
        next += 2;
    }
    r.close_cluster();
    Some(next - i)
}

fn half_form(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    let end = r.consonant_end(i)?;
    if r.at(end)? != HALANT {
        return None;
    }
    r.enter_consonant();
    r.out.extend_from_slice(&r.input[i..=end]);
    r.cluster_open = true;
    Some(end + 1 - i)
}

fn consonant(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    let end = r.consonant_end(i)?;
    r.enter_consonant();
    r.out.extend_from_slice(&r.input[i..end]);
    r.close_cluster();
    Some(end - i)
}

fn independent_vowel(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    let mut vowel = r.at(i)?;
    if !is_independent_vowel(vowel) {
        return None;
    }
    let mut next = i + 1;
    loop {
        if let Some(fused) = r.at(next).and_then(|sign| rules::fuse_vowel(vowel, sign)) {
            if !rules::is_split_candrabindu(r.input, next) {
                vowel = fused;
                next += 1;
                continue;
            }
        }
        if vowel == VOWEL_I && rules::starts_with(r.input, next, "र्") {
            vowel = rules::LONG_I;
            next += 2;
        }
        break;
    }
    r.leave_syllable();
    r.out.push(vowel);
    Some(next - i)
}

fn pre_base(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    if !is_pre_base_matra(r.at(i)?) {
        return None;
    }
    // two in a row: the first one had nothing to attach to
    r.flush_pre_base();
    r.pending_pre_base = true;
    Some(1)
}

fn compound_matra(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    let fused = rules::fuse_matras(r.at(i)?, r.at(i + 1)?)?;
    if rules::is_split_candrabindu(r.input, i + 1) {
        return None;
    }
    r.flush_pre_base();
    r.out.push(fused);
    Some(2)
}

fn candrabindu(r: &mut Recomposer<'_>, i: usize) -> Option<usize> {
    if !rules::is_split_candrabindu(r.input, i) {
        return None;
    }
    r.flush_pre_base();
    r.out.push(CANDRABINDU);
    Some(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keyed(codepoints: &[char]) -> String {
        codepoints.iter().collect()
    }

    #[test]
    fn restores_pre_base_matra() {
        assert_eq!(recompose(&keyed(&[I_MATRA, 'क'])), "कि");
        assert_eq!(recompose(&keyed(&[I_MATRA, 'प', HALANT, RA, 'य'])), "प्रिय");
    }

    #[test]
    fn pre_base_waits_through_half_forms() {
        let text = keyed(&[I_MATRA, 'स', HALANT, 'थ', HALANT, AA_MATRA, I_MATRA, 'त']);
        assert_eq!(recompose(&text), "स्थिति");
    }

    #[test]
    fn restores_reph() {
        assert_eq!(recompose(&keyed(&['क', AA_MATRA, 'य', RA, HALANT])), "कार्य");
        assert_eq!(recompose(&keyed(&['ध', HALANT, AA_MATRA, 'म', RA, HALANT])), "धर्म");
        assert_eq!(recompose(&keyed(&['क', 'ी', I_MATRA, 'त', RA, HALANT])), "कीर्ति");
    }

    #[test]
    fn reph_before_anusvara() {
        let text = keyed(&['व', 'ष', HALANT, AA_MATRA, AA_MATRA, E_MATRA, RA, HALANT, ANUSVARA]);
        assert_eq!(recompose(&text), "वर्षों");
    }

    #[test]
    fn half_form_with_other_matra_drops_halant() {
        assert_eq!(recompose(&keyed(&['स', HALANT, 'ी'])), "सी");
        assert_eq!(recompose(&keyed(&['क', HALANT, 'ष', HALANT, 'ी'])), "क्षी");
    }

    #[test]
    fn rakar_after_aa_completion_keeps_pre_base_waiting() {
        let text = keyed(&[I_MATRA, 'थ', HALANT, AA_MATRA, HALANT, RA, 'ल', 'र']);
        assert_eq!(recompose(&text), "थ्रिलर");
        assert_eq!(recompose(&keyed(&['भ', HALANT, AA_MATRA, HALANT, RA, 'म'])), "भ्रम");
    }

    #[test]
    fn nukta_after_aa_completion() {
        let text = keyed(&['ख', HALANT, AA_MATRA, NUKTA, 'ु', 'श', HALANT, AA_MATRA, 'ी']);
        assert_eq!(recompose(&text), "ख\u{093C}ुशी");
        assert_eq!(recompose(&keyed(&[I_MATRA, 'ख', HALANT, AA_MATRA, NUKTA])), "ख\u{093C}ि");
        assert_eq!(
            recompose(&keyed(&[I_MATRA, 'ख', HALANT, AA_MATRA, NUKTA, HALANT, RA])),
            "ख\u{093C}्रि"
        );
    }

    #[test]
    fn candra_e_then_anusvara_reads_as_candrabindu() {
        assert_eq!(recompose(&keyed(&['ब', CANDRA_E_MATRA, ANUSVARA, 'क'])), "बँक");
    }

    #[test]
    fn kssa_from_half_form_and_aa() {
        assert_eq!(recompose(&keyed(&['क', HALANT, 'ष', HALANT, AA_MATRA])), "क्ष");
    }

    #[test]
    fn vowels_fuse_stepwise() {
        assert_eq!(recompose(&keyed(&[VOWEL_A, AA_MATRA])), "आ");
        assert_eq!(recompose(&keyed(&[VOWEL_A, AA_MATRA, AI_MATRA])), "औ");
        assert_eq!(recompose(&keyed(&[VOWEL_I, RA, HALANT, 'श'])), "ईश");
        assert_eq!(recompose(&keyed(&[VOWEL_A, AA_MATRA, CANDRA_E_MATRA, ANUSVARA])), "आँ");
    }

    #[test]
    fn matra_fusions() {
        assert_eq!(recompose(&keyed(&['क', AA_MATRA, E_MATRA])), "को");
        assert_eq!(recompose(&keyed(&['म', AA_MATRA, CANDRA_E_MATRA, ANUSVARA])), "माँ");
        assert_eq!(recompose(&keyed(&['क', AA_MATRA, CANDRA_E_MATRA])), "कॉ");
    }

    #[test]
    fn incomplete_prefixes_render() {
        assert_eq!(recompose(&keyed(&[I_MATRA])), "ि");
        assert_eq!(recompose(&keyed(&['स', HALANT])), "स्");
        assert_eq!(recompose(&keyed(&[I_MATRA, 'स', HALANT])), "स्ि");
        assert_eq!(recompose(""), "");
    }

    #[test]
    fn consonant_before_matra_still_renders() {
        assert_eq!(recompose(&keyed(&['क', I_MATRA])), "कि");
    }
}
