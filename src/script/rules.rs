//! Orthographic tables shared by every composition direction
//!
//! Each table pairs a composed (display) spelling with its keyed spelling,
//! the order in which the Remington GAIL layout types it. `decompose` reads
//! the tables left to right, `recompose` and `compose_incremental` read them
//! right to left, so a rule is written down exactly once.

use super::chars::*;

/// Which side of a table a matcher reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Composed text to keystroke order
    Forward,
    /// Keystroke order back to composed text
    Backward,
}

/// A conjunct the layout exposes on a dedicated key
#[derive(Debug, Clone, Copy)]
pub struct Conjunct {
    pub composed: &'static str,
    pub keyed: &'static str,
}

impl Conjunct {
    const fn new(composed: &'static str, keyed: &'static str) -> Self {
        Self { composed, keyed }
    }

    fn source(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Forward => self.composed,
            Direction::Backward => self.keyed,
        }
    }

    fn target(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Forward => self.keyed,
            Direction::Backward => self.composed,
        }
    }
}

/// Conjuncts kept atomic because a single key types them.
///
/// KSSA only exists as the half form क्ष् on its key, so the full letter is
/// typed as that half form followed by the AA sign.
pub static CONJUNCTS: &[Conjunct] = &[
    Conjunct::new("क्ष्", "क्ष्"),
    Conjunct::new("क्ष", "क्ष्ा"),
    Conjunct::new("त्र", "त्र"),
    Conjunct::new("द्ध", "द्ध"),
    Conjunct::new("श्र", "श्र"),
    Conjunct::new("ज्ञ", "ज्ञ"),
    Conjunct::new("द्व", "द्व"),
    Conjunct::new("द्य", "द्य"),
];

/// Full consonants with no key of their own: typed as half form + AA sign
pub static AA_COMPLETED: &[char] = &['ख', 'घ', 'ण', 'थ', 'ध', 'भ', 'श', 'ष'];

/// Stepwise independent-vowel fusion: `(base, sign) -> fused`
pub static VOWEL_FUSIONS: &[(char, char, char)] = &[
    (VOWEL_A, AA_MATRA, 'आ'),
    ('आ', E_MATRA, 'ओ'),
    ('आ', AI_MATRA, 'औ'),
    ('आ', CANDRA_E_MATRA, 'ऑ'),
    (VOWEL_E, E_MATRA, 'ऐ'),
];

/// II has no key; it is typed as I followed by the reph key
pub const LONG_I: char = 'ई';

/// Visually fused matras typed as two signs: `(first, second) -> fused`
pub static MATRA_FUSIONS: &[(char, char, char)] = &[
    (AA_MATRA, E_MATRA, O_MATRA),
    (AA_MATRA, AI_MATRA, AU_MATRA),
    (AA_MATRA, CANDRA_E_MATRA, CANDRA_O_MATRA),
];

/// Output of the rakar key
pub const RAKAR: [char; 2] = [HALANT, RA];
/// Output of the reph key
pub const REPH: [char; 2] = [RA, HALANT];

/// Whether `input[at..]` starts with `pattern`
pub fn starts_with(input: &[char], at: usize, pattern: &str) -> bool {
    let mut idx = at;
    for p in pattern.chars() {
        if input.get(idx) != Some(&p) {
            return false;
        }
        idx += 1;
    }
    true
}

/// Longest conjunct whose `direction` source spelling starts at `at`.
///
/// Returns the number of codepoints consumed and the replacement text.
/// Backward matching ignores keyed spellings ending in a halant; those are
/// ordinary half forms and are rebuilt by the half-form rules.
pub fn match_conjunct(input: &[char], at: usize, direction: Direction) -> Option<(usize, &'static str)> {
    CONJUNCTS
        .iter()
        .filter(|c| direction == Direction::Forward || !c.keyed.ends_with(HALANT))
        .filter(|c| starts_with(input, at, c.source(direction)))
        .max_by_key(|c| c.source(direction).chars().count())
        .map(|c| (c.source(direction).chars().count(), c.target(direction)))
}

pub fn needs_aa_completion(consonant: char) -> bool {
    AA_COMPLETED.contains(&consonant)
}

pub fn fuse_vowel(base: char, sign: char) -> Option<char> {
    VOWEL_FUSIONS
        .iter()
        .find(|(b, s, _)| *b == base && *s == sign)
        .map(|(_, _, fused)| *fused)
}

/// Keyed spelling of an independent vowel, or `None` when it has its own key
pub fn expand_vowel(vowel: char) -> Option<Vec<char>> {
    if vowel == LONG_I {
        return Some(vec![VOWEL_I, RA, HALANT]);
    }
    let (base, sign, _) = VOWEL_FUSIONS.iter().find(|(_, _, fused)| *fused == vowel)?;
    let mut keyed = expand_vowel(*base).unwrap_or_else(|| vec![*base]);
    keyed.push(*sign);
    Some(keyed)
}

pub fn fuse_matras(first: char, second: char) -> Option<char> {
    MATRA_FUSIONS
        .iter()
        .find(|(a, b, _)| *a == first && *b == second)
        .map(|(_, _, fused)| *fused)
}

pub fn split_matra(matra: char) -> Option<(char, char)> {
    MATRA_FUSIONS
        .iter()
        .find(|(_, _, fused)| *fused == matra)
        .map(|(a, b, _)| (*a, *b))
}

/// `ॅ` directly followed by `ं` always spells a candrabindu
pub fn is_split_candrabindu(input: &[char], at: usize) -> bool {
    input.get(at) == Some(&CANDRA_E_MATRA) && input.get(at + 1) == Some(&ANUSVARA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn forward_conjunct_prefers_longest_spelling() {
        let input = chars("लक्ष्मी");
        assert_eq!(match_conjunct(&input, 1, Direction::Forward), Some((4, "क्ष्")));

        let input = chars("क्षमा");
        assert_eq!(match_conjunct(&input, 0, Direction::Forward), Some((3, "क्ष्ा")));
    }

    #[test]
    fn backward_conjunct_skips_plain_half_forms() {
        let input = chars("क्ष्म");
        assert_eq!(match_conjunct(&input, 0, Direction::Backward), None);

        let input = chars("क्ष्ा");
        assert_eq!(match_conjunct(&input, 0, Direction::Backward), Some((5, "क्ष")));
    }

    #[test]
    fn no_conjunct_outside_the_allow_list() {
        let input = chars("क्र");
        assert_eq!(match_conjunct(&input, 0, Direction::Forward), None);
    }

    #[test]
    fn vowel_expansion_unfolds_fusion_chain() {
        assert_eq!(expand_vowel('आ'), Some(vec![VOWEL_A, AA_MATRA]));
        assert_eq!(expand_vowel('ओ'), Some(vec![VOWEL_A, AA_MATRA, E_MATRA]));
        assert_eq!(expand_vowel('ऐ'), Some(vec![VOWEL_E, E_MATRA]));
        assert_eq!(expand_vowel('ई'), Some(vec![VOWEL_I, RA, HALANT]));
        assert_eq!(expand_vowel('अ'), None);
        assert_eq!(expand_vowel('उ'), None);
    }

    #[test]
    fn vowel_fusion_is_stepwise() {
        let aa = fuse_vowel(VOWEL_A, AA_MATRA).unwrap();
        assert_eq!(aa, 'आ');
        assert_eq!(fuse_vowel(aa, AI_MATRA), Some('औ'));
        assert_eq!(fuse_vowel(VOWEL_A, E_MATRA), None);
    }

    #[test]
    fn matra_tables_invert() {
        for (a, b, fused) in MATRA_FUSIONS {
            assert_eq!(fuse_matras(*a, *b), Some(*fused));
            assert_eq!(split_matra(*fused), Some((*a, *b)));
        }
        assert_eq!(split_matra(E_MATRA), None);
    }

    #[test]
    fn aa_completion_table() {
        assert!(needs_aa_completion('ख'));
        assert!(needs_aa_completion('ष'));
        assert!(!needs_aa_completion('क'));
    }
}
