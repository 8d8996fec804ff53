//! Devanagari codepoint constants and classification
//!
//! Classes are computed from the Unicode Devanagari block ranges on demand;
//! nothing here allocates or keeps state.

/// Virama (halant), suppresses the inherent vowel
pub const HALANT: char = '\u{094D}';
/// Nukta
pub const NUKTA: char = '\u{093C}';
/// Consonant RA
pub const RA: char = '\u{0930}';
/// Dependent vowel sign AA (ा)
pub const AA_MATRA: char = '\u{093E}';
/// Dependent vowel sign I (ि), renders before its consonant
pub const I_MATRA: char = '\u{093F}';
/// Dependent vowel sign E (े)
pub const E_MATRA: char = '\u{0947}';
/// Dependent vowel sign AI (ै)
pub const AI_MATRA: char = '\u{0948}';
/// Dependent vowel sign candra E (ॅ)
pub const CANDRA_E_MATRA: char = '\u{0945}';
/// Dependent vowel sign O (ो)
pub const O_MATRA: char = '\u{094B}';
/// Dependent vowel sign AU (ौ)
pub const AU_MATRA: char = '\u{094C}';
/// Dependent vowel sign candra O (ॉ)
pub const CANDRA_O_MATRA: char = '\u{0949}';
/// Candrabindu (ँ)
pub const CANDRABINDU: char = '\u{0901}';
/// Anusvara (ं)
pub const ANUSVARA: char = '\u{0902}';
/// Visarga (ः)
pub const VISARGA: char = '\u{0903}';

/// Independent vowel A (अ)
pub const VOWEL_A: char = '\u{0905}';
/// Independent vowel I (इ)
pub const VOWEL_I: char = '\u{0907}';
/// Independent vowel E (ए)
pub const VOWEL_E: char = '\u{090F}';

/// Coarse class of a codepoint as far as keystroke composition cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    IndependentVowel,
    Consonant,
    /// Dependent vowel sign, nukta, anusvara, visarga or candrabindu
    Matra,
    Halant,
    /// Anything outside the Devanagari letters: digits, punctuation, Latin
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if c == HALANT {
            Self::Halant
        } else if is_consonant(c) {
            Self::Consonant
        } else if is_independent_vowel(c) {
            Self::IndependentVowel
        } else if is_matra(c) {
            Self::Matra
        } else {
            Self::Other
        }
    }
}

pub fn is_consonant(c: char) -> bool {
    matches!(c, '\u{0915}'..='\u{0939}' | '\u{0958}'..='\u{095F}' | '\u{0978}'..='\u{097F}')
}

pub fn is_independent_vowel(c: char) -> bool {
    matches!(c, '\u{0904}'..='\u{0914}' | '\u{0960}'..='\u{0961}' | '\u{0972}'..='\u{0977}')
}

/// Dependent vowel signs only (no bindus, no nukta)
pub fn is_vowel_sign(c: char) -> bool {
    matches!(
        c,
        '\u{093A}'..='\u{093B}'
            | '\u{093E}'..='\u{094C}'
            | '\u{094E}'..='\u{094F}'
            | '\u{0955}'..='\u{0957}'
            | '\u{0962}'..='\u{0963}'
    )
}

/// Anusvara, visarga, candrabindu (and the inverted candrabindu)
pub fn is_bindu(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{0903}')
}

/// Everything that attaches to a preceding letter except the halant
pub fn is_matra(c: char) -> bool {
    is_vowel_sign(c) || is_bindu(c) || c == NUKTA
}

pub fn is_pre_base_matra(c: char) -> bool {
    c == I_MATRA
}

/// True for any codepoint in the Devanagari block
pub fn is_devanagari(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}')
}
