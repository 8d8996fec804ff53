//! Next-key hint
//!
//! Finds the next keyable unit of a decomposed passage at a cursor position
//! and the keys that type it.

use crate::keyboard::{KeyBinding, Keymap};
use crate::script::chars::{is_consonant, HALANT, NUKTA, RA};
use crate::script::rules::{self, CONJUNCTS};

/// Longest multi-codepoint output to look up in the keymap
const MAX_UNIT: usize = 4;

/// The next unit to type and every way to type it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextInput {
    pub unit: String,
    /// Empty when no key on the layout produces `unit`
    pub bindings: Vec<KeyBinding>,
}

/// Resolve the next keyable unit at `cursor`, or `None` past the end.
///
/// Units are tried in the same order the passage was decomposed: a conjunct
/// key, a consonant waiting for a rakar, the rakar itself, the longest slice
/// some key produces, and finally the bare codepoint.
pub fn next_expected(target: &[char], cursor: usize, keymap: &Keymap) -> Option<NextInput> {
    if cursor >= target.len() {
        return None;
    }
    let unit = conjunct_unit(target, cursor, keymap)
        .or_else(|| rakar_base(target, cursor))
        .or_else(|| rakar_unit(target, cursor))
        .or_else(|| keyed_slice(target, cursor, keymap))
        .unwrap_or_else(|| target[cursor].to_string());

    let bindings = keymap.keys_producing(&unit).to_vec();
    Some(NextInput { unit, bindings })
}

fn conjunct_unit(target: &[char], cursor: usize, keymap: &Keymap) -> Option<String> {
    CONJUNCTS
        .iter()
        .map(|c| c.keyed)
        .filter(|keyed| !keymap.keys_producing(keyed).is_empty())
        .filter(|keyed| rules::starts_with(target, cursor, keyed))
        .max_by_key(|keyed| keyed.chars().count())
        .map(str::to_string)
}

/// The consonant of a `C(़)्र` sequence is typed alone, before the rakar key
fn rakar_base(target: &[char], cursor: usize) -> Option<String> {
    let c = *target.get(cursor)?;
    if !is_consonant(c) {
        return None;
    }
    let halant_at = if target.get(cursor + 1) == Some(&NUKTA) { cursor + 2 } else { cursor + 1 };
    let is_rakar = target.get(halant_at) == Some(&HALANT)
        && target.get(halant_at + 1) == Some(&RA)
        && target.get(halant_at + 2) != Some(&HALANT);
    is_rakar.then(|| c.to_string())
}

fn rakar_unit(target: &[char], cursor: usize) -> Option<String> {
    target[cursor..]
        .starts_with(&rules::RAKAR)
        .then(|| rules::RAKAR.iter().collect())
}

fn keyed_slice(target: &[char], cursor: usize, keymap: &Keymap) -> Option<String> {
    let longest = MAX_UNIT.min(target.len() - cursor);
    (2..=longest).rev().find_map(|len| {
        let slice: String = target[cursor..cursor + len].iter().collect();
        (!keymap.keys_producing(&slice).is_empty()).then_some(slice)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{KeyCode, ModifierState};
    use crate::script::decompose;

    fn target(passage: &str) -> Vec<char> {
        decompose(passage).chars().collect()
    }

    fn unit_at(passage: &str, cursor: usize) -> String {
        let keymap = Keymap::remington_gail();
        next_expected(&target(passage), cursor, &keymap).unwrap().unit
    }

    #[test]
    fn half_form_is_one_unit() {
        assert_eq!(unit_at("नमस्ते", 2), "स्");
        assert_eq!(unit_at("नमस्ते", 4), "त");
    }

    #[test]
    fn kssa_half_form_from_its_key() {
        assert_eq!(unit_at("क्षमा", 0), "क्ष्");
        assert_eq!(unit_at("क्षमा", 4), "ा");
    }

    #[test]
    fn fixed_conjunct_key() {
        assert_eq!(unit_at("त्रि", 1), "त्र");
    }

    #[test]
    fn rakar_consonant_then_rakar() {
        // ि प ् र य
        assert_eq!(unit_at("प्रिय", 1), "प");
        assert_eq!(unit_at("प्रिय", 2), "्र");
    }

    #[test]
    fn reph_key() {
        // ध ् ा म र ्
        assert_eq!(unit_at("धर्म", 4), "र्");
    }

    #[test]
    fn bindings_point_at_keys() {
        let keymap = Keymap::remington_gail();
        let next = next_expected(&target("कि"), 0, &keymap).unwrap();
        assert_eq!(next.unit, "ि");
        assert_eq!(next.bindings[0].key, KeyCode(33));
        assert_eq!(next.bindings[0].state, ModifierState::Normal);
    }

    #[test]
    fn none_past_the_end() {
        let keymap = Keymap::remington_gail();
        assert_eq!(next_expected(&target("क"), 1, &keymap), None);
    }

    #[test]
    fn unreachable_codepoint_has_no_bindings() {
        let keymap = Keymap::remington_gail();
        let next = next_expected(&['Q'], 0, &keymap).unwrap();
        assert_eq!(next.unit, "Q");
        assert!(next.bindings.is_empty());
    }
}
