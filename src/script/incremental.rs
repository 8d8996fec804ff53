//! Display text built one keystroke cluster at a time

use super::chars::*;
use super::rules;

/// Result of appending one cluster to display text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Composed {
    pub text: String,
    /// A `ि` was typed and is waiting for its consonant
    pub pending_pre_base: bool,
}

type Step = fn(&mut Vec<char>, &[char], &mut bool) -> bool;

/// Tried in order until one reports it handled the cluster
const STEPS: &[(&str, Step)] = &[
    ("buffer-pre-base", buffer_pre_base),
    ("place-pre-base", place_pre_base),
    ("vowel-fusion", fuse_independent_vowel),
    ("half-form-fusion", fuse_half_form),
    ("compound-matra", fuse_compound_matra),
    ("candrabindu", fuse_candrabindu),
    ("nukta", place_nukta),
    ("rakar", place_rakar),
    ("reph", place_reph),
];

/// Append one keystroke's output to already composed text.
///
/// Folding this over the clusters of a key plan gives the same text as
/// [`recompose`](super::recompose) on the concatenated plan.
pub fn compose_incremental(existing: &str, cluster: &str, pending_pre_base: bool) -> Composed {
    let mut text: Vec<char> = existing.chars().collect();
    let incoming: Vec<char> = cluster.chars().collect();
    let mut pending = pending_pre_base;

    if !incoming.is_empty() {
        let handled = STEPS.iter().any(|(_, step)| step(&mut text, &incoming, &mut pending));
        if !handled {
            text.extend_from_slice(&incoming);
        }
    }

    Composed {
        text: text.into_iter().collect(),
        pending_pre_base: pending,
    }
}

fn buffer_pre_base(text: &mut Vec<char>, incoming: &[char], pending: &mut bool) -> bool {
    if incoming != [I_MATRA] {
        return false;
    }
    if *pending {
        text.push(I_MATRA);
    }
    *pending = true;
    true
}

/// Releases a buffered `ि` after a full consonant; any other cluster shows
/// it immediately and is then processed normally
fn place_pre_base(text: &mut Vec<char>, incoming: &[char], pending: &mut bool) -> bool {
    if !*pending {
        return false;
    }
    if is_consonant(incoming[0]) {
        text.extend_from_slice(incoming);
        if incoming.last() != Some(&HALANT) {
            text.push(I_MATRA);
            *pending = false;
        }
        return true;
    }
    if incoming == [AA_MATRA] {
        if let Some(consonant) = trailing_half_form(text) {
            if rules::needs_aa_completion(consonant) {
                text.pop();
                text.push(I_MATRA);
                *pending = false;
                return true;
            }
        }
    }
    text.push(I_MATRA);
    *pending = false;
    false
}

fn fuse_independent_vowel(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    let Some(&last) = text.last() else {
        return false;
    };
    let fused = match incoming {
        [sign] => rules::fuse_vowel(last, *sign),
        _ if last == VOWEL_I && incoming == rules::REPH => Some(rules::LONG_I),
        _ => None,
    };
    match fused {
        Some(vowel) => {
            text.pop();
            text.push(vowel);
            true
        }
        None => false,
    }
}

fn fuse_half_form(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    let [sign] = incoming else {
        return false;
    };
    if !is_vowel_sign(*sign) {
        return false;
    }
    let Some(consonant) = trailing_half_form(text) else {
        return false;
    };
    text.pop();
    if !(*sign == AA_MATRA && rules::needs_aa_completion(consonant)) {
        text.push(*sign);
    }
    true
}

fn fuse_compound_matra(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    let ([second], Some(&first)) = (incoming, text.last()) else {
        return false;
    };
    match rules::fuse_matras(first, *second) {
        Some(fused) => {
            text.pop();
            text.push(fused);
            true
        }
        None => false,
    }
}

fn fuse_candrabindu(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    if incoming != [ANUSVARA] {
        return false;
    }
    let base = match text.last() {
        Some(&CANDRA_E_MATRA) => None,
        Some(&CANDRA_O_MATRA) => Some(AA_MATRA),
        Some(&'ऑ') => Some('आ'),
        _ => return false,
    };
    text.pop();
    text.extend(base);
    text.push(CANDRABINDU);
    true
}

/// Rakar attaches to the last consonant, ahead of any vowel signs
fn place_rakar(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    if incoming != rules::RAKAR {
        return false;
    }
    let signs = text.iter().rev().take_while(|c| is_vowel_sign(**c)).count();
    let at = text.len() - signs;
    let base = if at > 0 && text[at - 1] == NUKTA { at - 1 } else { at };
    if base == 0 || !is_consonant(text[base - 1]) {
        return false;
    }
    insert_at(text, at, &rules::RAKAR);
    true
}

/// Nukta typed after a consonant that already shows a vowel sign, as with
/// `ख्` + `ा` releasing a buffered `ि`
fn place_nukta(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    if incoming != [NUKTA] {
        return false;
    }
    let signs = text.iter().rev().take_while(|c| is_vowel_sign(**c)).count();
    let at = text.len() - signs;
    if signs == 0 || at == 0 || !is_consonant(text[at - 1]) {
        return false;
    }
    insert_at(text, at, &[NUKTA]);
    true
}

/// Reph goes in front of the trailing consonant syllable
fn place_reph(text: &mut Vec<char>, incoming: &[char], _: &mut bool) -> bool {
    if incoming != rules::REPH {
        return false;
    }
    let Some(start) = trailing_syllable_start(text) else {
        return false;
    };
    insert_at(text, start, &rules::REPH);
    true
}

fn insert_at(text: &mut Vec<char>, at: usize, chars: &[char]) {
    let tail = text.split_off(at);
    text.extend_from_slice(chars);
    text.extend(tail);
}

/// Consonant of a trailing `C(़)्`, if the text ends in a half form
fn trailing_half_form(text: &[char]) -> Option<char> {
    match text {
        [.., c, NUKTA, HALANT] | [.., c, HALANT] if is_consonant(*c) => Some(*c),
        _ => None,
    }
}

/// Start of the closed consonant syllable at the end of `text`:
/// `C(़)(्C(़))*` followed only by vowel signs
fn trailing_syllable_start(text: &[char]) -> Option<usize> {
    let mut at = text.len() - text.iter().rev().take_while(|c| is_vowel_sign(**c)).count();
    let mut start = None;
    loop {
        if at > 0 && text[at - 1] == NUKTA {
            at -= 1;
        }
        if at == 0 || !is_consonant(text[at - 1]) {
            break;
        }
        at -= 1;
        start = Some(at);
        if at >= 2 && text[at - 1] == HALANT {
            at -= 1;
        } else {
            break;
        }
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fold(clusters: &[&str]) -> Composed {
        clusters.iter().fold(Composed::default(), |acc, cluster| {
            compose_incremental(&acc.text, cluster, acc.pending_pre_base)
        })
    }

    #[test]
    fn appends_plain_clusters() {
        assert_eq!(fold(&["न", "म", "स्", "त", "े"]).text, "नमस्ते");
    }

    #[test]
    fn empty_cluster_changes_nothing() {
        let composed = compose_incremental("क", "", true);
        assert_eq!(composed, Composed { text: "क".into(), pending_pre_base: true });
    }

    #[test]
    fn pre_base_is_buffered_until_full_consonant() {
        let after_matra = fold(&["ि"]);
        assert_eq!(after_matra, Composed { text: String::new(), pending_pre_base: true });

        let after_half = fold(&["ि", "स्"]);
        assert_eq!(after_half.text, "स्");
        assert!(after_half.pending_pre_base);

        assert_eq!(fold(&["ि", "स्", "थ्", "ा", "ि", "त"]).text, "स्थिति");
    }

    #[test]
    fn pre_base_shown_before_non_consonant() {
        let composed = fold(&["ि", " "]);
        assert_eq!(composed.text, "ि ");
        assert!(!composed.pending_pre_base);
    }

    #[test]
    fn independent_vowels_fuse() {
        assert_eq!(fold(&["अ", "ा"]).text, "आ");
        assert_eq!(fold(&["अ", "ा", "े"]).text, "ओ");
        assert_eq!(fold(&["ए", "े"]).text, "ऐ");
        assert_eq!(fold(&["इ", "र्"]).text, "ई");
    }

    #[test]
    fn half_form_absorbs_aa() {
        assert_eq!(fold(&["ध्", "ा"]).text, "ध");
        assert_eq!(fold(&["क्ष्", "ा"]).text, "क्ष");
        assert_eq!(fold(&["स्", "ी"]).text, "सी");
    }

    #[test]
    fn candrabindu_fusions() {
        assert_eq!(fold(&["म", "ा", "ॅ", "ं"]).text, "माँ");
        assert_eq!(fold(&["अ", "ा", "ॅ", "ं"]).text, "आँ");
        assert_eq!(fold(&["ह", "ॅ", "ं"]).text, "हँ");
    }

    #[test]
    fn rakar_goes_before_vowel_signs() {
        assert_eq!(fold(&["ि", "प", "्र", "य"]).text, "प्रिय");
        assert_eq!(fold(&["ग", "्र"]).text, "ग्र");
    }

    #[test]
    fn rakar_after_aa_completion_with_pre_base() {
        assert_eq!(fold(&["ि", "थ्", "ा", "्र", "ल", "र"]).text, "थ्रिलर");
    }

    #[test]
    fn nukta_lands_on_its_consonant() {
        assert_eq!(fold(&["ख्", "ा", "़", "ु"]).text, "ख\u{093C}ु");
        assert_eq!(fold(&["ि", "ख्", "ा", "़"]).text, "ख\u{093C}ि");
        assert_eq!(fold(&["ि", "ख्", "ा", "़", "्र"]).text, "ख\u{093C}्रि");
        assert_eq!(fold(&["ि", "ज", "़"]).text, "ज\u{093C}ि");
    }

    #[test]
    fn reph_goes_before_trailing_syllable() {
        assert_eq!(fold(&["ध्", "ा", "म", "र्"]).text, "धर्म");
        assert_eq!(fold(&["क", "ी", "ि", "त", "र्"]).text, "कीर्ति");
        assert_eq!(fold(&["व", "ष्", "ा", "ा", "े", "र्", "ं"]).text, "वर्षों");
    }

    #[test]
    fn trailing_syllable_spans_half_forms() {
        let text: Vec<char> = "अस्त".chars().collect();
        assert_eq!(trailing_syllable_start(&text), Some(1));
        let text: Vec<char> = "कमी".chars().collect();
        assert_eq!(trailing_syllable_start(&text), Some(1));
        assert_eq!(trailing_syllable_start(&[]), None);
    }
}
