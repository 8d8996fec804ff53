//! Built-in Remington GAIL layout
//!
//! Letters follow the Remington typewriter arrangement as carried over to
//! Unicode by GAIL: consonants without a key of their own are typed as a
//! half form followed by the AA sign, common conjuncts sit on Shift, and
//! AltGr holds the rarer letters and ASCII punctuation.

use super::layout::{KeyMapping, KeyOutputs, KeyboardLayout, LayoutRow};
use super::KeyCode;

/// `(scancode, normal, shift, altgr, altgr+shift, finger)`
type Entry = (u16, &'static str, &'static str, &'static str, &'static str, u8);

const NUMBER_ROW: &[Entry] = &[
    (41, "़", "द्य", "`", "~", 0),
    (2, "1", "!", "१", "", 0),
    (3, "2", "/", "२", "@", 1),
    (4, "3", ":", "३", "#", 2),
    (5, "4", "*", "४", "$", 3),
    (6, "5", "-", "५", "%", 3),
    (7, "6", "‘", "६", "^", 6),
    (8, "7", "’", "७", "&", 6),
    (9, "8", "द्ध", "८", "*", 7),
    (10, "9", "त्र", "९", "(", 8),
    (11, "0", "ऋ", "०", ")", 9),
    (12, ";", ".", "-", "_", 9),
    (13, "ृ", "्", "=", "+", 9),
];

const TOP_ROW: &[Entry] = &[
    (16, "ु", "फ", "", "", 0),
    (17, "ू", "ॅ", "", "", 1),
    (18, "म", "म्", "", "", 2),
    (19, "त", "त्", "", "", 3),
    (20, "ज", "ज्", "", "", 3),
    (21, "ल", "ल्", "", "", 6),
    (22, "न", "न्", "", "", 6),
    (23, "प", "प्", "", "", 7),
    (24, "व", "व्", "", "", 8),
    (25, "च", "च्", "", "", 9),
    (26, "ख्", "क्ष्", "[", "{", 9),
    (27, ",", "द्व", "]", "}", 9),
    (43, "?", "ः", "ञ", "|", 9),
];

const HOME_ROW: &[Entry] = &[
    (30, "ं", "।", "॥", "", 0),
    (31, "े", "ै", "", "", 1),
    (32, "क", "क्", "", "", 2),
    (33, "ि", "थ्", "", "", 3),
    (34, "ह", "ळ", "", "", 3),
    (35, "ी", "भ्", "", "", 6),
    (36, "र", "श्र", "", "", 6),
    (37, "ा", "ज्ञ", "", "", 7),
    (38, "स", "स्", "", "", 8),
    (39, "य", "रू", "ॐ", "", 9),
    (40, "श्", "ष्", "'", "\"", 9),
];

const BOTTOM_ROW: &[Entry] = &[
    (44, "्र", "र्", "", "", 0),
    (45, "ग", "ग्", "ङ", "", 1),
    (46, "ब", "ब्", "", "", 2),
    (47, "अ", "ट", "", "", 3),
    (48, "इ", "ठ", "", "", 3),
    (49, "द", "छ", "", "", 6),
    (50, "उ", "ड", "ऊ", "", 6),
    (51, "ए", "ढ", "<", "", 7),
    (52, "ण्", "झ", ".", "॰", 8),
    (53, "ध्", "घ्", "/", "", 9),
];

const SPACE_ROW: &[Entry] = &[(57, " ", " ", "", "", 4)];

fn row(entries: &[Entry]) -> LayoutRow {
    LayoutRow {
        keys: entries
            .iter()
            .map(|&(code, normal, shift, altgr, altgr_shift, finger)| {
                KeyMapping::new(
                    KeyCode(code),
                    KeyOutputs::new(normal, shift, altgr, altgr_shift),
                    finger,
                )
            })
            .collect(),
    }
}

/// The Remington GAIL layout table
pub fn remington_gail() -> KeyboardLayout {
    KeyboardLayout {
        name: "Remington (GAIL)".to_string(),
        rows: [NUMBER_ROW, TOP_ROW, HOME_ROW, BOTTOM_ROW, SPACE_ROW]
            .into_iter()
            .map(row)
            .collect(),
    }
}
