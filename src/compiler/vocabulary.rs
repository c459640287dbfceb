//! Chord vocabulary: chord symbol to base pitch set
//!
//! Symbols follow the `extended_inversions` naming of the chord-analysis
//! service: `X:maj`, `X:min`, `X7`, `Xmaj7`, `Xdim`, `X:min7`, `X:min7b5`.
//! Every voicing is rooted at its written root in the octave starting at
//! middle C (pitch 60), so all pitches lie in `60..=82`.

/// Ordered absolute MIDI pitches of one chord voicing
pub type PitchSet = Vec<u8>;

/// Middle C
pub const MIDDLE_C: u8 = 60;

/// Written roots with their pitch in the middle-C octave.
/// Black keys are accepted under both spellings.
const ROOTS: &[(&str, u8)] = &[
    ("C", 60),
    ("C#", 61),
    ("Db", 61),
    ("D", 62),
    ("D#", 63),
    ("Eb", 63),
    ("E", 64),
    ("F", 65),
    ("F#", 66),
    ("Gb", 66),
    ("G", 67),
    ("G#", 68),
    ("Ab", 68),
    ("A", 69),
    ("A#", 70),
    ("Bb", 70),
    ("B", 71),
];

/// Chord qualities as semitone intervals above the root
const QUALITIES: &[(&str, &[u8])] = &[
    (":maj", &[0, 4, 7]),
    (":min", &[0, 3, 7]),
    ("7", &[0, 4, 7, 10]),
    ("maj7", &[0, 4, 7, 11]),
    ("dim", &[0, 3, 6]),
    (":min7", &[0, 3, 7, 10]),
    (":min7b5", &[0, 3, 6, 10]),
];

/// Look up the base voicing of a chord symbol.
///
/// Matching is exact: `"C:sus4"`, `"c:maj"` or `"C:maj "` are all absent.
pub fn lookup(symbol: &str) -> Option<PitchSet> {
    ROOTS.iter().find_map(|&(root, base)| {
        let quality = symbol.strip_prefix(root)?;
        QUALITIES
            .iter()
            .find(|(name, _)| *name == quality)
            .map(|(_, intervals)| intervals.iter().map(|i| base + i).collect())
    })
}

/// Every symbol the vocabulary knows, root-major order
pub fn symbols() -> impl Iterator<Item = String> {
    ROOTS.iter().flat_map(|(root, _)| {
        QUALITIES
            .iter()
            .map(move |(quality, _)| format!("{}{}", root, quality))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_triads() {
        assert_eq!(lookup("C:maj"), Some(vec![60, 64, 67]));
        assert_eq!(lookup("A:min"), Some(vec![69, 72, 76]));
        assert_eq!(lookup("Bdim"), Some(vec![71, 74, 77]));
    }

    #[test]
    fn test_lookup_tetrads() {
        assert_eq!(lookup("G7"), Some(vec![67, 71, 74, 77]));
        assert_eq!(lookup("Fmaj7"), Some(vec![65, 69, 72, 76]));
        assert_eq!(lookup("D:min7"), Some(vec![62, 65, 69, 72]));
        assert_eq!(lookup("D:min7b5"), Some(vec![62, 65, 68, 72]));
        assert_eq!(lookup("A:min7b5"), Some(vec![69, 72, 75, 79]));
    }

    #[test]
    fn test_lookup_accidental_roots() {
        assert_eq!(lookup("C#7"), Some(vec![61, 65, 68, 71]));
        assert_eq!(lookup("Db7"), lookup("C#7"));
        assert_eq!(lookup("Bb:maj"), Some(vec![70, 74, 77]));
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup("C:sus4"), None);
        assert_eq!(lookup("c:maj"), None);
        assert_eq!(lookup("C:maj "), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("N"), None);
    }

    #[test]
    fn test_every_symbol_is_sane() {
        let mut count = 0;
        for symbol in symbols() {
            let pitches = lookup(&symbol).unwrap();
            assert!(pitches.len() == 3 || pitches.len() == 4, "{}", symbol);
            assert!(
                pitches.iter().all(|p| (48..=84).contains(p)),
                "{} out of range: {:?}",
                symbol,
                pitches
            );
            assert!(pitches.windows(2).all(|w| w[0] < w[1]));
            count += 1;
        }
        assert_eq!(count, ROOTS.len() * QUALITIES.len());
    }
}
