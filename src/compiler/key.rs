//! Key name to transposition offset

/// Sentinel reported when no key was detected
pub const NO_KEY: &str = "N";

/// Key names and their semitone distance above C
const KEY_OFFSETS: &[(&str, i32)] = &[
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    (NO_KEY, 0),
];

/// Resolve a key name to a transposition offset in semitones.
///
/// Unrecognized names (including [`NO_KEY`]) resolve to 0.
pub fn resolve(key: &str) -> i32 {
    KEY_OFFSETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|&(_, offset)| offset)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naturals() {
        assert_eq!(resolve("C"), 0);
        assert_eq!(resolve("D"), 2);
        assert_eq!(resolve("E"), 4);
        assert_eq!(resolve("F"), 5);
        assert_eq!(resolve("G"), 7);
        assert_eq!(resolve("A"), 9);
        assert_eq!(resolve("B"), 11);
    }

    #[test]
    fn test_enharmonic_spellings_agree() {
        for (sharp, flat) in [("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb")] {
            assert_eq!(resolve(sharp), resolve(flat), "{} vs {}", sharp, flat);
            assert_ne!(resolve(sharp), 0);
        }
    }

    #[test]
    fn test_unknown_defaults_to_zero() {
        assert_eq!(resolve(NO_KEY), 0);
        assert_eq!(resolve(""), 0);
        assert_eq!(resolve("H"), 0);
        assert_eq!(resolve("c"), 0);
        assert_eq!(resolve("C:maj"), 0);
    }
}
