// Chord symbol resolution - "Am7", "G7", "Fmaj7" to MIDI pitch sets
// Unparseable symbols fall back to a C major triad instead of failing the song

use thiserror::Error;

/// Fallback pitch set used when a chord symbol cannot be resolved: C4-E4-G4.
pub const DEFAULT_TRIAD: [u8; 3] = [60, 64, 67];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordError {
    #[error("empty chord symbol")]
    Empty,
    #[error("unknown chord root: {0}")]
    UnknownRoot(String),
    #[error("unknown chord quality: {0}")]
    UnknownQuality(String),
}

/// A resolved chord: root pitch class plus quality intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    /// Root pitch class, 0-11 (C = 0).
    pub root: u8,
    /// Semitone offsets from the root, always starting with 0.
    pub intervals: &'static [u8],
}

impl Chord {
    /// Root placed in the octave around middle C (C4 = 60 through B4 = 71).
    pub fn root_midi(&self) -> u8 {
        60 + self.root
    }

    /// Perfect fifth above the root, for pad voicings.
    pub fn fifth_midi(&self) -> u8 {
        self.root_midi() + 7
    }

    /// Concrete MIDI pitches for the full voicing.
    pub fn pitches(&self) -> Vec<u8> {
        let root = self.root_midi();
        self.intervals.iter().map(|&i| root + i).collect()
    }
}

/// Parse a textual chord symbol into a root and quality.
///
/// Handles the symbols the lyric/chord generation layer produces: triads,
/// sevenths, suspensions, sixths, and simple extensions. Slash-bass suffixes
/// are ignored (`"C/G"` resolves as `"C"`).
pub fn parse_chord(symbol: &str) -> Result<Chord, ChordError> {
    let trimmed = symbol.trim();
    let base = trimmed.split('/').next().unwrap_or(trimmed);
    let mut chars = base.chars().peekable();

    let letter = chars.next().ok_or(ChordError::Empty)?;
    let mut root: i32 = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(ChordError::UnknownRoot(trimmed.to_string())),
    };

    while let Some(&c) = chars.peek() {
        match c {
            '#' => root += 1,
            'b' => root -= 1,
            _ => break,
        }
        chars.next();
    }

    let quality: String = chars.collect();
    let intervals: &'static [u8] = match quality.as_str() {
        "" | "maj" | "M" => &[0, 4, 7],
        "m" | "min" | "-" => &[0, 3, 7],
        "7" => &[0, 4, 7, 10],
        "maj7" | "M7" => &[0, 4, 7, 11],
        "m7" | "min7" | "-7" => &[0, 3, 7, 10],
        "dim" => &[0, 3, 6],
        "dim7" => &[0, 3, 6, 9],
        "m7b5" => &[0, 3, 6, 10],
        "aug" | "+" => &[0, 4, 8],
        "sus2" => &[0, 2, 7],
        "sus4" | "sus" => &[0, 5, 7],
        "6" => &[0, 4, 7, 9],
        "m6" => &[0, 3, 7, 9],
        "9" => &[0, 4, 7, 10, 14],
        "add9" => &[0, 4, 7, 14],
        _ => return Err(ChordError::UnknownQuality(trimmed.to_string())),
    };

    Ok(Chord {
        root: root.rem_euclid(12) as u8,
        intervals,
    })
}

/// Resolve a chord symbol to MIDI pitches, substituting the default C major
/// triad on failure. Single bad symbols degrade one bar, never the song.
pub fn resolve_or_default(symbol: &str) -> Vec<u8> {
    match parse_chord(symbol) {
        Ok(chord) => chord.pitches(),
        Err(e) => {
            log::warn!("Chord '{}' not resolvable ({}), using C major", symbol, e);
            DEFAULT_TRIAD.to_vec()
        }
    }
}

/// Root and fifth for the string-pad track, with the same fallback policy.
pub fn pad_dyad_or_default(symbol: &str) -> (u8, u8) {
    match parse_chord(symbol) {
        Ok(chord) => (chord.root_midi(), chord.fifth_midi()),
        Err(e) => {
            log::warn!("Chord '{}' not resolvable ({}), using C pad", symbol, e);
            (DEFAULT_TRIAD[0], DEFAULT_TRIAD[2])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_and_minor_triads() {
        assert_eq!(resolve_or_default("C"), vec![60, 64, 67]);
        assert_eq!(resolve_or_default("Am"), vec![69, 72, 76]);
        assert_eq!(resolve_or_default("F"), vec![65, 69, 72]);
    }

    #[test]
    fn test_sevenths() {
        assert_eq!(resolve_or_default("G7"), vec![67, 71, 74, 77]);
        assert_eq!(resolve_or_default("Fmaj7"), vec![65, 69, 72, 76]);
        assert_eq!(resolve_or_default("Am7"), vec![69, 72, 76, 79]);
    }

    #[test]
    fn test_accidental_roots() {
        assert_eq!(resolve_or_default("Bb"), vec![70, 74, 77]);
        assert_eq!(resolve_or_default("F#m"), vec![66, 69, 73]);
        // Cb wraps to pitch class 11
        assert_eq!(parse_chord("Cb").unwrap().root, 11);
    }

    #[test]
    fn test_slash_chord_uses_left_side() {
        assert_eq!(resolve_or_default("C/G"), vec![60, 64, 67]);
    }

    #[test]
    fn test_unparseable_symbol_falls_back() {
        // Must not raise; substitutes C4-E4-G4
        assert_eq!(resolve_or_default("Xyz123"), vec![60, 64, 67]);
        assert_eq!(resolve_or_default(""), vec![60, 64, 67]);
        assert_eq!(resolve_or_default("Cwat"), vec![60, 64, 67]);
    }

    #[test]
    fn test_pad_dyad() {
        assert_eq!(pad_dyad_or_default("C"), (60, 67));
        assert_eq!(pad_dyad_or_default("Am"), (69, 76));
        assert_eq!(pad_dyad_or_default("Xyz123"), (60, 67));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_chord("Xyz123"), Err(ChordError::UnknownRoot(_))));
        assert!(matches!(parse_chord("Cfoo"), Err(ChordError::UnknownQuality(_))));
        assert_eq!(parse_chord(""), Err(ChordError::Empty));
    }
}
