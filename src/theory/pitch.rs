// Pitch name parsing - "C4", "F#3", "Bb5" to MIDI note numbers

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PitchError {
    #[error("empty pitch name")]
    Empty,
    #[error("invalid pitch name: {0}")]
    Invalid(String),
    #[error("pitch out of MIDI range: {0}")]
    OutOfRange(String),
}

/// Parse a scientific pitch name into a MIDI note number.
///
/// Accepts a note letter (case-insensitive), any number of `#`/`b`
/// accidentals, and an optional octave (default 4, so `"C"` is middle C = 60).
pub fn parse_pitch(name: &str) -> Result<u8, PitchError> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars().peekable();

    let letter = chars.next().ok_or(PitchError::Empty)?;
    let mut pitch_class: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(PitchError::Invalid(trimmed.to_string())),
    };

    while let Some(&c) = chars.peek() {
        match c {
            '#' | '♯' => pitch_class += 1,
            'b' | '♭' => pitch_class -= 1,
            _ => break,
        }
        chars.next();
    }

    let rest: String = chars.collect();
    let octave: i32 = if rest.is_empty() {
        4
    } else {
        rest.parse()
            .map_err(|_| PitchError::Invalid(trimmed.to_string()))?
    };

    let midi = (octave + 1) * 12 + pitch_class;
    if !(0..=127).contains(&midi) {
        return Err(PitchError::OutOfRange(trimmed.to_string()));
    }

    Ok(midi as u8)
}
