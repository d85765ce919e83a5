// Music theory helpers
// Pitch-name parsing and chord-symbol resolution for the track assembler

pub mod chord;
pub mod pitch;

pub use chord::{pad_dyad_or_default, parse_chord, resolve_or_default, Chord, ChordError, DEFAULT_TRIAD};
pub use pitch::{parse_pitch, PitchError};
