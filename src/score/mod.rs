// Score assembly
// Composition data model and the multi-track MIDI timeline assembler

pub mod assembler;
pub mod composition;

pub use assembler::{render_song, render_song_with_rng, ScoreError};
pub use composition::{Composition, MelodyNote, Section};
