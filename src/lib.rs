// Songsmith - Song composition engine
// Renders generated chords, melodies, and style drum patterns into MIDI files

pub mod config;
pub mod drums;
pub mod score;
pub mod storage;
pub mod theory;

pub use drums::{generate_bar_pattern, render_drum_track, DrumEvent, DrumNote, DrumStyle};
pub use score::{render_song, render_song_with_rng, Composition, MelodyNote, ScoreError, Section};
pub use storage::{save_song, StorageError};
