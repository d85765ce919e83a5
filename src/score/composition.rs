// Composition data model - the assembler's input from the generation layer
// Consumed, never produced, by this crate; serde defaults absorb sloppy input

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TEMPO;

/// A complete generated composition: ordered sections of chords and melody
/// plus global tempo and drum style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    #[serde(default)]
    pub title: String,

    /// Tempo in BPM. Must be positive; the assembler rejects zero.
    #[serde(default = "default_tempo")]
    pub tempo: u32,

    /// Drum style tag, normalized by `DrumStyle::from_name`.
    #[serde(default)]
    pub style: String,

    /// Ordered song sections (typically verse then chorus).
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One song section: a chord progression and the melody sung over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,

    /// Chord symbols, one bar each.
    #[serde(default)]
    pub chords: Vec<String>,

    /// Melody entries laid out sequentially across the section.
    #[serde(default)]
    pub melody: Vec<MelodyNote>,

    /// How many times the chord progression plays back to back. The default
    /// of 2 gives the conventional 8-bar section from a 4-chord progression.
    #[serde(default = "default_repeats")]
    pub repeats: u32,
}

/// One melody entry: a pitch name (or `"rest"`), a duration in quarter
/// notes, and the lyric syllable sung on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MelodyNote {
    #[serde(default = "default_pitch")]
    pub pitch: String,

    #[serde(default = "default_duration")]
    pub duration: f64,

    #[serde(default)]
    pub syllable: String,
}

impl MelodyNote {
    /// Rests advance the timeline without sounding.
    pub fn is_rest(&self) -> bool {
        let p = self.pitch.trim();
        p.eq_ignore_ascii_case("rest") || p.eq_ignore_ascii_case("r")
    }
}

impl Composition {
    pub fn new(title: impl Into<String>, tempo: u32, style: impl Into<String>) -> Self {
        Composition {
            title: title.into(),
            tempo,
            style: style.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Total bar count across all sections, counting repeats. Drives the
    /// drum track length so drums cover the whole chord timeline.
    pub fn total_bars(&self) -> u32 {
        self.sections
            .iter()
            .map(|s| s.chords.len() as u32 * s.repeats)
            .sum()
    }
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            chords: Vec::new(),
            melody: Vec::new(),
            repeats: default_repeats(),
        }
    }
}

fn default_tempo() -> u32 {
    DEFAULT_TEMPO
}

fn default_repeats() -> u32 {
    2
}

fn default_pitch() -> String {
    "C4".to_string()
}

fn default_duration() -> f64 {
    1.0
}
