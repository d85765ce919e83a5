// Drum kit - General MIDI percussion map and velocity palette

use serde::{Deserialize, Serialize};

/// General MIDI percussion instruments used by the style patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrumNote {
    Kick,
    KickAlt,
    Snare,
    SnareRim,
    Clap,
    ClosedHihat,
    OpenHihat,
    PedalHihat,
    Crash,
    Ride,
    RideBell,
    TomHigh,
    TomMid,
    TomLow,
    CongaHigh,
    CongaMid,
    CongaLow,
    Tambourine,
    Cowbell,
    Clave,
    Shaker,
}

impl DrumNote {
    /// General MIDI note number on the percussion channel.
    pub fn gm_note(&self) -> u8 {
        match self {
            DrumNote::Kick => 36,        // Bass Drum 1
            DrumNote::KickAlt => 35,     // Bass Drum 2
            DrumNote::Snare => 38,       // Acoustic Snare
            DrumNote::SnareRim => 40,    // Electric Snare
            DrumNote::Clap => 39,        // Hand Clap
            DrumNote::ClosedHihat => 42, // Closed Hi-Hat
            DrumNote::OpenHihat => 46,   // Open Hi-Hat
            DrumNote::PedalHihat => 44,  // Pedal Hi-Hat
            DrumNote::Crash => 49,       // Crash Cymbal 1
            DrumNote::Ride => 51,        // Ride Cymbal 1
            DrumNote::RideBell => 53,    // Ride Bell
            DrumNote::TomHigh => 50,     // High Tom
            DrumNote::TomMid => 47,      // Mid Tom
            DrumNote::TomLow => 45,      // Low Tom
            DrumNote::CongaHigh => 63,   // Open High Conga
            DrumNote::CongaMid => 62,    // Mute High Conga
            DrumNote::CongaLow => 60,    // High Bongo
            DrumNote::Tambourine => 54,  // Tambourine
            DrumNote::Cowbell => 56,     // Cowbell
            DrumNote::Clave => 75,       // Claves
            DrumNote::Shaker => 70,      // Maracas
        }
    }
}

/// Velocity palette for a dynamic feel across the patterns.
pub mod velocity {
    /// Barely-there texture hits.
    pub const GHOST: u8 = 40;
    pub const SOFT: u8 = 70;
    pub const NORMAL: u8 = 90;
    pub const ACCENT: u8 = 110;
}

/// One percussion hit inside a single bar.
///
/// `tick` is an absolute offset from the start of the bar; `duration` is the
/// sounding length in ticks, always short since percussion is struck, not held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrumEvent {
    pub tick: u32,
    pub note: DrumNote,
    pub velocity: u8,
    pub duration: u32,
}

impl DrumEvent {
    pub fn new(tick: u32, note: DrumNote, velocity: u8, duration: u32) -> Self {
        DrumEvent {
            tick,
            note,
            velocity: velocity.min(127),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gm_note_numbers() {
        assert_eq!(DrumNote::Kick.gm_note(), 36);
        assert_eq!(DrumNote::Snare.gm_note(), 38);
        assert_eq!(DrumNote::ClosedHihat.gm_note(), 42);
        assert_eq!(DrumNote::Crash.gm_note(), 49);
        assert_eq!(DrumNote::Clave.gm_note(), 75);
    }

    #[test]
    fn test_velocity_clamped() {
        let event = DrumEvent::new(0, DrumNote::Kick, 200, 40);
        assert_eq!(event.velocity, 127);
    }
}
