// Track assembler - merges chords, melody, strings, and drums into one SMF
// All tracks share the tick grid; simultaneity is implicit from elapsed ticks

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use rand::Rng;
use thiserror::Error;

use crate::config::{BAR_TICKS, TICKS_PER_BEAT};
use crate::drums::{render_drum_track, DrumStyle};
use crate::theory;

use super::composition::{Composition, MelodyNote};

const PIANO_CHANNEL: u8 = 0;
const MELODY_CHANNEL: u8 = 1;
const STRINGS_CHANNEL: u8 = 2;

const PIANO_PROGRAM: u8 = 0; // Acoustic Grand Piano
const MELODY_PROGRAM: u8 = 73; // Flute
const STRINGS_PROGRAM: u8 = 48; // String Ensemble 1

const CHORD_VELOCITY: u8 = 64;
const MELODY_VELOCITY: u8 = 80;
const PAD_VELOCITY: u8 = 50;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("tempo must be a positive BPM value, got {0}")]
    InvalidTempo(u32),
    #[error("failed to encode MIDI file: {0}")]
    Encode(String),
}

/// Render a composition to MIDI file bytes using the thread-local RNG for
/// drum variation.
pub fn render_song(composition: &Composition) -> Result<Vec<u8>, ScoreError> {
    let mut rng = rand::rng();
    render_song_with_rng(composition, &mut rng)
}

/// Render a composition to MIDI file bytes with an explicit RNG, for
/// reproducible output.
///
/// Produces five parallel tracks: tempo/time-signature metadata, piano
/// chords, melody with lyric annotations, a string pad, and drums.
pub fn render_song_with_rng(
    composition: &Composition,
    rng: &mut impl Rng,
) -> Result<Vec<u8>, ScoreError> {
    if composition.tempo == 0 {
        return Err(ScoreError::InvalidTempo(composition.tempo));
    }

    let style = DrumStyle::from_name(&composition.style);
    let total_bars = composition.total_bars();
    log::info!(
        "Assembling '{}': {} bars, {} BPM, {} drums",
        composition.title,
        total_bars,
        composition.tempo,
        style.name()
    );

    // Lyric meta events borrow their bytes, so sanitize every syllable up
    // front and let the melody track reference this buffer
    let lyrics: Vec<String> = composition
        .sections
        .iter()
        .flat_map(|s| s.melody.iter())
        .map(|n| sanitize_lyric(&n.syllable))
        .collect();

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT as u16)),
    ));
    smf.tracks.push(meta_track(composition.tempo));
    smf.tracks.push(chord_track(composition));
    smf.tracks.push(melody_track(composition, &lyrics));
    smf.tracks.push(strings_track(composition));
    smf.tracks
        .push(render_drum_track(composition.tempo, total_bars, style, rng));

    let mut bytes = Vec::new();
    smf.write(&mut bytes)
        .map_err(|e| ScoreError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Track 0: tempo and 4/4 time signature metadata only.
fn meta_track(tempo: u32) -> Track<'static> {
    vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(60_000_000 / tempo))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8)),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]
}

/// Piano track: each chord holds one full bar, sections repeat per their
/// repeat count. A bad chord symbol costs one bar of default triad, not the
/// whole track.
fn chord_track(composition: &Composition) -> Track<'static> {
    let mut track = track_prelude(b"Piano", PIANO_CHANNEL, PIANO_PROGRAM);

    for section in &composition.sections {
        for _ in 0..section.repeats {
            for symbol in &section.chords {
                let pitches = theory::resolve_or_default(symbol);
                push_block_chord(&mut track, PIANO_CHANNEL, &pitches, CHORD_VELOCITY);
            }
        }
    }

    push_end_of_track(&mut track, 0);
    track
}

/// Melody track: notes laid out sequentially with lyric syllables attached;
/// rests advance the cursor silently.
fn melody_track<'a>(composition: &Composition, lyrics: &'a [String]) -> Track<'a> {
    let mut track = track_prelude(b"Melody", MELODY_CHANNEL, MELODY_PROGRAM);

    let mut pending: u32 = 0;
    let mut lyric_index = 0;

    for section in &composition.sections {
        for note in &section.melody {
            let syllable = &lyrics[lyric_index];
            lyric_index += 1;

            let duration = duration_ticks(note.duration);
            if note.is_rest() {
                pending += duration;
                continue;
            }

            let key = melody_pitch(note);
            track.push(TrackEvent {
                delta: u28::new(pending),
                kind: TrackEventKind::Midi {
                    channel: u4::new(MELODY_CHANNEL),
                    message: MidiMessage::NoteOn {
                        key: u7::new(key),
                        vel: u7::new(MELODY_VELOCITY),
                    },
                },
            });
            pending = 0;

            if !syllable.is_empty() {
                track.push(TrackEvent {
                    delta: u28::new(0),
                    kind: TrackEventKind::Meta(MetaMessage::Lyric(syllable.as_bytes())),
                });
            }

            track.push(TrackEvent {
                delta: u28::new(duration),
                kind: TrackEventKind::Midi {
                    channel: u4::new(MELODY_CHANNEL),
                    message: MidiMessage::NoteOff {
                        key: u7::new(key),
                        vel: u7::new(0),
                    },
                },
            });
        }
    }

    // A trailing rest still counts toward the track's elapsed time
    push_end_of_track(&mut track, pending);
    track
}

/// String pad track: a sustained root+fifth dyad per chord slot, on the same
/// bar grid as the piano.
fn strings_track(composition: &Composition) -> Track<'static> {
    let mut track = track_prelude(b"Strings", STRINGS_CHANNEL, STRINGS_PROGRAM);

    for section in &composition.sections {
        for _ in 0..section.repeats {
            for symbol in &section.chords {
                let (root, fifth) = theory::pad_dyad_or_default(symbol);
                push_block_chord(&mut track, STRINGS_CHANNEL, &[root, fifth], PAD_VELOCITY);
            }
        }
    }

    push_end_of_track(&mut track, 0);
    track
}

/// Track name and program change, shared by every instrument track.
fn track_prelude(name: &'static [u8], channel: u8, program: u8) -> Track<'static> {
    vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(name)),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel: u4::new(channel),
                message: MidiMessage::ProgramChange {
                    program: u7::new(program),
                },
            },
        },
    ]
}

/// Simultaneous note-ons, hold for one bar, simultaneous note-offs. The bar
/// length rides on the first note-off's delta.
fn push_block_chord<'a>(track: &mut Track<'a>, channel: u8, pitches: &[u8], vel: u8) {
    for &pitch in pitches {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel: u4::new(channel),
                message: MidiMessage::NoteOn {
                    key: u7::new(pitch),
                    vel: u7::new(vel),
                },
            },
        });
    }
    for (i, &pitch) in pitches.iter().enumerate() {
        let delta = if i == 0 { BAR_TICKS } else { 0 };
        track.push(TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(channel),
                message: MidiMessage::NoteOff {
                    key: u7::new(pitch),
                    vel: u7::new(0),
                },
            },
        });
    }
}

fn push_end_of_track(track: &mut Track, delta: u32) {
    track.push(TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
}

/// Melody pitch with the local-recovery policy: unparseable names substitute
/// middle C rather than aborting the track.
fn melody_pitch(note: &MelodyNote) -> u8 {
    match theory::parse_pitch(&note.pitch) {
        Ok(key) => key,
        Err(e) => {
            log::warn!("Melody pitch '{}' not parseable ({}), using C4", note.pitch, e);
            60
        }
    }
}

/// Convert a duration in quarter notes to ticks. Non-finite or non-positive
/// durations degrade to one quarter note.
fn duration_ticks(quarter_notes: f64) -> u32 {
    if !quarter_notes.is_finite() || quarter_notes <= 0.0 {
        return TICKS_PER_BEAT;
    }
    (quarter_notes * TICKS_PER_BEAT as f64).round() as u32
}

/// MIDI lyric meta events are not reliably Unicode-safe, so replace anything
/// outside printable ASCII.
fn sanitize_lyric(syllable: &str) -> String {
    syllable
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}
