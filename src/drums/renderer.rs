// Pattern renderer - expands style patterns into a delta-time MIDI drum track
// Every bar consumes exactly BAR_TICKS of delta time, so bars never drift

use midly::{
    num::{u24, u28, u4, u7},
    MetaMessage, MidiMessage, Track, TrackEvent, TrackEventKind,
};
use rand::Rng;

use crate::config::BAR_TICKS;

use super::kit::{velocity, DrumNote};
use super::patterns::{generate_bar_pattern, DrumStyle};

/// MIDI channel reserved for percussion (channel 10, 0-indexed).
pub const PERCUSSION_CHANNEL: u8 = 9;

/// Strike length of the bar-one crash accent, in ticks.
const CRASH_TICKS: u32 = 50;

/// Render a drum track: one fresh pattern per bar, with a crash-cymbal
/// accent on the first downbeat.
///
/// The returned track carries its own track-name and tempo metadata. A
/// `bar_count` of zero yields a track with metadata only. `tempo_bpm` must be
/// positive; validating it is the caller's contract (the assembler rejects
/// bad tempos before calling here).
pub fn render_drum_track(
    tempo_bpm: u32,
    bar_count: u32,
    style: DrumStyle,
    rng: &mut impl Rng,
) -> Track<'static> {
    assert!(tempo_bpm > 0, "tempo must be a positive BPM value");

    let mut track: Track<'static> = Vec::new();

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Drums")),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(60_000_000 / tempo_bpm))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel: u4::new(PERCUSSION_CHANNEL),
            message: MidiMessage::ProgramChange { program: u7::new(0) },
        },
    });

    for bar in 0..bar_count {
        let events = generate_bar_pattern(style, BAR_TICKS, rng);
        let mut cursor: u32 = 0;

        // Downbeat crash on the first bar; a pattern event at tick 0 is
        // retimed to play right after it rather than dropped
        if bar == 0 {
            push_hit(&mut track, 0, DrumNote::Crash, velocity::ACCENT, CRASH_TICKS);
            cursor = CRASH_TICKS;
        }

        for event in &events {
            let start = cursor.max(event.tick);
            let duration = event.duration.min(BAR_TICKS - start);
            push_hit(
                &mut track,
                event.tick.saturating_sub(cursor),
                event.note,
                event.velocity,
                duration,
            );
            cursor = start + duration;
        }

        // Zero-velocity filler completes the bar so the next downbeat lands
        // on an exact bar boundary; the final bar gets trailing silence
        let remaining = BAR_TICKS - cursor;
        if remaining > 0 {
            push_hit(&mut track, remaining, DrumNote::Kick, 0, 0);
        }
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    track
}

/// Emit a note-on/note-off pair on the percussion channel. `on_delta` is the
/// gap since the previous message; `duration` becomes the note-off delta.
fn push_hit(track: &mut Track<'static>, on_delta: u32, note: DrumNote, vel: u8, duration: u32) {
    track.push(TrackEvent {
        delta: u28::new(on_delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(PERCUSSION_CHANNEL),
            message: MidiMessage::NoteOn {
                key: u7::new(note.gm_note()),
                vel: u7::new(vel),
            },
        },
    });
    track.push(TrackEvent {
        delta: u28::new(duration),
        kind: TrackEventKind::Midi {
            channel: u4::new(PERCUSSION_CHANNEL),
            message: MidiMessage::NoteOff {
                key: u7::new(note.gm_note()),
                vel: u7::new(0),
            },
        },
    });
}
