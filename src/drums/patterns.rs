// Style pattern library - one bar of percussion events per style
// Each generator returns absolute-tick events, deduplicated and sorted

use rand::Rng;

use crate::config::TICKS_PER_BEAT;

use super::kit::{velocity, DrumEvent, DrumNote};

const QUARTER: u32 = TICKS_PER_BEAT;
const EIGHTH: u32 = QUARTER / 2;
const SIXTEENTH: u32 = QUARTER / 4;
const TRIPLET: u32 = QUARTER / 3;

/// Standard strike length in ticks; percussion is struck, not held.
const HIT: u32 = 40;
/// Tighter strike for the faster electronic/trap grids.
const HIT_SHORT: u32 = 30;

/// The closed set of supported drum styles.
///
/// Dispatch is an exhaustive match so adding or removing a style is a
/// compile-checked change rather than a silent runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrumStyle {
    Basic,
    FourOnFloor,
    Trap,
    Latin,
    Pop,
    Rock,
    Jazz,
    Electronic,
    HipHop,
    RnB,
}

impl DrumStyle {
    /// Parse a style tag, normalizing case, spaces, and hyphens.
    /// Returns `None` for anything outside the closed set.
    pub fn parse(name: &str) -> Option<DrumStyle> {
        let normalized: String = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "basic" => Some(DrumStyle::Basic),
            "four_on_floor" | "four_on_the_floor" | "house" => Some(DrumStyle::FourOnFloor),
            "trap" => Some(DrumStyle::Trap),
            "latin" => Some(DrumStyle::Latin),
            "pop" => Some(DrumStyle::Pop),
            "rock" => Some(DrumStyle::Rock),
            "jazz" => Some(DrumStyle::Jazz),
            "electronic" | "edm" => Some(DrumStyle::Electronic),
            "hip_hop" | "hiphop" => Some(DrumStyle::HipHop),
            "r_and_b" | "rnb" | "r&b" => Some(DrumStyle::RnB),
            _ => None,
        }
    }

    /// Parse a style tag, falling back to `Basic` for unknown names.
    /// An unrecognized style degrades the groove, never the render.
    pub fn from_name(name: &str) -> DrumStyle {
        DrumStyle::parse(name).unwrap_or_else(|| {
            log::warn!("Unknown drum style '{}', falling back to basic", name);
            DrumStyle::Basic
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            DrumStyle::Basic => "basic",
            DrumStyle::FourOnFloor => "four_on_floor",
            DrumStyle::Trap => "trap",
            DrumStyle::Latin => "latin",
            DrumStyle::Pop => "pop",
            DrumStyle::Rock => "rock",
            DrumStyle::Jazz => "jazz",
            DrumStyle::Electronic => "electronic",
            DrumStyle::HipHop => "hip_hop",
            DrumStyle::RnB => "r_and_b",
        }
    }
}

/// Generate one bar of percussion events for the given style.
///
/// Events lie in `[0, bar_len)`, carry no duplicate `(tick, instrument)`
/// pairs, and come back sorted by tick. The RNG drives stylistic variation
/// only; pass a seeded generator for reproducible bars.
pub fn generate_bar_pattern(style: DrumStyle, bar_len: u32, rng: &mut impl Rng) -> Vec<DrumEvent> {
    let events = match style {
        DrumStyle::Basic => basic_bar(bar_len),
        DrumStyle::FourOnFloor => four_on_floor_bar(),
        DrumStyle::Trap => trap_bar(bar_len, rng),
        DrumStyle::Latin => latin_bar(),
        DrumStyle::Pop => pop_bar(rng),
        DrumStyle::Rock => rock_bar(rng),
        DrumStyle::Jazz => jazz_bar(rng),
        DrumStyle::Electronic => electronic_bar(rng),
        DrumStyle::HipHop => hip_hop_bar(rng),
        DrumStyle::RnB => rnb_bar(rng),
    };

    finalize(events, bar_len)
}

/// Enforce the shared bar invariants: in-range ticks, no duplicate
/// `(tick, instrument)` pairs (higher velocity wins), ascending order.
fn finalize(mut events: Vec<DrumEvent>, bar_len: u32) -> Vec<DrumEvent> {
    events.retain(|e| e.tick < bar_len);
    events.sort_by_key(|e| (e.tick, e.note, std::cmp::Reverse(e.velocity)));
    events.dedup_by(|next, prev| next.tick == prev.tick && next.note == prev.note);
    events
}

/// Basic rock/pop skeleton: kick, hihat, snare, hihat, hihat, kick, snare,
/// hihat at eighth-note spacing, over a full eighth-note hi-hat underlay.
fn basic_bar(bar_len: u32) -> Vec<DrumEvent> {
    let mut events = vec![
        DrumEvent::new(0, DrumNote::Kick, velocity::ACCENT, HIT),
        DrumEvent::new(EIGHTH, DrumNote::ClosedHihat, velocity::NORMAL, HIT),
        DrumEvent::new(QUARTER, DrumNote::Snare, velocity::ACCENT, HIT),
        DrumEvent::new(QUARTER + EIGHTH, DrumNote::ClosedHihat, velocity::NORMAL, HIT),
        DrumEvent::new(QUARTER * 2, DrumNote::ClosedHihat, velocity::NORMAL, HIT),
        DrumEvent::new(QUARTER * 2 + EIGHTH, DrumNote::Kick, velocity::ACCENT, HIT),
        DrumEvent::new(QUARTER * 3, DrumNote::Snare, velocity::ACCENT, HIT),
        DrumEvent::new(QUARTER * 3 + EIGHTH, DrumNote::ClosedHihat, velocity::NORMAL, HIT),
    ];

    // Soft hi-hat underlay on every eighth; the dedup rule keeps the louder
    // skeleton hats where the layers overlap
    let mut tick = 0;
    while tick < bar_len {
        events.push(DrumEvent::new(tick, DrumNote::ClosedHihat, velocity::SOFT, HIT));
        tick += EIGHTH;
    }

    events
}

/// Four-on-the-floor (disco, house): kick on all four beats, snare on 2 and
/// 4, open hats on the off-beat eighths, closed hats on all sixteenths.
fn four_on_floor_bar() -> Vec<DrumEvent> {
    let mut events = Vec::new();

    for beat in 0..4 {
        events.push(DrumEvent::new(beat * QUARTER, DrumNote::Kick, velocity::ACCENT, HIT));
    }

    events.push(DrumEvent::new(QUARTER, DrumNote::Snare, velocity::NORMAL, HIT));
    events.push(DrumEvent::new(QUARTER * 3, DrumNote::Snare, velocity::NORMAL, HIT));

    for beat in 0..4 {
        events.push(DrumEvent::new(
            beat * QUARTER + EIGHTH,
            DrumNote::OpenHihat,
            velocity::SOFT,
            HIT,
        ));
    }

    for i in 0..16 {
        let vel = if i % 4 == 0 { velocity::NORMAL } else { velocity::SOFT };
        events.push(DrumEvent::new(i * SIXTEENTH, DrumNote::ClosedHihat, vel, HIT));
    }

    events
}

/// Trap: sparse syncopated kick, snare around beat 3, and the signature
/// 24-subdivision rolling hi-hats with a periodic accent cycle.
fn trap_bar(bar_len: u32, rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    for tick in [0, QUARTER + EIGHTH, QUARTER * 2, QUARTER * 3 + EIGHTH] {
        events.push(DrumEvent::new(tick, DrumNote::Kick, velocity::ACCENT, HIT_SHORT));
    }

    let mut snare_ticks = vec![QUARTER * 2];
    if rng.random_bool(0.5) {
        snare_ticks.push(QUARTER * 3 + EIGHTH);
    }
    for &tick in &snare_ticks {
        events.push(DrumEvent::new(tick, DrumNote::Snare, velocity::ACCENT, HIT_SHORT));
    }

    // Rolling hats: every 6th hit strong, every 3rd medium, periodic open swap
    let total_hats = 24;
    let base_velocity = velocity::NORMAL - 25;
    for i in 0..total_hats {
        let tick = bar_len * i / total_hats;
        let boost = if i % 6 == 0 {
            30
        } else if i % 3 == 0 {
            15
        } else {
            0
        };
        let note = if i % 12 == 6 {
            DrumNote::OpenHihat
        } else {
            DrumNote::ClosedHihat
        };
        events.push(DrumEvent::new(tick, note, (base_velocity + boost).min(127), HIT_SHORT));
    }

    for &tick in &snare_ticks {
        if rng.random_bool(0.3) {
            events.push(DrumEvent::new(tick, DrumNote::Clap, velocity::NORMAL, HIT_SHORT));
        }
    }

    events
}

/// Latin: 3-2 son clave ostinato, conga call-and-response, continuous
/// shaker eighths, cowbell on 2 and 4, light kick/snare foundation.
fn latin_bar() -> Vec<DrumEvent> {
    let mut events = Vec::new();

    for tick in [0, QUARTER, QUARTER * 2, QUARTER * 2 + EIGHTH, QUARTER * 3 + EIGHTH] {
        events.push(DrumEvent::new(tick, DrumNote::Clave, velocity::ACCENT, HIT));
    }

    let congas = [
        (0, DrumNote::CongaLow, velocity::ACCENT),
        (EIGHTH, DrumNote::CongaHigh, velocity::NORMAL),
        (QUARTER, DrumNote::CongaMid, velocity::NORMAL),
        (QUARTER + EIGHTH, DrumNote::CongaHigh, velocity::SOFT),
        (QUARTER * 2, DrumNote::CongaLow, velocity::ACCENT),
        (QUARTER * 2 + EIGHTH, DrumNote::CongaHigh, velocity::NORMAL),
        (QUARTER * 3, DrumNote::CongaMid, velocity::NORMAL),
        (QUARTER * 3 + EIGHTH, DrumNote::CongaHigh, velocity::SOFT),
    ];
    for (tick, note, vel) in congas {
        events.push(DrumEvent::new(tick, note, vel, HIT));
    }

    for i in 0..8 {
        let vel = if i % 2 == 0 { velocity::NORMAL } else { velocity::SOFT };
        events.push(DrumEvent::new(i * EIGHTH, DrumNote::Shaker, vel, HIT));
    }

    events.push(DrumEvent::new(QUARTER, DrumNote::Cowbell, velocity::NORMAL, HIT));
    events.push(DrumEvent::new(QUARTER * 3, DrumNote::Cowbell, velocity::NORMAL, HIT));

    events.push(DrumEvent::new(0, DrumNote::Kick, velocity::NORMAL, HIT));
    events.push(DrumEvent::new(QUARTER * 2 + EIGHTH, DrumNote::Kick, velocity::NORMAL, HIT));
    events.push(DrumEvent::new(QUARTER, DrumNote::Snare, velocity::NORMAL, HIT));
    events.push(DrumEvent::new(QUARTER * 3, DrumNote::Snare, velocity::NORMAL, HIT));

    events
}

/// Contemporary pop: snare+clap backbeat, straight eighth hats with
/// occasional sixteenth fills, tambourine on the off-beats.
fn pop_bar(rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    let last_kick = QUARTER * 3 + if rng.random_bool(0.5) { EIGHTH } else { 0 };
    for tick in [0, QUARTER + EIGHTH, QUARTER * 2 + EIGHTH, last_kick] {
        events.push(DrumEvent::new(tick, DrumNote::Kick, velocity::ACCENT, HIT));
    }

    for tick in [QUARTER, QUARTER * 3] {
        events.push(DrumEvent::new(tick, DrumNote::Snare, velocity::ACCENT, HIT));
        events.push(DrumEvent::new(tick, DrumNote::Clap, velocity::NORMAL, HIT));
    }

    for i in 0..8 {
        let vel = if i % 2 == 0 { velocity::NORMAL } else { velocity::SOFT };
        events.push(DrumEvent::new(i * EIGHTH, DrumNote::ClosedHihat, vel, HIT));
    }

    // Sixteenth-note hat fills in the second half of the bar
    if rng.random_bool(0.5) {
        for i in 8..16 {
            if rng.random_bool(0.3) {
                events.push(DrumEvent::new(
                    i * SIXTEENTH,
                    DrumNote::ClosedHihat,
                    velocity::SOFT,
                    HIT,
                ));
            }
        }
    }

    for beat in 0..4 {
        events.push(DrumEvent::new(
            beat * QUARTER + EIGHTH,
            DrumNote::Tambourine,
            velocity::SOFT,
            HIT,
        ));
    }

    events
}

/// Rock: driving kick, backbeat snare, eighth-note hats or ride, with
/// occasional crash accents and end-of-bar tom fills.
fn rock_bar(rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    for tick in [
        0,
        QUARTER * 2,
        QUARTER * 2 + EIGHTH + SIXTEENTH,
        QUARTER * 3 + EIGHTH,
    ] {
        events.push(DrumEvent::new(tick, DrumNote::Kick, velocity::ACCENT, HIT));
    }

    events.push(DrumEvent::new(QUARTER, DrumNote::Snare, velocity::ACCENT, HIT));
    events.push(DrumEvent::new(QUARTER * 3, DrumNote::Snare, velocity::ACCENT, HIT));

    let cymbal = if rng.random_bool(0.5) {
        DrumNote::ClosedHihat
    } else {
        DrumNote::Ride
    };
    for i in 0..8 {
        let vel = if i % 2 == 0 { velocity::ACCENT } else { velocity::NORMAL };
        events.push(DrumEvent::new(i * EIGHTH, cymbal, vel, HIT));
    }

    if rng.random_bool(0.3) {
        let crash_tick = if rng.random_bool(0.5) { QUARTER * 2 } else { 0 };
        events.push(DrumEvent::new(crash_tick, DrumNote::Crash, velocity::ACCENT, HIT));
    }

    if rng.random_bool(0.3) {
        let toms = [DrumNote::TomHigh, DrumNote::TomMid, DrumNote::TomLow];
        let start = QUARTER * 3 + EIGHTH;
        for (i, &tom) in toms.iter().enumerate() {
            events.push(DrumEvent::new(
                start + i as u32 * SIXTEENTH,
                tom,
                velocity::ACCENT,
                HIT,
            ));
        }
    }

    events
}

/// Jazz swing: triplet ride pattern, pedal hi-hat on 2 and 4, sparse
/// syncopated kick, and improvised snare comping.
fn jazz_bar(rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    for beat in 0..4 {
        let beat_tick = beat * QUARTER;
        events.push(DrumEvent::new(beat_tick, DrumNote::Ride, velocity::ACCENT, HIT));
        // Swung "and" lands on the last triplet of the beat
        events.push(DrumEvent::new(
            beat_tick + TRIPLET * 2,
            DrumNote::Ride,
            velocity::NORMAL,
            HIT,
        ));
    }

    if rng.random_bool(0.3) {
        for tick in [QUARTER, QUARTER * 3] {
            if rng.random_bool(0.5) {
                events.push(DrumEvent::new(tick, DrumNote::RideBell, velocity::ACCENT, HIT));
            }
        }
    }

    events.push(DrumEvent::new(QUARTER, DrumNote::PedalHihat, velocity::NORMAL, HIT));
    events.push(DrumEvent::new(QUARTER * 3, DrumNote::PedalHihat, velocity::NORMAL, HIT));

    let mut kick_ticks = Vec::new();
    if rng.random_bool(0.5) {
        kick_ticks.push(0);
    }
    if rng.random_bool(0.3) {
        kick_ticks.push(QUARTER * 2 + TRIPLET);
    }
    if kick_ticks.is_empty() {
        // Feathered beat-1 kick keeps the pulse when both draws miss
        kick_ticks.push(0);
    }
    for tick in kick_ticks {
        events.push(DrumEvent::new(tick, DrumNote::Kick, velocity::NORMAL, HIT));
    }

    let comp_options: [&[u32]; 3] = [
        &[QUARTER + TRIPLET, QUARTER * 3 + TRIPLET],
        &[QUARTER * 2, QUARTER * 3 + TRIPLET * 2],
        &[QUARTER + TRIPLET * 2, QUARTER * 2 + TRIPLET, QUARTER * 3 + TRIPLET * 2],
    ];
    let comp = comp_options[rng.random_range(0..comp_options.len())];
    for &tick in comp {
        let vel = [velocity::GHOST, velocity::NORMAL, velocity::ACCENT][rng.random_range(0..3)];
        events.push(DrumEvent::new(tick, DrumNote::Snare, vel, HIT));
    }

    events
}

/// Electronic/EDM: four-on-the-floor kick, clap or snare backbeat, steady
/// sixteenth or alternating open/closed hats, occasional effect hits.
fn electronic_bar(rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    for beat in 0..4 {
        events.push(DrumEvent::new(beat * QUARTER, DrumNote::Kick, velocity::ACCENT, HIT_SHORT));
    }

    let backbeat = if rng.random_bool(0.5) {
        DrumNote::Clap
    } else {
        DrumNote::Snare
    };
    events.push(DrumEvent::new(QUARTER, backbeat, velocity::NORMAL, HIT_SHORT));
    events.push(DrumEvent::new(QUARTER * 3, backbeat, velocity::NORMAL, HIT_SHORT));

    if rng.random_bool(0.5) {
        for i in 0..16 {
            let vel = if i % 4 == 0 { velocity::ACCENT } else { velocity::SOFT };
            events.push(DrumEvent::new(i * SIXTEENTH, DrumNote::ClosedHihat, vel, HIT_SHORT));
        }
    } else {
        for i in 0..8 {
            let note = if i % 2 == 0 {
                DrumNote::ClosedHihat
            } else {
                DrumNote::OpenHihat
            };
            events.push(DrumEvent::new(i * EIGHTH, note, velocity::NORMAL, HIT_SHORT));
        }
    }

    if rng.random_bool(0.5) {
        let effects = [
            (QUARTER + EIGHTH + SIXTEENTH, DrumNote::TomHigh),
            (QUARTER * 3 + EIGHTH, DrumNote::TomMid),
        ];
        for (tick, note) in effects {
            if rng.random_bool(0.5) {
                events.push(DrumEvent::new(tick, note, velocity::SOFT, HIT_SHORT));
            }
        }
    }

    // Rhythmic pickup into the next bar
    if rng.random_bool(0.3) {
        for i in 0..3 {
            events.push(DrumEvent::new(
                QUARTER * 3 + (i + 1) * SIXTEENTH,
                DrumNote::KickAlt,
                velocity::NORMAL,
                HIT_SHORT,
            ));
        }
    }

    events
}

/// Hip-hop: a boom-bap kick variant, snare+clap backbeat, grooving eighth
/// hats, ghost snares, and the occasional auxiliary percussion accent.
fn hip_hop_bar(rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    let kick_options: [&[u32]; 3] = [
        // Classic boom-bap
        &[0, QUARTER + EIGHTH, QUARTER * 2, QUARTER * 3 + EIGHTH],
        // Syncopated
        &[0, QUARTER * 2, QUARTER * 2 + EIGHTH + SIXTEENTH, QUARTER * 3 + EIGHTH],
        // Off-beats after the downbeat
        &[0, QUARTER + EIGHTH, QUARTER * 2 + EIGHTH, QUARTER * 3 + EIGHTH],
    ];
    let kicks = kick_options[rng.random_range(0..kick_options.len())];
    for &tick in kicks {
        events.push(DrumEvent::new(tick, DrumNote::Kick, velocity::ACCENT, HIT));
    }

    for tick in [QUARTER, QUARTER * 3] {
        events.push(DrumEvent::new(tick, DrumNote::Snare, velocity::ACCENT, HIT));
        events.push(DrumEvent::new(tick, DrumNote::Clap, velocity::NORMAL, HIT));
    }

    for i in 0..8 {
        let tick = i * EIGHTH;
        let vel = if tick % QUARTER == 0 { velocity::NORMAL } else { velocity::SOFT };
        events.push(DrumEvent::new(tick, DrumNote::ClosedHihat, vel, HIT));
    }

    for tick in [QUARTER + SIXTEENTH, QUARTER * 3 + SIXTEENTH] {
        if rng.random_bool(0.3) {
            events.push(DrumEvent::new(tick, DrumNote::Snare, velocity::GHOST, HIT));
        }
    }

    let perc_options = [DrumNote::Tambourine, DrumNote::Cowbell, DrumNote::Clave];
    let perc = perc_options[rng.random_range(0..perc_options.len())];
    for tick in [QUARTER + EIGHTH, QUARTER * 3 + EIGHTH] {
        if rng.random_bool(0.4) {
            events.push(DrumEvent::new(tick, perc, velocity::SOFT, HIT));
        }
    }

    events
}

/// R&B: subtly syncopated kick, snare/rimshot backbeat, sixteenth-note
/// groove hats with open accents, and ghost snares for texture.
fn rnb_bar(rng: &mut impl Rng) -> Vec<DrumEvent> {
    let mut events = Vec::new();

    let mut kick_ticks = vec![0, QUARTER * 2];
    if rng.random_bool(0.5) {
        kick_ticks.push(QUARTER + EIGHTH);
    }
    if rng.random_bool(0.5) {
        kick_ticks.push(QUARTER * 3 + EIGHTH);
    }
    for tick in kick_ticks {
        events.push(DrumEvent::new(tick, DrumNote::Kick, velocity::NORMAL, HIT));
    }

    for tick in [QUARTER, QUARTER * 3] {
        let note = if rng.random_bool(0.5) {
            DrumNote::Snare
        } else {
            DrumNote::SnareRim
        };
        events.push(DrumEvent::new(tick, note, velocity::NORMAL, HIT));
    }

    for i in 0..16 {
        let vel = if i % 4 == 0 {
            velocity::ACCENT
        } else if i % 2 == 0 {
            velocity::NORMAL
        } else {
            velocity::SOFT
        };
        let note = if (i == 7 || i == 15) && rng.random_bool(0.5) {
            DrumNote::OpenHihat
        } else {
            DrumNote::ClosedHihat
        };
        events.push(DrumEvent::new(i * SIXTEENTH, note, vel, HIT));
    }

    for tick in [
        SIXTEENTH,
        QUARTER + SIXTEENTH,
        QUARTER * 2 + SIXTEENTH,
        QUARTER * 3 + SIXTEENTH,
    ] {
        if rng.random_bool(0.4) {
            events.push(DrumEvent::new(tick, DrumNote::Snare, velocity::GHOST, HIT));
        }
    }

    if rng.random_bool(0.5) {
        for tick in [QUARTER + EIGHTH, QUARTER * 3 + EIGHTH] {
            events.push(DrumEvent::new(tick, DrumNote::SnareRim, velocity::SOFT, HIT));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BAR_TICKS;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::collections::HashSet;

    const ALL_STYLES: [DrumStyle; 10] = [
        DrumStyle::Basic,
        DrumStyle::FourOnFloor,
        DrumStyle::Trap,
        DrumStyle::Latin,
        DrumStyle::Pop,
        DrumStyle::Rock,
        DrumStyle::Jazz,
        DrumStyle::Electronic,
        DrumStyle::HipHop,
        DrumStyle::RnB,
    ];

    fn is_backbeat(note: DrumNote) -> bool {
        matches!(note, DrumNote::Snare | DrumNote::SnareRim | DrumNote::Clap)
    }

    #[test]
    fn test_all_styles_satisfy_bar_invariants() {
        for style in ALL_STYLES {
            for trial in 0..100u64 {
                let mut rng = Pcg64Mcg::seed_from_u64(trial);
                let events = generate_bar_pattern(style, BAR_TICKS, &mut rng);

                assert!(!events.is_empty(), "{:?} produced an empty bar", style);

                // Ticks in range and non-decreasing
                let mut last_tick = 0;
                for event in &events {
                    assert!(event.tick < BAR_TICKS, "{:?} event outside bar", style);
                    assert!(event.tick >= last_tick, "{:?} events out of order", style);
                    assert!(event.velocity <= 127);
                    last_tick = event.tick;
                }

                // No duplicate (tick, instrument) pairs
                let mut seen = HashSet::new();
                for event in &events {
                    assert!(
                        seen.insert((event.tick, event.note)),
                        "{:?} duplicated ({}, {:?})",
                        style,
                        event.tick,
                        event.note
                    );
                }

                // Kick/backbeat backbone present in every style
                assert!(
                    events.iter().any(|e| e.note == DrumNote::Kick),
                    "{:?} bar without a kick",
                    style
                );
                assert!(
                    events.iter().any(|e| is_backbeat(e.note)),
                    "{:?} bar without a snare equivalent",
                    style
                );
            }
        }
    }

    #[test]
    fn test_four_on_floor_kick_and_snare_placement() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let events = generate_bar_pattern(DrumStyle::FourOnFloor, 1920, &mut rng);

        let kick_ticks: Vec<u32> = events
            .iter()
            .filter(|e| e.note == DrumNote::Kick)
            .map(|e| e.tick)
            .collect();
        assert_eq!(kick_ticks, vec![0, 480, 960, 1440]);

        let snare_ticks: Vec<u32> = events
            .iter()
            .filter(|e| e.note == DrumNote::Snare)
            .map(|e| e.tick)
            .collect();
        assert_eq!(snare_ticks, vec![480, 1440]);
    }

    #[test]
    fn test_basic_has_full_eighth_hat_underlay() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let events = generate_bar_pattern(DrumStyle::Basic, BAR_TICKS, &mut rng);

        for i in 0..8 {
            let tick = i * EIGHTH;
            assert!(
                events
                    .iter()
                    .any(|e| e.tick == tick && e.note == DrumNote::ClosedHihat),
                "missing hat at tick {}",
                tick
            );
        }

        // Skeleton hats keep their louder velocity through the merge
        let skeleton_hat = events
            .iter()
            .find(|e| e.tick == EIGHTH && e.note == DrumNote::ClosedHihat)
            .unwrap();
        assert_eq!(skeleton_hat.velocity, velocity::NORMAL);
    }

    #[test]
    fn test_trap_hat_accent_cycle() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let events = generate_bar_pattern(DrumStyle::Trap, BAR_TICKS, &mut rng);

        // 24-subdivision roll: hit 0 is boosted, hit 6 swaps to open
        let first_hat = events
            .iter()
            .find(|e| e.tick == 0 && e.note == DrumNote::ClosedHihat)
            .expect("trap bar should open with a closed hat");
        assert_eq!(first_hat.velocity, 95);

        let open_tick = BAR_TICKS * 6 / 24;
        assert!(events
            .iter()
            .any(|e| e.tick == open_tick && e.note == DrumNote::OpenHihat));
    }

    #[test]
    fn test_latin_clave_positions() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let events = generate_bar_pattern(DrumStyle::Latin, BAR_TICKS, &mut rng);

        let clave_ticks: Vec<u32> = events
            .iter()
            .filter(|e| e.note == DrumNote::Clave)
            .map(|e| e.tick)
            .collect();
        assert_eq!(clave_ticks, vec![0, 480, 960, 1200, 1680]);

        // Shaker runs on every eighth
        let shaker_count = events.iter().filter(|e| e.note == DrumNote::Shaker).count();
        assert_eq!(shaker_count, 8);
    }

    #[test]
    fn test_jazz_always_keeps_the_pulse() {
        // Across many seeds the kick may be sparse but never absent
        for trial in 0..200u64 {
            let mut rng = Pcg64Mcg::seed_from_u64(trial);
            let events = generate_bar_pattern(DrumStyle::Jazz, BAR_TICKS, &mut rng);
            assert!(events.iter().any(|e| e.note == DrumNote::Kick));
            assert!(events.iter().any(|e| e.note == DrumNote::Ride));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        for style in ALL_STYLES {
            let mut a = Pcg64Mcg::seed_from_u64(99);
            let mut b = Pcg64Mcg::seed_from_u64(99);
            assert_eq!(
                generate_bar_pattern(style, BAR_TICKS, &mut a),
                generate_bar_pattern(style, BAR_TICKS, &mut b)
            );
        }
    }

    #[test]
    fn test_unknown_style_falls_back_to_basic() {
        assert_eq!(DrumStyle::from_name("totally_unknown_style"), DrumStyle::Basic);
        assert_eq!(DrumStyle::parse("totally_unknown_style"), None);

        // Fallback bar has the same structural shape as a basic bar
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let fallback = generate_bar_pattern(
            DrumStyle::from_name("totally_unknown_style"),
            1920,
            &mut rng,
        );
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let basic = generate_bar_pattern(DrumStyle::Basic, 1920, &mut rng);
        assert_eq!(fallback, basic);
    }

    #[test]
    fn test_style_name_normalization() {
        assert_eq!(DrumStyle::from_name("Hip Hop"), DrumStyle::HipHop);
        assert_eq!(DrumStyle::from_name("hip-hop"), DrumStyle::HipHop);
        assert_eq!(DrumStyle::from_name("R&B"), DrumStyle::RnB);
        assert_eq!(DrumStyle::from_name("Four On The Floor"), DrumStyle::FourOnFloor);
        assert_eq!(DrumStyle::from_name("  JAZZ  "), DrumStyle::Jazz);
    }

    #[test]
    fn test_style_name_round_trip() {
        for style in ALL_STYLES {
            assert_eq!(DrumStyle::parse(style.name()), Some(style));
        }
    }
}
