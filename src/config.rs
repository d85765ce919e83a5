// Engine-wide MIDI timing constants

/// MIDI pulses per quarter note. 480 gives comfortable resolution for
/// sixteenth notes, triplets, and the 24-subdivision trap hi-hat grid.
pub const TICKS_PER_BEAT: u32 = 480;

/// Beats per bar. The engine only supports 4/4 time.
pub const BEATS_PER_BAR: u32 = 4;

/// Length of one bar in ticks. Every rendered bar advances the delta-time
/// cursor by exactly this amount.
pub const BAR_TICKS: u32 = TICKS_PER_BEAT * BEATS_PER_BAR;

/// Fallback tempo in BPM when the composition layer supplies none.
pub const DEFAULT_TEMPO: u32 = 120;
