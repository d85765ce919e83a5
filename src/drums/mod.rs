// Drum engine
// Style pattern library and the delta-time pattern renderer

pub mod kit;
pub mod patterns;
pub mod renderer;

pub use kit::{velocity, DrumEvent, DrumNote};
pub use patterns::{generate_bar_pattern, DrumStyle};
pub use renderer::{render_drum_track, PERCUSSION_CHANNEL};
