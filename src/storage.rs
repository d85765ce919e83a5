// File system operations for storing rendered songs
// Writes the MIDI file plus a song_info.json metadata sidecar

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::score::Composition;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Metadata serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Metadata written next to each rendered MIDI file.
#[derive(Debug, Serialize)]
struct SongInfo {
    title: String,
    tempo: u32,
    style: String,
    bars: u32,
    created_at: String,
    sections: Vec<SectionInfo>,
}

#[derive(Debug, Serialize)]
struct SectionInfo {
    name: String,
    chords: usize,
    melody_notes: usize,
}

/// Save a rendered song under `<base_dir>/<safe_title>/`.
///
/// Writes `<safe_title>.mid` and a `song_info.json` sidecar, returning the
/// MIDI file's path.
pub fn save_song(
    base_dir: &Path,
    midi_bytes: &[u8],
    composition: &Composition,
) -> StorageResult<PathBuf> {
    let safe_title = sanitize_title(&composition.title);
    let song_dir = base_dir.join(&safe_title);
    fs::create_dir_all(&song_dir)?;

    let midi_path = song_dir.join(format!("{}.mid", safe_title));
    fs::write(&midi_path, midi_bytes)?;

    let info = SongInfo {
        title: composition.title.clone(),
        tempo: composition.tempo,
        style: composition.style.clone(),
        bars: composition.total_bars(),
        created_at: Utc::now().to_rfc3339(),
        sections: composition
            .sections
            .iter()
            .map(|s| SectionInfo {
                name: s.name.clone(),
                chords: s.chords.len(),
                melody_notes: s.melody.len(),
            })
            .collect(),
    };
    let info_json = serde_json::to_string_pretty(&info)?;
    fs::write(song_dir.join("song_info.json"), info_json)?;

    log::info!("Saved '{}' to {}", composition.title, midi_path.display());
    Ok(midi_path)
}

/// Reduce a title to filesystem-safe characters. Empty results fall back to
/// `"song"`, spaces become underscores.
fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        "song".to_string()
    } else {
        trimmed.replace(' ', "_")
    }
}
