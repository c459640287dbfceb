//! Chord-analysis documents: the boundary with the analysis service
//!
//! A document is the JSON body the chord-analysis service returns for a
//! track, already fetched and stored locally. It is validated into a
//! [`ChordChart`] or refused with [`Error::InputUnavailable`].

use crate::compiler::grid::Timeline;
use crate::compiler::key::NO_KEY;
use crate::compiler::ChordChart;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Placeholder the service reports for an unknown key
const KEY_PLACEHOLDER: &str = "N/A";

/// Suffix of auto-generated artist channel names
const TOPIC_SUFFIX: &str = " - Topic";

/// Raw chord-analysis document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    /// Newline-separated `beat;symbol;_;_` records
    pub chords: Option<String>,
    pub derived_key: Option<String>,
    pub bar_length: Option<u32>,
    /// Absent until the service has analysed the track
    pub derived_bpm: Option<f64>,
}

impl AnalysisDocument {
    /// Parse a document, transparently decompressing gzip input
    pub fn from_reader<R: Read>(mut input: R) -> Result<Self> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        if data.starts_with(&GZIP_MAGIC) {
            debug!("analysis input is gzip-compressed");
            let mut decompressed = Vec::new();
            GzDecoder::new(data.as_slice()).read_to_end(&mut decompressed)?;
            data = decompressed;
        }

        Ok(serde_json::from_slice(&data)?)
    }

    /// Parse a document from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_reader(file)
    }

    /// Validate the document into compiler input
    pub fn into_chart(self) -> Result<ChordChart> {
        let bpm = self.derived_bpm.ok_or_else(|| {
            Error::InputUnavailable("chord analysis has not been computed (no derivedBpm)".into())
        })?;
        let chords = self
            .chords
            .ok_or_else(|| Error::InputUnavailable("analysis has no chords".into()))?;
        let bar_length = self
            .bar_length
            .ok_or_else(|| Error::InputUnavailable("analysis has no barLength".into()))?;

        if !(bpm.is_finite() && bpm > 0.0) {
            return Err(Error::InvalidInput(format!("unusable tempo {} BPM", bpm)));
        }

        let key = match self.derived_key {
            Some(key) if key != KEY_PLACEHOLDER => key,
            _ => NO_KEY.to_string(),
        };

        info!(
            "analysis: key {}, bar length {}, tempo {} BPM",
            key, bar_length, bpm
        );

        Ok(ChordChart {
            timeline: Timeline::parse(&chords),
            key,
            tempo: bpm,
            bar_length,
        })
    }
}

/// Output file name for a track: `"{artist} - {title}.mid"`.
///
/// A `" - Topic"` suffix on the artist is dropped and path separators and
/// other characters file systems reject are replaced with `_`.
pub fn output_file_name(title: &str, artist: &str) -> String {
    let artist = artist.split(TOPIC_SUFFIX).next().unwrap_or(artist);
    format!("{} - {}.mid", artist, title)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
