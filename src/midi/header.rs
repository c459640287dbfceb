//! Standard MIDI File header settings

use midly::num::u15;
use midly::{Format, Header, Timing};

/// Ticks per quarter note
pub const TICKS_PER_BEAT: u16 = 480;

/// Header of every file the writer produces: format 0, metrical timing
pub fn single_track() -> Header {
    Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    )
}

/// Format number as stored in the `MThd` chunk
pub fn format_code(format: Format) -> u16 {
    match format {
        Format::SingleTrack => 0,
        Format::Parallel => 1,
        Format::Sequential => 2,
    }
}

/// Ticks per quarter note, or `None` for SMPTE timecode timing
pub fn division(timing: Timing) -> Option<u16> {
    match timing {
        Timing::Metrical(ticks) => Some(ticks.as_int()),
        Timing::Timecode(..) => None,
    }
}
