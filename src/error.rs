use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Pitch {pitch} is outside the MIDI range 0-127")]
    PitchOutOfRange { pitch: i32 },

    #[error("Velocity {velocity} is outside the MIDI range 0-127")]
    VelocityOutOfRange { velocity: u8 },

    #[error("Tempo of {micros} microseconds per beat does not fit in 24 bits")]
    TempoOutOfRange { micros: u32 },

    #[error("Delta time of {ticks} ticks does not fit in 28 bits")]
    DeltaOutOfRange { ticks: u32 },

    #[error("MIDI error: {0}")]
    Midi(#[from] midly::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
