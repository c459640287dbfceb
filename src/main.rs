use chordmidi::analysis::{output_file_name, AnalysisDocument};
use chordmidi::compiler::grid::Timeline;
use chordmidi::compiler::{ChordChart, CompileOptions, RestStyle, DEFAULT_VELOCITY};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chordmidi")]
#[command(version = "0.1.0")]
#[command(about = "Chord timeline to MIDI compiler", long_about = None)]
struct Args {
    /// Output MIDI file (derived from --artist and --title if omitted)
    output: Option<PathBuf>,

    /// Chord-analysis JSON document, optionally gzip-compressed (reads from stdin if not specified)
    #[arg(short, long, conflicts_with = "timeline")]
    input: Option<PathBuf>,

    /// Raw timeline file of `beat;symbol;_;_` lines instead of an analysis document
    #[arg(short, long, requires = "bpm", requires = "bar_length")]
    timeline: Option<PathBuf>,

    /// Key name for a raw timeline
    #[arg(short, long, default_value = "N")]
    key: String,

    /// Tempo in beats per minute for a raw timeline
    #[arg(long)]
    bpm: Option<f64>,

    /// Beats per bar for a raw timeline
    #[arg(long)]
    bar_length: Option<u32>,

    /// Write rests as silence instead of note-off fillers
    #[arg(long)]
    silent_rests: bool,

    /// Velocity for chord tones
    #[arg(long, default_value_t = DEFAULT_VELOCITY)]
    velocity: u8,

    /// Track title, used to name the output file
    #[arg(long)]
    title: Option<String>,

    /// Track artist, used to name the output file
    #[arg(long)]
    artist: Option<String>,
}

fn main() -> Result<(), chordmidi::Error> {
    env_logger::init();
    let args = Args::parse();

    let output = match (&args.output, &args.title, &args.artist) {
        (Some(path), _, _) => path.clone(),
        (None, Some(title), Some(artist)) => PathBuf::from(output_file_name(title, artist)),
        _ => {
            return Err(chordmidi::Error::InvalidInput(
                "an output path or both --title and --artist are required".into(),
            ))
        }
    };

    let chart = match &args.timeline {
        Some(path) => ChordChart {
            timeline: Timeline::parse(&std::fs::read_to_string(path)?),
            key: args.key.clone(),
            tempo: args.bpm.unwrap_or_default(),
            bar_length: args.bar_length.unwrap_or_default(),
        },
        None => match &args.input {
            Some(path) => AnalysisDocument::from_path(path)?.into_chart()?,
            None => AnalysisDocument::from_reader(std::io::stdin())?.into_chart()?,
        },
    };

    let compiler = chordmidi::Compiler::with_options(CompileOptions {
        velocity: args.velocity,
        rest: if args.silent_rests {
            RestStyle::Silent
        } else {
            RestStyle::Filler
        },
    });
    compiler.compile_file(&chart, &output)?;

    info!("wrote {}", output.display());
    println!("{}", output.display());

    Ok(())
}
