use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use zero_webm::specs::EbmlSpecification;
use zero_webm::tag_parser::parse_tree_partial;
use zero_webm::{MatroskaTag, MuxConfig, ParsedElement, SimpleBlock, WebmMuxer};

/// Placeholder frame written by `init --sample-blocks`
const SAMPLE_FRAME: [u8; 8] = [0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];

#[derive(Parser, Debug)]
#[command(author, version, about = "Write and inspect live WebM init segments")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an init segment (EBML header, Segment, Info, Tracks and an open Cluster)
    Init {
        /// Path to config file (TOML format, defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File to write
        #[arg(short, long)]
        output: PathBuf,

        /// Also append two video blocks, the second one far enough away to open a new Cluster
        #[arg(long)]
        sample_blocks: bool,
    },
    /// Print the elements of an EBML file
    Inspect {
        /// File to read
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Init { config, output, sample_blocks } => init(config, output, sample_blocks),
        Command::Inspect { file } => inspect(file),
    }
}

fn init(config_path: Option<PathBuf>, output: PathBuf, sample_blocks: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => MuxConfig::load(path)?,
        None => MuxConfig::default(),
    };

    let file = File::create(&output)
        .map_err(|e| format!("Failed to create output file '{}': {}", output.display(), e))?;
    let mut muxer = WebmMuxer::new(BufWriter::new(file), &config)?;

    if sample_blocks {
        let track = config.video.track_number;
        muxer.write_frame(track, 100, &SAMPLE_FRAME, true)?;
        muxer.write_frame(track, i16::MAX as u64 + 1, &SAMPLE_FRAME, true)?;
    }
    muxer.flush()?;

    info!("Wrote {}", output.display());
    Ok(())
}

fn inspect(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(&path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let (elements, error) = parse_tree_partial::<MatroskaTag>(&bytes);
    for element in &elements {
        println!("{}", describe(element));
    }
    match error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn describe(element: &ParsedElement<'_, MatroskaTag>) -> String {
    let indent = "  ".repeat(element.tag.get_path().len());
    if element.tag == MatroskaTag::SimpleBlock {
        if let Ok(block) = SimpleBlock::from_payload(element.payload) {
            return format!(
                "{}{} @{}: track {}, {:+} ms{}, {} frame bytes",
                indent,
                element.tag,
                element.offset,
                block.track_number,
                block.relative_timestamp,
                if block.keyframe { ", keyframe" } else { "" },
                block.frame.len()
            );
        }
    }
    format!("{}{}", indent, element)
}
