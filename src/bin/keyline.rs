use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use keyline::{Evaluator, FrameIndex};

#[derive(Parser, Debug)]
#[command(name = "keyline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a composition JSON against the model invariants.
    Validate(ValidateArgs),
    /// Resolve a single frame and print the render props as JSON.
    Frame(FrameArgs),
    /// Resolve every frame of the composition as JSON lines.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: i64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path (one JSON line per frame); stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn read_comp_json(path: &Path) -> anyhow::Result<keyline::Composition> {
    let f = File::open(path).with_context(|| format!("open composition '{}'", path.display()))?;
    let r = BufReader::new(f);
    let comp: keyline::Composition =
        serde_json::from_reader(r).with_context(|| "parse composition JSON")?;
    Ok(comp)
}

fn open_sink(out: Option<&Path>) -> anyhow::Result<Box<dyn std::io::Write>> {
    match out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Ok(Box::new(BufWriter::new(f)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    comp.validate().with_context(|| "validate composition")?;
    println!(
        "ok: {} elements, {}x{} @ {} fps, {} frames",
        comp.elements.len(),
        comp.settings.width,
        comp.settings.height,
        comp.settings.fps,
        comp.settings.duration_in_frames
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    comp.validate().with_context(|| "validate composition")?;
    let props = Evaluator::render_frame(&comp, FrameIndex(args.frame));
    let mut sink = open_sink(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut sink, &props).with_context(|| "write render props")?;
    writeln!(sink)?;
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    comp.validate().with_context(|| "validate composition")?;
    let mut sink = open_sink(args.out.as_deref())?;
    for frame in 0..comp.settings.duration_in_frames {
        let props = Evaluator::render_frame(&comp, FrameIndex(frame));
        let line = serde_json::to_string(&props).with_context(|| "serialize render props")?;
        writeln!(sink, "{line}")?;
    }
    Ok(())
}
