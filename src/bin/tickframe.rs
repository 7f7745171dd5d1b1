use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tickframe", version)]
struct Cli {
    /// Log engine decisions (equivalent to `RUST_LOG=tickframe=debug`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text description of an animation.
    Describe(IoArgs),
    /// Export an animation as SVG with SMIL animations.
    Svg(SvgArgs),
    /// Evaluate every shape at one tick and print the result as JSON.
    Frame(FrameArgs),
    /// Convert an animation to a JSON document.
    Json(IoArgs),
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input animation (text format, or a JSON document with a `.json` extension).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SvgArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Playback speed in ticks per second.
    #[arg(long, default_value_t = 1)]
    speed: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Tick to evaluate.
    #[arg(long)]
    tick: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Describe(args) => cmd_describe(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Json(args) => cmd_json(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("tickframe=debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_animation(path: &Path) -> anyhow::Result<tickframe::Animation> {
    let f = File::open(path).with_context(|| format!("open animation '{}'", path.display()))?;
    let r = BufReader::new(f);
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let animation = if is_json {
        tickframe::AnimationDocument::from_reader(r)
            .and_then(tickframe::AnimationDocument::into_animation)
            .with_context(|| format!("load JSON document '{}'", path.display()))?
    } else {
        tickframe::read_animation(r)
            .with_context(|| format!("parse animation '{}'", path.display()))?
    };
    Ok(animation)
}

fn emit(out: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    let Some(path) = out else {
        std::io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .context("write to stdout")?;
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_describe(args: IoArgs) -> anyhow::Result<()> {
    let animation = load_animation(&args.in_path)?;
    emit(args.out.as_deref(), &tickframe::describe(&animation))
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let animation = load_animation(&args.io.in_path)?;
    let opts = tickframe::SvgOptions::from_speed(args.speed)?;
    emit(args.io.out.as_deref(), &tickframe::to_svg(&animation, &opts))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut animation = load_animation(&args.io.in_path)?;
    let tick = tickframe::Tick(args.tick);
    let frame = tickframe::EvaluatedFrame {
        tick,
        shapes: animation.shapes_at(tick),
    };
    let mut json = serde_json::to_string_pretty(&frame).context("serialize frame")?;
    json.push('\n');
    emit(args.io.out.as_deref(), &json)
}

fn cmd_json(args: IoArgs) -> anyhow::Result<()> {
    let animation = load_animation(&args.in_path)?;
    let mut json = tickframe::AnimationDocument::from_animation(&animation).to_json_pretty()?;
    json.push('\n');
    emit(args.out.as_deref(), &json)
}
